use leptos::prelude::*;

/// Decorative bubbles, placed by each section that wants them.
#[component]
pub fn FloatingBubbles(#[prop(default = 10)] count: usize) -> impl IntoView {
	view! {
		<div class="floating-bubbles" aria-hidden="true">
			{(0..count).map(|_| view! { <div class="bubble"></div> }).collect_view()}
		</div>
	}
}
