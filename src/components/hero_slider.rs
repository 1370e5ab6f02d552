use std::time::Duration;

use leptos::prelude::*;
use log::warn;

pub const SLIDE_INTERVAL: Duration = Duration::from_secs(7);

pub fn next_slide(current: usize, len: usize) -> usize {
	if len == 0 { 0 } else { (current + 1) % len }
}

/// Cross-fading hero images. Advances on a timer unless hovered or the
/// page is hidden; a single image never advances.
#[component]
pub fn HeroSlider(
	images: Vec<&'static str>,
	#[prop(into, default = Signal::stored(true))] page_visible: Signal<bool>,
) -> impl IntoView {
	let len = images.len();
	let current = RwSignal::new(0usize);
	let hovered = RwSignal::new(false);
	let timer = StoredValue::new(None::<IntervalHandle>);

	let clear = move || {
		timer.update_value(|t| {
			if let Some(handle) = t.take() {
				handle.clear();
			}
		})
	};

	Effect::new(move |_| {
		let running = len >= 2 && !hovered.get() && page_visible.get();
		clear();
		if !running {
			return;
		}
		match set_interval_with_handle(
			move || current.update(|i| *i = next_slide(*i, len)),
			SLIDE_INTERVAL,
		) {
			Ok(handle) => timer.set_value(Some(handle)),
			Err(err) => warn!("hero slider stalled: {err:?}"),
		}
	});
	on_cleanup(clear);

	view! {
		<div
			id="heroImageSlider"
			class="hero-slider"
			on:mouseenter=move |_| hovered.set(true)
			on:mouseleave=move |_| hovered.set(false)
		>
			{images
				.into_iter()
				.enumerate()
				.map(|(i, src)| {
					view! {
						<img
							src=src
							alt=""
							class=move || {
								if current.get() == i { "heroBannerImage active fadeIn" } else { "heroBannerImage" }
							}
						/>
					}
				})
				.collect_view()}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wraps_around() {
		assert_eq!(next_slide(0, 3), 1);
		assert_eq!(next_slide(2, 3), 0);
		assert_eq!(next_slide(0, 0), 0);
	}
}
