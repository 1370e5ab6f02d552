use leptos::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct FaqItem {
	pub question: &'static str,
	pub answer: &'static str,
}

/// Opening an item closes the others; clicking the open item closes it.
pub fn toggle(open: Option<usize>, clicked: usize) -> Option<usize> {
	if open == Some(clicked) { None } else { Some(clicked) }
}

#[component]
pub fn Faq(items: Vec<FaqItem>) -> impl IntoView {
	let open = RwSignal::new(None::<usize>);

	view! {
		<div class="accordion">
			{items
				.into_iter()
				.enumerate()
				.map(|(i, item)| {
					let panel = NodeRef::<leptos::html::Div>::new();
					let is_open = move || open.get() == Some(i);
					view! {
						<div class=move || if is_open() { "accordion-item active" } else { "accordion-item" }>
							<button
								class="accordion-header"
								aria-expanded=move || is_open().to_string()
								on:click=move |_| open.update(|o| *o = toggle(*o, i))
							>
								<span>{item.question}</span>
								<i class=move || if is_open() { "fa fa-minus" } else { "fa fa-plus" }></i>
							</button>
							<div
								node_ref=panel
								class="accordion-panel"
								style:max-height=move || {
									if is_open() {
										panel
											.get()
											.map(|p| format!("{}px", p.scroll_height()))
											.unwrap_or_default()
									} else {
										String::new()
									}
								}
							>
								<p>{item.answer}</p>
							</div>
						</div>
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
	fn at_most_one_open() {
		let open = toggle(None, 2);
		assert_eq!(open, Some(2));
		let open = toggle(open, 0);
		assert_eq!(open, Some(0));
		assert_eq!(toggle(open, 0), None);
	}
}
