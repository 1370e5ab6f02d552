use leptos::prelude::*;

use super::anchor::AnchorLink;

/// One pricing tier as shown on its card.
#[derive(Clone, Debug)]
pub struct Plan {
	pub name: &'static str,
	/// Display price, currency and period included.
	pub price: &'static str,
	pub features: Vec<&'static str>,
	/// Highlighted as the recommended tier.
	pub featured: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStyle {
	pub transform: &'static str,
	pub opacity: &'static str,
}

const RESTING: CardStyle = CardStyle {
	transform: "scale(1)",
	opacity: "1",
};

/// Inline style for card `idx` while `hovered` (a non-featured card) is under
/// the pointer. Featured cards keep their stylesheet look.
pub fn card_style(idx: usize, featured: bool, hovered: Option<usize>) -> Option<CardStyle> {
	if featured {
		return None;
	}
	Some(match hovered {
		None => RESTING,
		Some(h) if h == idx => CardStyle {
			transform: "translateY(-10px)",
			opacity: "1",
		},
		Some(_) => CardStyle {
			transform: "scale(0.98)",
			opacity: "0.9",
		},
	})
}

#[component]
pub fn PricingCards(plans: Vec<Plan>) -> impl IntoView {
	let hovered = RwSignal::new(None::<usize>);

	view! {
		<div class="pricing-grid">
			{plans
				.into_iter()
				.enumerate()
				.map(|(i, plan)| {
					let featured = plan.featured;
					let style = move || card_style(i, featured, hovered.get());
					view! {
						<div
							class=if featured { "pricing-card featured" } else { "pricing-card" }
							style:transform=move || style().map(|s| s.transform).unwrap_or_default()
							style:opacity=move || style().map(|s| s.opacity).unwrap_or_default()
							on:mouseenter=move |_| {
								if !featured {
									hovered.set(Some(i));
								}
							}
							on:mouseleave=move |_| {
								if !featured {
									hovered.set(None);
								}
							}
						>
							<h3>{plan.name}</h3>
							<p class="price">{plan.price}</p>
							<ul>
								{plan
									.features
									.into_iter()
									.map(|f| view! { <li>{f}</li> })
									.collect_view()}
							</ul>
							<AnchorLink href="#contact" class="order-now-btn">
								"Order now"
							</AnchorLink>
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
	fn hovered_card_lifts_and_others_shrink() {
		assert_eq!(
			card_style(1, false, Some(1)).map(|s| s.transform),
			Some("translateY(-10px)")
		);
		assert_eq!(
			card_style(0, false, Some(1)),
			Some(CardStyle {
				transform: "scale(0.98)",
				opacity: "0.9",
			})
		);
		assert_eq!(card_style(0, false, None), Some(RESTING));
	}

	#[test]
	fn featured_card_untouched() {
		assert_eq!(card_style(2, true, Some(0)), None);
		assert_eq!(card_style(2, true, None), None);
	}
}
