//! In-page anchors: every `#id` link scrolls so the target clears the fixed header.

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::error::HostError;

/// Height of the fixed header that anchored sections must clear.
pub const ANCHOR_OFFSET: f64 = 80.0;
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// `#id` links are handled in page; a bare `#` and real URLs go to the browser.
pub fn is_in_page(href: &str) -> bool {
	href.len() > 1 && href.starts_with('#')
}

pub fn prefers_reduced_motion() -> bool {
	web_sys::window()
		.and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
		.is_some_and(|query| query.matches())
}

pub fn scroll_behavior(reduced_motion: bool) -> ScrollBehavior {
	if reduced_motion {
		ScrollBehavior::Auto
	} else {
		ScrollBehavior::Smooth
	}
}

/// Scrolls the window to `top`, instantly when the user asked for reduced motion.
pub fn smooth_scroll(window: &Window, top: f64) {
	let options = ScrollToOptions::new();
	options.set_top(top);
	options.set_behavior(scroll_behavior(prefers_reduced_motion()));
	window.scroll_to_with_scroll_to_options(&options);
}

/// Scrolls to the element `href` (a `#id` selector) points at.
pub fn scroll_to_anchor(href: &str) -> Result<(), HostError> {
	let window = web_sys::window().ok_or(HostError::NoWindow)?;
	let Some(document) = window.document() else {
		return Err(HostError::NoWindow);
	};
	if let Some(target) = document.query_selector(href)? {
		let top = target
			.dyn_into::<HtmlElement>()
			.map(|el| el.offset_top() as f64)
			.unwrap_or(0.0);
		smooth_scroll(&window, top - ANCHOR_OFFSET);
	}
	Ok(())
}

/// Click handler shared by every link on the page that points at `href`.
pub fn follow_anchor(ev: &MouseEvent, href: &str) {
	if !is_in_page(href) {
		return;
	}
	ev.prevent_default();
	if let Err(err) = scroll_to_anchor(href) {
		warn!("anchor {href} not followed: {err}");
	}
}

#[component]
pub fn AnchorLink(
	href: &'static str,
	#[prop(optional)] id: Option<&'static str>,
	#[prop(optional)] class: &'static str,
	children: Children,
) -> impl IntoView {
	view! {
		<a href=href id=id class=class on:click=move |ev: MouseEvent| follow_anchor(&ev, href)>
			{children()}
		</a>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_fragment_links_are_intercepted() {
		assert!(is_in_page("#pricing"));
		assert!(is_in_page("#contact"));
		assert!(!is_in_page("#"));
		assert!(!is_in_page(""));
		assert!(!is_in_page("/blog#intro"));
		assert!(!is_in_page("https://example.com/#top"));
	}

	#[test]
	fn reduced_motion_jumps_instead_of_gliding() {
		assert_eq!(scroll_behavior(true), ScrollBehavior::Auto);
		assert_eq!(scroll_behavior(false), ScrollBehavior::Smooth);
	}
}
