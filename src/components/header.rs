//! Site header: sticky/hiding on scroll, mobile menu, in-page anchors,
//! scroll-spy on nav links and the back-to-top button.

use leptos::ev::{self, MouseEvent};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, Window};

use super::anchor::{AnchorLink, follow_anchor, prefers_reduced_motion, smooth_scroll};

pub const SCROLLED_AFTER: f64 = 50.0;
pub const BACK_TO_TOP_AFTER: f64 = 300.0;
pub const MOBILE_BREAKPOINT: f64 = 992.0;
pub const SPY_LOOKAHEAD: f64 = 100.0;
/// Delay between consecutive nav links fading in.
pub const NAV_STAGGER_MS: usize = 100;

/// Header chrome derived from the scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
	/// Past [`SCROLLED_AFTER`]: the header turns opaque.
	pub scrolled: bool,
	/// Slid out of view while scrolling down.
	pub hidden: bool,
	/// Past [`BACK_TO_TOP_AFTER`]: the back-to-top button shows.
	pub back_to_top: bool,
	last: f64,
}

impl ScrollState {
	/// Next state after the page scrolled to `y`. Hiding is frozen while the
	/// mobile menu is open.
	pub fn advance(self, y: f64, header_height: f64, menu_open: bool) -> Self {
		let hidden = if menu_open {
			self.hidden
		} else {
			y > self.last && y > header_height
		};
		Self {
			scrolled: y > SCROLLED_AFTER,
			hidden,
			back_to_top: y > BACK_TO_TOP_AFTER,
			last: y.max(0.0),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
	pub id: String,
	pub top: f64,
	pub height: f64,
}

/// The last section whose vertical span contains `line`.
pub fn active_section(line: f64, sections: &[SectionBounds]) -> Option<&str> {
	sections
		.iter()
		.filter(|s| line >= s.top && line < s.top + s.height)
		.last()
		.map(|s| s.id.as_str())
}

#[derive(Clone, Copy, Debug)]
pub struct NavLink {
	pub href: &'static str,
	pub label: &'static str,
}

/// Coalesces bursts of scroll events into one refresh per animation frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameThrottle {
	queued: bool,
}

impl FrameThrottle {
	/// True when the caller should schedule a frame, false if one is already queued.
	pub fn request(&mut self) -> bool {
		!std::mem::replace(&mut self.queued, true)
	}

	/// Called from the queued frame before it does its work.
	pub fn release(&mut self) {
		self.queued = false;
	}
}

/// CSS transition for the `index`th nav link's entrance.
pub fn entrance_transition(index: usize) -> String {
	let delay = index * NAV_STAGGER_MS;
	format!("opacity 0.3s ease {delay}ms, transform 0.3s ease {delay}ms")
}

fn section_bounds(window: &Window) -> Vec<SectionBounds> {
	let Some(list) = window
		.document()
		.and_then(|d| d.query_selector_all("section[id]").ok())
	else {
		return Vec::new();
	};
	(0..list.length())
		.filter_map(|i| list.get(i)?.dyn_into::<HtmlElement>().ok())
		.map(|el| SectionBounds {
			id: el.id(),
			top: el.offset_top() as f64,
			height: el.offset_height() as f64,
		})
		.collect()
}

fn is_narrow_viewport() -> bool {
	web_sys::window()
		.and_then(|w| w.inner_width().ok())
		.and_then(|w| w.as_f64())
		.is_some_and(|w| w <= MOBILE_BREAKPOINT)
}

fn encloses<E: AsRef<web_sys::Node>>(el: Option<E>, target: Option<&web_sys::Node>) -> bool {
	el.is_some_and(|el| el.as_ref().contains(target))
}

#[component]
pub fn SiteHeader(#[prop(into)] brand: String, links: Vec<NavLink>) -> impl IntoView {
	let header_ref = NodeRef::<leptos::html::Header>::new();
	let nav_ref = NodeRef::<leptos::html::Nav>::new();
	let button_ref = NodeRef::<leptos::html::Button>::new();
	let menu_open = RwSignal::new(false);
	let scroll = RwSignal::new(ScrollState::default());
	let active = RwSignal::new(None::<String>);
	let reduced_motion = prefers_reduced_motion();
	let entered = RwSignal::new(reduced_motion);
	let throttle = StoredValue::new(FrameThrottle::default());

	let refresh = move || {
		let Some(window) = web_sys::window() else {
			return;
		};
		let y = window.scroll_y().unwrap_or(0.0);
		let header_height = header_ref
			.get_untracked()
			.map(|h| h.offset_height() as f64)
			.unwrap_or(0.0);
		scroll.update(|s| *s = s.advance(y, header_height, menu_open.get_untracked()));
		if let Some(id) = active_section(y + SPY_LOOKAHEAD, &section_bounds(&window)) {
			if active.get_untracked().as_deref() != Some(id) {
				active.set(Some(id.to_owned()));
			}
		}
	};
	Effect::new(move |_| refresh());
	if !reduced_motion {
		Effect::new(move |_| request_animation_frame(move || entered.set(true)));
	}

	Effect::new(move |_| {
		let open = menu_open.get();
		if let Some(body) = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.body())
		{
			let _ = body
				.style()
				.set_property("overflow", if open { "hidden" } else { "" });
		}
	});

	let on_scroll = window_event_listener(ev::scroll, move |_| {
		if throttle.try_update_value(FrameThrottle::request).unwrap_or(false) {
			request_animation_frame(move || {
				throttle.update_value(FrameThrottle::release);
				refresh();
			});
		}
	});
	let on_escape = window_event_listener(ev::keydown, move |ev| {
		if menu_open.get_untracked() && matches!(ev.key().as_str(), "Escape" | "Esc") {
			menu_open.set(false);
		}
	});
	let on_outside = window_event_listener(ev::click, move |ev| {
		if !menu_open.get_untracked() {
			return;
		}
		let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
		if !encloses(nav_ref.get_untracked(), target.as_ref())
			&& !encloses(button_ref.get_untracked(), target.as_ref())
		{
			menu_open.set(false);
		}
	});
	on_cleanup(move || {
		on_scroll.remove();
		on_escape.remove();
		on_outside.remove();
	});

	let back_to_top = move |ev: MouseEvent| {
		ev.prevent_default();
		if let Some(window) = web_sys::window() {
			smooth_scroll(&window, 0.0);
		}
		if let Some(header) = header_ref.get_untracked() {
			let _ = header.set_attribute("tabindex", "-1");
			let _ = header.focus();
		}
	};

	view! {
		<header
			node_ref=header_ref
			id="header"
			class=move || {
				let s = scroll.get();
				let mut class = String::from("site-header");
				if s.scrolled {
					class.push_str(" scrolled");
				}
				if s.hidden {
					class.push_str(" hide");
				}
				class
			}
		>
			<AnchorLink href="#home" class="logo">{brand}</AnchorLink>
			<button
				node_ref=button_ref
				id="mobileMenuBtn"
				class=move || if menu_open.get() { "mobile-menu-btn active" } else { "mobile-menu-btn" }
				aria-label="Toggle navigation"
				aria-controls="mainNav"
				aria-expanded=move || menu_open.get().to_string()
				on:click=move |_| menu_open.update(|open| *open = !*open)
			>
				<span></span>
				<span></span>
				<span></span>
			</button>
			<nav
				node_ref=nav_ref
				id="mainNav"
				class=move || if menu_open.get() { "main-nav active" } else { "main-nav" }
			>
				<ul>
					{links
						.into_iter()
						.enumerate()
						.map(|(i, link)| {
							let id = link.href.trim_start_matches('#');
							let transition = if reduced_motion {
								String::new()
							} else {
								entrance_transition(i)
							};
							view! {
								<li>
									<a
										href=link.href
										data-nav-link=""
										style:opacity=move || if entered.get() { "1" } else { "0" }
										style:transform=move || {
											if entered.get() { "translateY(0)" } else { "translateY(10px)" }
										}
										style:transition=transition
										class=move || {
											if active.get().as_deref() == Some(id) {
												"nav-link active"
											} else {
												"nav-link"
											}
										}
										on:click=move |ev: MouseEvent| {
											follow_anchor(&ev, link.href);
											if is_narrow_viewport() {
												menu_open.set(false);
											}
										}
									>
										{link.label}
									</a>
								</li>
							}
						})
						.collect_view()}
				</ul>
			</nav>
		</header>
		<a
			href="#"
			id="backToTop"
			class=move || if scroll.get().back_to_top { "back-to-top show" } else { "back-to-top" }
			aria-label="Back to top"
			on:click=back_to_top
		>
			"↑"
		</a>
	}
}
