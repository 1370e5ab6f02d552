use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;

use crate::error::HostError;

/// Tracks `document.hidden`. The listener is removed with the calling owner.
pub fn use_page_visible() -> ReadSignal<bool> {
	let (visible, set_visible) = signal(true);
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		warn!("page visibility unavailable: {}", HostError::NoWindow);
		return visible;
	};
	set_visible.set(!document.hidden());

	let doc = document.clone();
	let listener = Closure::<dyn FnMut()>::new(move || {
		let now_visible = !doc.hidden();
		debug!("page visible: {now_visible}");
		set_visible.set(now_visible);
	});
	if let Err(err) = document
		.add_event_listener_with_callback("visibilitychange", listener.as_ref().unchecked_ref())
	{
		warn!("page visibility unavailable: {}", HostError::from(err));
		return visible;
	}

	let registration = StoredValue::new_local(Some((document, listener)));
	on_cleanup(move || {
		registration.update_value(|registration| {
			if let Some((document, listener)) = registration.take() {
				let _ = document.remove_event_listener_with_callback(
					"visibilitychange",
					listener.as_ref().unchecked_ref(),
				);
			}
		})
	});
	visible
}
