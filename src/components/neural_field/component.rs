use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::config::FieldConfig;
use super::frame_loop::{Animator, FrameScheduler};
use super::state::NeuralField;
use crate::error::HostError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` bound to one callback that lives as long as the host.
struct RafScheduler {
	window: Window,
	callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
	type Handle = i32;

	fn request_frame(&self) -> Option<i32> {
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&self, handle: i32) {
		let _ = self.window.cancel_animation_frame(handle);
	}
}

fn viewport(window: &Window) -> Result<(f64, f64), HostError> {
	Ok((
		window.inner_width()?.as_f64().unwrap_or(0.0),
		window.inner_height()?.as_f64().unwrap_or(0.0),
	))
}

/// A neural field attached to a full-window canvas, plus the browser
/// callbacks registered for it.
pub struct FieldHost {
	window: Window,
	animator: Rc<RefCell<Animator<RafScheduler>>>,
	frame_cb: FrameCallback,
	resize_cb: Closure<dyn FnMut()>,
}

impl FieldHost {
	pub fn attach(canvas: HtmlCanvasElement, config: FieldConfig) -> Result<Self, HostError> {
		let window = web_sys::window().ok_or(HostError::NoWindow)?;
		let (w, h) = viewport(&window)?;
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(HostError::NoContext)?
			.dyn_into()
			.map_err(|_| HostError::NoContext)?;

		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let field = NeuralField::new(config, w, h, SmallRng::seed_from_u64(seed));
		let frame_cb: FrameCallback = Rc::new(RefCell::new(None));
		let scheduler = RafScheduler {
			window: window.clone(),
			callback: frame_cb.clone(),
		};
		let animator = Rc::new(RefCell::new(Animator::new(field, scheduler)));

		// Cycle through the scheduler; broken by `dispose`.
		let animator_frame = animator.clone();
		*frame_cb.borrow_mut() = Some(Closure::new(move || {
			animator_frame.borrow_mut().on_frame(&ctx);
		}));

		let (animator_resize, window_resize) = (animator.clone(), window.clone());
		let resize_cb = Closure::<dyn FnMut()>::new(move || {
			let (nw, nh) = match viewport(&window_resize) {
				Ok(size) => size,
				Err(err) => {
					warn!("neural field: resize skipped: {err}");
					return;
				}
			};
			canvas.set_width(nw as u32);
			canvas.set_height(nh as u32);
			let mut animator = animator_resize.borrow_mut();
			animator.resize(nw, nh);
			info!(
				"neural field: rebuilt for {nw}x{nh} ({} nodes, {} edges)",
				animator.field().nodes().len(),
				animator.field().edges().len()
			);
		});
		if let Err(err) =
			window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
		{
			frame_cb.borrow_mut().take();
			return Err(err.into());
		}

		{
			let animator = animator.borrow();
			info!(
				"neural field: attached {w}x{h} ({} nodes, {} edges)",
				animator.field().nodes().len(),
				animator.field().edges().len()
			);
		}

		Ok(Self {
			window,
			animator,
			frame_cb,
			resize_cb,
		})
	}

	pub fn start(&self) {
		self.animator.borrow_mut().start();
	}

	pub fn stop(&self) {
		self.animator.borrow_mut().stop();
	}

	/// Cancels the pending frame and unregisters every browser callback.
	pub fn dispose(&self) {
		self.animator.borrow_mut().dispose();
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.resize_cb.as_ref().unchecked_ref());
		if self.frame_cb.borrow_mut().take().is_some() {
			info!("neural field: disposed");
		}
	}
}

impl Drop for FieldHost {
	fn drop(&mut self) {
		self.dispose();
	}
}

/// Full-window animated background. `paused` is owned by the caller,
/// typically derived from page visibility.
#[component]
pub fn NeuralFieldCanvas(
	#[prop(into, default = Signal::stored(false))] paused: Signal<bool>,
	#[prop(optional)] config: Option<FieldConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let host = StoredValue::new_local(None::<FieldHost>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if host.with_value(Option::is_some) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match FieldHost::attach(canvas, config.clone().unwrap_or_default()) {
			Ok(attached) => {
				if !paused.get_untracked() {
					attached.start();
				}
				host.set_value(Some(attached));
			}
			Err(err) => warn!("neural field unavailable: {err}"),
		}
	});

	Effect::new(move |_| {
		let paused = paused.get();
		host.with_value(|host| {
			if let Some(host) = host {
				if paused { host.stop() } else { host.start() }
			}
		});
	});

	on_cleanup(move || {
		host.update_value(|host| {
			if let Some(host) = host.take() {
				host.dispose();
			}
		})
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="neural-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; z-index: -1; pointer-events: none; display: block;"
		/>
	}
}
