use log::debug;
use rand::Rng;
use rand::rngs::SmallRng;

use super::render::{Painter, render};
use super::state::NeuralField;

/// Host primitive for "call me once before the next repaint".
pub trait FrameScheduler {
	type Handle: Copy;

	/// Queues one callback; `None` when the host refused.
	fn request_frame(&self) -> Option<Self::Handle>;
	/// Drops a callback queued by [`request_frame`](Self::request_frame).
	fn cancel_frame(&self, handle: Self::Handle);
}

/// Tracks the single outstanding frame request, if any.
pub struct FrameLoop<S: FrameScheduler> {
	scheduler: S,
	pending: Option<S::Handle>,
}

impl<S: FrameScheduler> FrameLoop<S> {
	pub fn new(scheduler: S) -> Self {
		Self {
			scheduler,
			pending: None,
		}
	}

	pub fn is_running(&self) -> bool {
		self.pending.is_some()
	}

	pub fn start(&mut self) {
		if self.pending.is_none() {
			self.pending = self.scheduler.request_frame();
		}
	}

	pub fn stop(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel_frame(handle);
		}
	}

	/// Consumes the pending request. False means the frame was cancelled
	/// and must not run.
	fn fire(&mut self) -> bool {
		self.pending.take().is_some()
	}
}

/// A [`NeuralField`] driven by a [`FrameLoop`]: one tick and one paint per frame.
pub struct Animator<S: FrameScheduler, R = SmallRng> {
	field: NeuralField<R>,
	frames: FrameLoop<S>,
}

impl<S: FrameScheduler, R: Rng> Animator<S, R> {
	pub fn new(field: NeuralField<R>, scheduler: S) -> Self {
		Self {
			field,
			frames: FrameLoop::new(scheduler),
		}
	}

	pub fn field(&self) -> &NeuralField<R> {
		&self.field
	}

	pub fn is_running(&self) -> bool {
		self.frames.is_running()
	}

	pub fn start(&mut self) {
		if !self.frames.is_running() {
			debug!("neural field: start");
		}
		self.frames.start();
	}

	pub fn stop(&mut self) {
		if self.frames.is_running() {
			debug!("neural field: stop");
		}
		self.frames.stop();
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.field.resize(width, height);
	}

	/// Frame callback. Returns whether a tick actually ran.
	pub fn on_frame<P: Painter + ?Sized>(&mut self, painter: &P) -> bool {
		if !self.frames.fire() {
			return false;
		}
		self.field.tick();
		render(&self.field, painter);
		self.frames.start();
		true
	}

	/// Stops for good. Host-side resources are released by the owner.
	pub fn dispose(&mut self) {
		self.stop();
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};
	use std::rc::Rc;

	use rand::SeedableRng;

	use super::super::config::FieldConfig;
	use super::*;

	/// Hands out increasing ids and remembers which are still live.
	#[derive(Clone, Default)]
	struct FakeScheduler {
		next: Rc<Cell<u32>>,
		live: Rc<RefCell<Vec<u32>>>,
	}

	impl FrameScheduler for FakeScheduler {
		type Handle = u32;

		fn request_frame(&self) -> Option<u32> {
			let id = self.next.get() + 1;
			self.next.set(id);
			self.live.borrow_mut().push(id);
			Some(id)
		}

		fn cancel_frame(&self, handle: u32) {
			self.live.borrow_mut().retain(|&h| h != handle);
		}
	}

	struct NullPainter;

	impl Painter for NullPainter {
		fn fill_rect(&self, _: f64, _: f64, _: f64, _: f64, _: &str) {}
		fn stroke_line(&self, _: (f64, f64), _: (f64, f64), _: &str, _: f64) {}
		fn fill_circle(&self, _: f64, _: f64, _: f64, _: &str) {}
	}

	fn animator(sched: FakeScheduler) -> Animator<FakeScheduler> {
		let config = FieldConfig {
			spawn_chance: 0.0,
			..Default::default()
		};
		let field = NeuralField::new(config, 500.0, 500.0, SmallRng::seed_from_u64(11));
		Animator::new(field, sched)
	}

	/// What the host does when a requested frame comes due.
	fn deliver(a: &mut Animator<FakeScheduler>, sched: &FakeScheduler) -> bool {
		sched.live.borrow_mut().clear();
		a.on_frame(&NullPainter)
	}

	fn phases(a: &Animator<FakeScheduler>) -> Vec<f64> {
		a.field().nodes().iter().map(|n| n.pulse_phase).collect()
	}

	#[test]
	fn start_is_idempotent() {
		let sched = FakeScheduler::default();
		let mut a = animator(sched.clone());
		a.start();
		a.start();
		assert_eq!(sched.live.borrow().len(), 1);
		assert!(a.is_running());
	}

	#[test]
	fn each_frame_ticks_and_reschedules() {
		let sched = FakeScheduler::default();
		let mut a = animator(sched.clone());
		let before = phases(&a);
		a.start();
		assert!(deliver(&mut a, &sched));
		assert!(deliver(&mut a, &sched));
		assert_eq!(sched.next.get(), 3);
		assert_eq!(sched.live.borrow().len(), 1);
		for (b, n) in before.iter().zip(a.field().nodes()) {
			assert!((n.pulse_phase - (b + 0.01)).abs() < 1e-12);
		}
	}

	#[test]
	fn stopped_frames_change_nothing() {
		let sched = FakeScheduler::default();
		let mut a = animator(sched.clone());
		a.start();
		deliver(&mut a, &sched);
		a.stop();
		a.stop();
		assert!(sched.live.borrow().is_empty());

		let frozen = phases(&a);
		for _ in 0..5 {
			assert!(!a.on_frame(&NullPainter));
		}
		assert_eq!(phases(&a), frozen);

		a.start();
		assert!(deliver(&mut a, &sched));
		for (f, n) in frozen.iter().zip(a.field().nodes()) {
			assert!((n.pulse_phase - (f + 0.005)).abs() < 1e-12);
		}
	}

	#[test]
	fn dispose_cancels_pending_frame() {
		let sched = FakeScheduler::default();
		let mut a = animator(sched.clone());
		a.start();
		a.dispose();
		assert!(!a.is_running());
		assert!(sched.live.borrow().is_empty());
	}

	#[test]
	fn resize_rebuilds_field() {
		let mut a = animator(FakeScheduler::default());
		a.resize(1000.0, 1000.0);
		assert_eq!(a.field().nodes().len(), 40);
	}
}
