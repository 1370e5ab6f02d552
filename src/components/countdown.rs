use std::time::Duration;

use leptos::prelude::*;
use log::{info, warn};

const SECOND_MS: f64 = 1000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;
/// Every offer runs for four days, then starts over.
pub const RUN_LENGTH_MS: f64 = 4.0 * DAY_MS;

/// Whole days, hours, minutes and seconds left on the offer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Remaining {
	pub days: u64,
	pub hours: u64,
	pub minutes: u64,
	pub seconds: u64,
}

impl Remaining {
	/// Time left until `target_ms`, or `None` once it has passed.
	pub fn until(target_ms: f64, now_ms: f64) -> Option<Self> {
		let left = target_ms - now_ms;
		if left < 0.0 {
			return None;
		}
		Some(Self {
			days: (left / DAY_MS).floor() as u64,
			hours: ((left % DAY_MS) / HOUR_MS).floor() as u64,
			minutes: ((left % HOUR_MS) / MINUTE_MS).floor() as u64,
			seconds: ((left % MINUTE_MS) / SECOND_MS).floor() as u64,
		})
	}

	pub fn is_urgent(&self) -> bool {
		self.days < 1
	}
}

/// Keeps a future target, or starts a fresh run from `now_ms`.
pub fn roll_target(target_ms: f64, now_ms: f64) -> f64 {
	if target_ms - now_ms < 0.0 {
		now_ms + RUN_LENGTH_MS
	} else {
		target_ms
	}
}

pub fn pad2(value: u64) -> String {
	format!("{value:02}")
}

#[component]
pub fn Countdown(
	/// Epoch milliseconds; defaults to a fresh run from now.
	#[prop(optional)]
	target_ms: Option<f64>,
) -> impl IntoView {
	let start = js_sys::Date::now();
	let target = RwSignal::new(roll_target(target_ms.unwrap_or(start + RUN_LENGTH_MS), start));
	let now = RwSignal::new(start);
	let timer = StoredValue::new(None::<IntervalHandle>);

	let tick = move || {
		let n = js_sys::Date::now();
		let rolled = roll_target(target.get_untracked(), n);
		if rolled != target.get_untracked() {
			info!("countdown expired; restarting");
			target.set(rolled);
		}
		now.set(n);
	};
	match set_interval_with_handle(tick, Duration::from_secs(1)) {
		Ok(handle) => timer.set_value(Some(handle)),
		Err(err) => warn!("countdown frozen: {err:?}"),
	}
	on_cleanup(move || {
		timer.update_value(|t| {
			if let Some(handle) = t.take() {
				handle.clear();
			}
		})
	});

	let remaining = Memo::new(move |_| Remaining::until(target.get(), now.get()).unwrap_or_default());

	view! {
		<div
			class=move || if remaining.get().is_urgent() { "countdown animate-pulse" } else { "countdown" }
		>
			<div class="countdown-unit">
				<span id="days">{move || pad2(remaining.get().days)}</span>
				<small>"Days"</small>
			</div>
			<div class="countdown-unit">
				<span id="hours">{move || pad2(remaining.get().hours)}</span>
				<small>"Hours"</small>
			</div>
			<div class="countdown-unit">
				<span id="minutes">{move || pad2(remaining.get().minutes)}</span>
				<small>"Minutes"</small>
			</div>
			<div class="countdown-unit">
				<span id="seconds">{move || pad2(remaining.get().seconds)}</span>
				<small>"Seconds"</small>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn breaks_down_remaining_time() {
		let left = 2.0 * DAY_MS + 3.0 * HOUR_MS + 4.0 * MINUTE_MS + 5.5 * SECOND_MS;
		assert_eq!(
			Remaining::until(1_000.0 + left, 1_000.0),
			Some(Remaining {
				days: 2,
				hours: 3,
				minutes: 4,
				seconds: 5,
			})
		);
	}

	#[test]
	fn expired_target_rolls_forward() {
		assert_eq!(Remaining::until(10.0, 11.0), None);
		assert_eq!(roll_target(10.0, 11.0), 11.0 + RUN_LENGTH_MS);
		assert_eq!(roll_target(50.0, 11.0), 50.0);
		assert_eq!(roll_target(11.0, 11.0), 11.0);
	}

	#[test]
	fn urgent_under_a_day() {
		let r = Remaining::until(DAY_MS - 1.0, 0.0).unwrap_or_default();
		assert!(r.is_urgent());
		assert_eq!(r.hours, 23);
		let r = Remaining::until(DAY_MS, 0.0).unwrap_or_default();
		assert!(!r.is_urgent());
	}

	#[test]
	fn pads_to_two_digits() {
		assert_eq!(pad2(7), "07");
		assert_eq!(pad2(42), "42");
		assert_eq!(pad2(123), "123");
	}
}
