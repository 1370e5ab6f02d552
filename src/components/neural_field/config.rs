use std::ops::Range;

use super::types::Rgba;

pub const SIGNAL_PALETTE: &[&str] = &["#26c6da", "#00acc1", "#ffd700", "#00bcd4", "#64b5f6"];

/// Tuning knobs for [`NeuralField`](super::state::NeuralField) and its renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
	/// Surface area (px²) per node.
	pub area_per_node: f64,
	/// Nodes closer than this are linked.
	pub link_distance: f64,
	/// Initial velocity components are drawn from `±velocity_spread / 2`.
	pub velocity_spread: f64,
	/// Phase advance per tick of each node's pulse.
	pub pulse_step: f64,
	/// Node energy swings between `base` and `base + span` with the pulse.
	pub node_energy_base: f64,
	pub node_energy_span: f64,
	/// Per node, per tick.
	pub spawn_chance: f64,
	/// Edge fraction a new signal covers per tick.
	pub signal_speed: Range<f64>,
	pub signal_energy: Range<f64>,
	/// Signal energy multiplier applied on every arrival.
	pub hop_decay: f64,
	/// Signals at or below this are dropped on arrival.
	pub min_signal_energy: f64,
	/// Per-tick multiplier on edge glow.
	pub edge_glow_decay: f64,
	/// Signal colors, picked uniformly at spawn.
	pub palette: &'static [&'static str],
	/// Translucent wash painted over the previous frame.
	pub fade: Rgba,
	pub link_color: Rgba,
	pub node_color: Rgba,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			area_per_node: 25_000.0,
			link_distance: 120.0,
			velocity_spread: 0.1,
			pulse_step: 0.005,
			node_energy_base: 0.2,
			node_energy_span: 0.3,
			spawn_chance: 0.005,
			signal_speed: 0.005..0.015,
			signal_energy: 0.3..0.7,
			hop_decay: 0.9,
			min_signal_energy: 0.1,
			edge_glow_decay: 0.96,
			palette: SIGNAL_PALETTE,
			fade: Rgba::new(47, 54, 64, 0.05),
			link_color: Rgba::new(38, 198, 218, 1.0),
			node_color: Rgba::new(38, 198, 218, 1.0),
		}
	}
}
