use std::f64::consts::TAU;
use std::ops::Range;

use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use super::config::FieldConfig;
use super::types::{Edge, Node, Signal};

/// Nodes drifting inside a `width × height` surface, the proximity graph
/// between them, and the signals currently travelling along it.
pub struct NeuralField<R = SmallRng> {
	pub config: FieldConfig,
	pub width: f64,
	pub height: f64,
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	signals: Vec<Signal>,
	rng: R,
}

fn sample<R: Rng>(rng: &mut R, range: &Range<f64>) -> f64 {
	range.start + rng.random::<f64>() * (range.end - range.start)
}

/// `floor(width * height / area_per_node)`, or zero for a degenerate surface.
pub fn node_count(width: f64, height: f64, area_per_node: f64) -> usize {
	let area = width * height;
	if !(width > 0.0 && height > 0.0 && area_per_node > 0.0 && area.is_finite()) {
		return 0;
	}
	(area / area_per_node).floor() as usize
}

impl<R: Rng> NeuralField<R> {
	pub fn new(config: FieldConfig, width: f64, height: f64, rng: R) -> Self {
		let mut field = Self {
			config,
			width: 0.0,
			height: 0.0,
			nodes: Vec::new(),
			edges: Vec::new(),
			signals: Vec::new(),
			rng,
		};
		field.resize(width, height);
		field
	}

	/// Discards every node, edge and signal and rebuilds for the new extent.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
		self.signals.clear();
		self.build_nodes();
		self.build_edges();
	}

	fn build_nodes(&mut self) {
		let count = node_count(self.width, self.height, self.config.area_per_node);
		let spread = self.config.velocity_spread;
		let (w, h) = (self.width, self.height);
		let rng = &mut self.rng;
		self.nodes = (0..count)
			.map(|_| Node {
				x: rng.random::<f64>() * w,
				y: rng.random::<f64>() * h,
				vx: (rng.random::<f64>() - 0.5) * spread,
				vy: (rng.random::<f64>() - 0.5) * spread,
				energy: rng.random::<f64>(),
				pulse_phase: rng.random::<f64>() * TAU,
				edges: Vec::new(),
			})
			.collect();
	}

	fn build_edges(&mut self) {
		self.edges.clear();
		let max = self.config.link_distance;
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let (dx, dy) = (
					self.nodes[i].x - self.nodes[j].x,
					self.nodes[i].y - self.nodes[j].y,
				);
				let distance = (dx * dx + dy * dy).sqrt();
				if distance < max {
					let idx = self.edges.len();
					self.edges.push(Edge {
						a: i,
						b: j,
						distance,
						energy: 0.0,
					});
					self.nodes[i].edges.push(idx);
					self.nodes[j].edges.push(idx);
				}
			}
		}
	}

	/// Advances the field by one frame: nodes, edge glow, then signals.
	pub fn tick(&mut self) {
		self.update_nodes();
		for edge in &mut self.edges {
			edge.energy *= self.config.edge_glow_decay;
		}
		self.update_signals();
	}

	fn update_nodes(&mut self) {
		let (w, h) = (self.width, self.height);
		let cfg = &self.config;
		for (idx, node) in self.nodes.iter_mut().enumerate() {
			node.x += node.vx;
			node.y += node.vy;

			if node.x < 0.0 || node.x > w {
				node.vx = -node.vx;
				node.x = node.x.clamp(0.0, w);
			}
			if node.y < 0.0 || node.y > h {
				node.vy = -node.vy;
				node.y = node.y.clamp(0.0, h);
			}

			node.pulse_phase += cfg.pulse_step;
			node.energy =
				cfg.node_energy_base + cfg.node_energy_span * (node.pulse_phase.sin() * 0.5 + 0.5);

			if self.rng.random::<f64>() < cfg.spawn_chance {
				let speed = sample(&mut self.rng, &cfg.signal_speed);
				let energy = sample(&mut self.rng, &cfg.signal_energy);
				let color = cfg.palette.choose(&mut self.rng).copied().unwrap_or("#ffffff");
				self.signals.push(Signal::new(idx, speed, energy, color));
			}
		}
	}

	fn update_signals(&mut self) {
		let Self {
			config,
			nodes,
			edges,
			signals,
			rng,
			..
		} = self;

		signals.retain_mut(|signal| {
			if signal.target.is_none() {
				let Some(node) = nodes.get(signal.current) else {
					return false;
				};
				if node.edges.is_empty() {
					return false;
				}
				let pick = rng.random_range(0..node.edges.len());
				let edge = &mut edges[node.edges[pick]];
				edge.energy = edge.energy.max(signal.energy);
				signal.target = Some(edge.other(signal.current));
				signal.progress = 0.0;
			}

			signal.progress += signal.speed;
			if signal.progress >= 1.0 {
				if let Some(target) = signal.target.take() {
					signal.current = target;
				}
				signal.energy *= config.hop_decay;
				if signal.energy < config.min_signal_energy {
					return false;
				}
			}
			true
		});
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn signals(&self) -> &[Signal] {
		&self.signals
	}

	/// Position of a signal along its current hop, if it has one.
	pub fn signal_position(&self, signal: &Signal) -> Option<(f64, f64)> {
		let from = self.nodes.get(signal.current)?;
		let to = self.nodes.get(signal.target?)?;
		let t = signal.progress.min(1.0);
		Some((from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t))
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::super::config::SIGNAL_PALETTE;
	use super::*;

	fn quiet() -> FieldConfig {
		FieldConfig {
			spawn_chance: 0.0,
			..Default::default()
		}
	}

	fn field(config: FieldConfig, w: f64, h: f64) -> NeuralField {
		NeuralField::new(config, w, h, SmallRng::seed_from_u64(7))
	}

	/// Two motionless nodes `distance` apart on a surface that holds exactly two.
	fn pair(distance: f64) -> NeuralField {
		let mut f = field(quiet(), 500.0, 100.0);
		f.nodes.truncate(0);
		for x in [100.0, 100.0 + distance] {
			f.nodes.push(Node {
				x,
				y: 50.0,
				..Default::default()
			});
		}
		f.build_edges();
		f
	}

	#[test]
	fn node_count_follows_area() {
		assert_eq!(node_count(500.0, 500.0, 25_000.0), 10);
		assert_eq!(node_count(1920.0, 1080.0, 25_000.0), 82);
		assert_eq!(node_count(0.0, 1080.0, 25_000.0), 0);
		assert_eq!(node_count(1920.0, 0.0, 25_000.0), 0);
		assert_eq!(field(quiet(), 500.0, 500.0).nodes().len(), 10);
	}

	#[test]
	fn degenerate_surface_is_empty_and_ticks() {
		let mut f = field(FieldConfig::default(), 0.0, 0.0);
		for _ in 0..10 {
			f.tick();
		}
		assert!(f.nodes().is_empty());
		assert!(f.edges().is_empty());
		assert!(f.signals().is_empty());
	}

	#[test]
	fn edges_respect_threshold() {
		let f = field(quiet(), 800.0, 600.0);
		for (i, a) in f.nodes().iter().enumerate() {
			for (j, b) in f.nodes().iter().enumerate().skip(i + 1) {
				let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
				let linked = f.edges().iter().any(|e| e.a == i && e.b == j);
				assert_eq!(linked, d < 120.0);
			}
		}
		for (idx, edge) in f.edges().iter().enumerate() {
			let strength = edge.strength(120.0);
			assert!(strength > 0.0 && strength <= 1.0);
			assert!((strength - (1.0 - edge.distance / 120.0)).abs() < 1e-12);
			assert!(f.nodes()[edge.a].edges.contains(&idx));
			assert!(f.nodes()[edge.b].edges.contains(&idx));
		}
	}

	#[test]
	fn exact_threshold_distance_is_not_linked() {
		assert!(pair(120.0).edges().is_empty());
		let close = pair(60.0);
		assert_eq!(close.edges().len(), 1);
		assert!((close.edges()[0].strength(120.0) - 0.5).abs() < 1e-12);
	}

	#[test]
	fn nodes_stay_in_bounds() {
		let mut f = field(
			FieldConfig {
				velocity_spread: 40.0,
				..quiet()
			},
			300.0,
			200.0,
		);
		for _ in 0..500 {
			f.tick();
			for n in f.nodes() {
				assert!((0.0..=300.0).contains(&n.x));
				assert!((0.0..=200.0).contains(&n.y));
			}
		}
	}

	#[test]
	fn bounce_flips_velocity_once() {
		let mut f = field(quiet(), 500.0, 500.0);
		f.nodes[0].x = 499.0;
		f.nodes[0].vx = 2.0;
		f.nodes[0].y = 250.0;
		f.nodes[0].vy = 0.0;
		f.tick();
		assert_eq!(f.nodes()[0].vx, -2.0);
		assert_eq!(f.nodes()[0].x, 500.0);
		assert_eq!(f.nodes()[0].vy, 0.0);
		f.tick();
		assert_eq!(f.nodes()[0].vx, -2.0);
		assert_eq!(f.nodes()[0].x, 498.0);
	}

	#[test]
	fn bounce_flips_vertical_velocity_once() {
		let mut f = field(quiet(), 500.0, 500.0);
		f.nodes[0].x = 250.0;
		f.nodes[0].vx = 0.0;
		f.nodes[0].y = 0.5;
		f.nodes[0].vy = -2.0;
		f.tick();
		assert_eq!(f.nodes()[0].vy, 2.0);
		assert_eq!(f.nodes()[0].y, 0.0);
		assert_eq!(f.nodes()[0].vx, 0.0);
		f.tick();
		assert_eq!(f.nodes()[0].vy, 2.0);
		assert_eq!(f.nodes()[0].y, 2.0);
	}

	#[test]
	fn node_energy_tracks_pulse() {
		let mut f = field(quiet(), 500.0, 500.0);
		f.tick();
		for n in f.nodes() {
			let expected = 0.2 + 0.3 * (n.pulse_phase.sin() * 0.5 + 0.5);
			assert!((n.energy - expected).abs() < 1e-12);
			assert!((0.2..=0.5).contains(&n.energy));
		}
	}

	#[test]
	fn signal_arrives_after_two_ticks_at_half_speed() {
		let mut f = pair(60.0);
		f.signals.push(Signal::new(0, 0.5, 0.6, "#26c6da"));
		f.tick();
		assert_eq!(f.signals()[0].target, Some(1));
		assert_eq!(f.signals()[0].progress, 0.5);
		f.tick();
		let s = &f.signals()[0];
		assert_eq!(s.current, 1);
		assert_eq!(s.target, None);
		assert!((s.energy - 0.54).abs() < 1e-12);
	}

	#[test]
	fn signal_energy_decays_per_hop_until_removed() {
		let mut f = pair(60.0);
		f.signals.push(Signal::new(0, 1.0, 0.5, "#ffd700"));
		let mut hops = 0;
		while !f.signals().is_empty() {
			f.tick();
			hops += 1;
			let expected = 0.5 * 0.9f64.powi(hops);
			if expected < 0.1 {
				assert!(f.signals().is_empty());
			} else {
				assert!((f.signals()[0].energy - expected).abs() < 1e-12);
			}
		}
		// 0.5 * 0.9^k < 0.1 first at k = 16
		assert_eq!(hops, 16);
	}

	#[test]
	fn isolated_signal_is_dropped() {
		let mut f = pair(300.0);
		f.signals.push(Signal::new(0, 0.01, 0.6, "#64b5f6"));
		f.tick();
		assert!(f.signals().is_empty());
	}

	#[test]
	fn removal_preserves_order() {
		let mut f = pair(60.0);
		f.nodes.push(Node {
			x: 400.0,
			y: 50.0,
			..Default::default()
		});
		f.signals.push(Signal::new(0, 0.1, 0.6, "a"));
		f.signals.push(Signal::new(2, 0.1, 0.6, "b"));
		f.signals.push(Signal::new(1, 0.1, 0.6, "c"));
		f.tick();
		let colors: Vec<_> = f.signals().iter().map(|s| s.color).collect();
		assert_eq!(colors, ["a", "c"]);
	}

	#[test]
	fn departing_signal_lights_edge() {
		let mut f = pair(60.0);
		f.signals.push(Signal::new(0, 0.1, 0.6, "#26c6da"));
		f.tick();
		assert_eq!(f.edges()[0].energy, 0.6);
		f.tick();
		assert!(f.edges()[0].energy < 0.6);
	}

	#[test]
	fn signal_position_interpolates() {
		let mut f = pair(100.0);
		f.signals.push(Signal::new(0, 0.25, 0.6, "#26c6da"));
		f.tick();
		let s = f.signals()[0].clone();
		assert_eq!(f.signal_position(&s), Some((125.0, 50.0)));
	}

	#[test]
	fn spawning_anchors_signals_to_nodes() {
		let mut f = field(
			FieldConfig {
				spawn_chance: 1.0,
				..Default::default()
			},
			500.0,
			500.0,
		);
		f.update_nodes();
		assert_eq!(f.signals().len(), f.nodes().len());
		for (i, s) in f.signals().iter().enumerate() {
			assert_eq!(s.current, i);
			assert!((0.005..0.015).contains(&s.speed));
			assert!((0.3..0.7).contains(&s.energy));
			assert!(SIGNAL_PALETTE.contains(&s.color));
		}
	}

	#[test]
	fn signal_colors_come_from_palette() {
		let mut f = field(
			FieldConfig {
				spawn_chance: 1.0,
				..Default::default()
			},
			1000.0,
			1000.0,
		);
		f.update_nodes();
		let mut seen: Vec<_> = f.signals().iter().map(|s| s.color).collect();
		seen.sort_unstable();
		seen.dedup();
		assert!(seen.len() > 1);
		assert!(seen.iter().all(|c| SIGNAL_PALETTE.contains(c)));

		let mut bare = field(
			FieldConfig {
				spawn_chance: 1.0,
				palette: &[],
				..Default::default()
			},
			500.0,
			500.0,
		);
		bare.update_nodes();
		assert!(bare.signals().iter().all(|s| s.color == "#ffffff"));
	}

	#[test]
	fn resize_rebuilds_everything() {
		let mut f = field(
			FieldConfig {
				spawn_chance: 1.0,
				..Default::default()
			},
			500.0,
			500.0,
		);
		f.tick();
		f.resize(1000.0, 500.0);
		assert_eq!(f.nodes().len(), 20);
		assert!(f.signals().is_empty());
		assert!(f.edges().iter().all(|e| e.a < 20 && e.b < 20));
	}
}
