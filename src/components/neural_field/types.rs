use std::fmt;

/// A point of the field. `edges` holds indices into the field's edge list.
#[derive(Clone, Debug, Default)]
pub struct Node {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub energy: f64,
	pub pulse_phase: f64,
	pub edges: Vec<usize>,
}

/// Proximity link between nodes `a` and `b`, fixed at build time.
#[derive(Clone, Debug, Default)]
pub struct Edge {
	pub a: usize,
	pub b: usize,
	pub distance: f64,
	/// Glow left behind by the last signal that departed along this edge.
	pub energy: f64,
}

impl Edge {
	/// `1 - distance / link_distance`; in (0, 1] for any built edge.
	pub fn strength(&self, link_distance: f64) -> f64 {
		1.0 - self.distance / link_distance
	}

	/// The endpoint across from `node`.
	pub fn other(&self, node: usize) -> usize {
		if self.a == node { self.b } else { self.a }
	}
}

/// A token hopping between nodes along edges.
#[derive(Clone, Debug)]
pub struct Signal {
	pub current: usize,
	pub target: Option<usize>,
	pub progress: f64,
	pub speed: f64,
	pub energy: f64,
	pub color: &'static str,
}

impl Signal {
	pub fn new(current: usize, speed: f64, energy: f64, color: &'static str) -> Self {
		Self {
			current,
			target: None,
			progress: 0.0,
			speed,
			energy,
			color,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Rgba {
	pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}
}

impl fmt::Display for Rgba {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rgba_formats_as_css() {
		let c = Rgba::new(38, 198, 218, 1.0).with_alpha(0.15);
		assert_eq!(c.to_string(), "rgba(38, 198, 218, 0.15)");
	}

	#[test]
	fn strength_falls_off_with_distance() {
		let edge = Edge {
			distance: 30.0,
			..Default::default()
		};
		assert_eq!(edge.strength(120.0), 0.75);
	}

	#[test]
	fn edge_other_endpoint() {
		let edge = Edge {
			a: 2,
			b: 7,
			..Default::default()
		};
		assert_eq!(edge.other(2), 7);
		assert_eq!(edge.other(7), 2);
	}
}
