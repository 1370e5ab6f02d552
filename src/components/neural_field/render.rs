use std::f64::consts::PI;

use rand::Rng;
use web_sys::CanvasRenderingContext2d;

use super::state::NeuralField;

/// The three primitives a frame is made of.
pub trait Painter {
	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str);
	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: &str, width: f64);
	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str);
}

impl Painter for CanvasRenderingContext2d {
	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str) {
		self.set_fill_style_str(color);
		CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: &str, width: f64) {
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str) {
		self.set_fill_style_str(color);
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, 2.0 * PI);
		self.fill();
	}
}

/// Paints one frame. The translucent fill instead of a clear leaves trails.
pub fn render<R: Rng, P: Painter + ?Sized>(field: &NeuralField<R>, painter: &P) {
	painter.fill_rect(
		0.0,
		0.0,
		field.width,
		field.height,
		&field.config.fade.to_string(),
	);
	draw_edges(field, painter);
	draw_nodes(field, painter);
	draw_signals(field, painter);
}

fn draw_edges<R: Rng, P: Painter + ?Sized>(field: &NeuralField<R>, painter: &P) {
	let nodes = field.nodes();
	for edge in field.edges() {
		let (a, b) = (&nodes[edge.a], &nodes[edge.b]);
		let strength = edge.strength(field.config.link_distance);
		let alpha = strength * 0.15 + edge.energy * 0.25;
		let color = field.config.link_color.with_alpha(alpha.min(1.0));
		painter.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			&color.to_string(),
			strength * 0.5,
		);
	}
}

fn draw_nodes<R: Rng, P: Painter + ?Sized>(field: &NeuralField<R>, painter: &P) {
	for node in field.nodes() {
		let (radius, alpha) = (1.0 + node.energy * 2.0, 0.3 + node.energy * 0.4);
		let color = field.config.node_color.with_alpha(alpha);
		painter.fill_circle(node.x, node.y, radius, &color.to_string());
	}
}

fn draw_signals<R: Rng, P: Painter + ?Sized>(field: &NeuralField<R>, painter: &P) {
	for signal in field.signals() {
		// Signals that just arrived are waiting to pick their next edge.
		let Some((x, y)) = field.signal_position(signal) else {
			continue;
		};
		painter.fill_circle(x, y, 1.0 + signal.energy, signal.color);
	}
}
