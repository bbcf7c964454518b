use std::sync::Arc;

use super::geometry::Point;
use super::scene::Scene;
use super::types::Diagram;
use crate::config::RenderConfig;
use crate::selection::Selection;

/// Screen-space margin kept around the fitted diagram.
pub(crate) const FIT_MARGIN: f64 = 16.0;
/// Pointer travel below which a press-release counts as a click.
pub(crate) const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ViewTransform {
	pub(crate) x: f64,
	pub(crate) y: f64,
	pub(crate) k: f64,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct PanState {
	pub(crate) active: bool,
	/// Set once the pointer leaves the click slop; the release is then a pan, not a click.
	pub(crate) moved: bool,
	pub(crate) start_x: f64,
	pub(crate) start_y: f64,
	pub(crate) transform_start_x: f64,
	pub(crate) transform_start_y: f64,
}

pub(crate) struct PathwayState {
	pub(crate) diagram: Arc<Diagram>,
	pub(crate) selection: Selection,
	pub(crate) config: RenderConfig,
	pub(crate) transform: ViewTransform,
	pub(crate) pan: PanState,
	pub(crate) hover: Option<String>,
	pub(crate) width: f64,
	pub(crate) height: f64,
	/// Scale that fits the whole diagram; zoom limits are relative to it.
	fit_k: f64,
}

impl PathwayState {
	pub(crate) fn new(diagram: Arc<Diagram>, config: RenderConfig, width: f64, height: f64) -> Self {
		let mut state = Self {
			diagram,
			selection: Selection::default(),
			config,
			transform: ViewTransform::default(),
			pan: PanState::default(),
			hover: None,
			width,
			height,
			fit_k: 1.0,
		};
		state.fit();
		state
	}

	/// Scales the diagram uniformly into the canvas and centers it.
	pub(crate) fn fit(&mut self) {
		let (dw, dh) = (self.diagram.width, self.diagram.height);
		let avail_w = (self.width - 2.0 * FIT_MARGIN).max(1.0);
		let avail_h = (self.height - 2.0 * FIT_MARGIN).max(1.0);
		let k = (avail_w / dw).min(avail_h / dh);
		self.fit_k = k;
		self.transform = ViewTransform {
			x: (self.width - dw * k) / 2.0,
			y: (self.height - dh * k) / 2.0,
			k,
		};
	}

	pub(crate) fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.fit();
	}

	pub(crate) fn screen_to_graph(&self, sx: f64, sy: f64) -> Point {
		Point::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen position. Nodes paint in order, so the
	/// last one containing the point is the one on top.
	pub(crate) fn node_at_position(&self, sx: f64, sy: f64) -> Option<&str> {
		let p = self.screen_to_graph(sx, sy);
		self.diagram
			.nodes
			.iter()
			.rev()
			.find(|n| n.rect.contains(p))
			.map(|n| n.id.as_str())
	}

	/// Returns whether the hovered node changed.
	pub(crate) fn set_hover(&mut self, sx: f64, sy: f64) -> bool {
		let hovered = self.node_at_position(sx, sy).map(str::to_string);
		if self.hover == hovered {
			return false;
		}
		self.hover = hovered;
		true
	}

	pub(crate) fn press(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	/// Pans while a press is held. Returns whether the view moved.
	pub(crate) fn drag_to(&mut self, sx: f64, sy: f64) -> bool {
		if !self.pan.active {
			return false;
		}
		let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
		if !self.pan.moved && dx.hypot(dy) < CLICK_SLOP {
			return false;
		}
		self.pan.moved = true;
		self.transform.x = self.pan.transform_start_x + dx;
		self.transform.y = self.pan.transform_start_y + dy;
		true
	}

	/// Ends a press. A release that never left the click slop over a node
	/// yields that node's id.
	pub(crate) fn release(&mut self, sx: f64, sy: f64) -> Option<String> {
		let was_click = self.pan.active && !self.pan.moved;
		self.pan = PanState::default();
		if was_click {
			self.node_at_position(sx, sy).map(str::to_string)
		} else {
			None
		}
	}

	pub(crate) fn cancel_gesture(&mut self) {
		self.pan = PanState::default();
		self.hover = None;
	}

	/// Zooms around the pointer, keeping the point under it fixed.
	pub(crate) fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(
			self.fit_k * self.config.min_zoom,
			self.fit_k * self.config.max_zoom,
		);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// CSS cursor for the current gesture.
	pub(crate) fn cursor(&self) -> &'static str {
		if self.pan.moved {
			"grabbing"
		} else if self.hover.is_some() {
			"pointer"
		} else {
			"grab"
		}
	}

	pub(crate) fn scene(&self) -> Scene {
		Scene::build(&self.diagram, &self.selection, self.config.connector)
	}
}
