use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::{Arrowhead, Point, Rect};
use super::scene::{Connector, EdgeShape, NodeShape, Scene};
use super::state::PathwayState;
use super::text::{Align, LineKind};
use super::types::ColorToken;

const CORNER_RADIUS: f64 = 12.0;
const OUTLINE_WIDTH: f64 = 2.0;
const SELECTED_WIDTH: f64 = 3.0;
const SELECTED_GLOW: &str = "rgba(0, 172, 193, 0.6)";
const RESTING_SHADOW: &str = "rgba(0, 0, 0, 0.1)";
const SEPARATOR_INSET: f64 = 20.0;
const LABEL_FONT: &str = "600 14px sans-serif";
const EXAMPLE_FONT: &str = "italic 13px sans-serif";

/// Repaints the interactive canvas from scratch.
pub fn render(state: &PathwayState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.config.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	paint(&state.scene(), ctx);
	ctx.restore();
}

/// Draws a scene in diagram units: every edge first, then every node.
pub fn paint(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	for edge in &scene.edges {
		draw_edge(edge, ctx);
	}
	for node in &scene.nodes {
		draw_node(node, ctx);
	}
}

fn draw_edge(edge: &EdgeShape, ctx: &CanvasRenderingContext2d) {
	let color = edge.stroke.color.css();
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(edge.stroke.width);
	let dash = match edge.stroke.dash {
		Some([on, off]) => js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&dash);

	// The stroke stops at the arrow's base so it doesn't poke through the tip.
	let base = edge.arrow.map(|a| midpoint(a.left, a.right));
	ctx.begin_path();
	match &edge.connector {
		Connector::Orthogonal(path) => {
			let points = path.points();
			let last = points.len() - 1;
			for (i, p) in points.iter().enumerate() {
				let p = if i == last { base.unwrap_or(*p) } else { *p };
				if i == 0 {
					ctx.move_to(p.x, p.y);
				} else {
					ctx.line_to(p.x, p.y);
				}
			}
		}
		Connector::Curved(curve) => {
			let end = base.unwrap_or(curve.end);
			ctx.move_to(curve.start.x, curve.start.y);
			ctx.quadratic_curve_to(curve.control.x, curve.control.y, end.x, end.y);
		}
	}
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	if let Some(arrow) = edge.arrow {
		draw_arrowhead(&arrow, color, ctx);
	}
}

fn draw_arrowhead(arrow: &Arrowhead, color: &str, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(color);
	ctx.begin_path();
	ctx.move_to(arrow.tip.x, arrow.tip.y);
	ctx.line_to(arrow.left.x, arrow.left.y);
	ctx.line_to(arrow.right.x, arrow.right.y);
	ctx.close_path();
	ctx.fill();
}

fn draw_node(node: &NodeShape, ctx: &CanvasRenderingContext2d) {
	let r = node.rect;

	ctx.save();
	if node.selected {
		ctx.set_shadow_color(SELECTED_GLOW);
		ctx.set_shadow_blur(12.0);
		ctx.set_shadow_offset_y(4.0);
	} else {
		ctx.set_shadow_color(RESTING_SHADOW);
		ctx.set_shadow_blur(4.0);
		ctx.set_shadow_offset_y(2.0);
	}
	rounded_rect(ctx, &r, CORNER_RADIUS);
	ctx.set_fill_style_str(node.fill.css());
	ctx.fill();
	ctx.restore();

	let border = if node.selected {
		Some((ColorToken::Cyan400, SELECTED_WIDTH))
	} else {
		node.outline.map(|c| (c, OUTLINE_WIDTH))
	};
	if let Some((color, width)) = border {
		rounded_rect(ctx, &r, CORNER_RADIUS);
		ctx.set_stroke_style_str(color.css());
		ctx.set_line_width(width);
		ctx.stroke();
	}

	if let Some(y) = node.text.separator_y {
		ctx.begin_path();
		ctx.move_to(r.x + SEPARATOR_INSET, r.y + y);
		ctx.line_to(r.right() - SEPARATOR_INSET, r.y + y);
		ctx.set_stroke_style_str(ColorToken::Slate300.css());
		ctx.set_line_width(1.0);
		ctx.stroke();
	}

	ctx.set_fill_style_str(node.text_color.css());
	for line in &node.text.lines {
		ctx.set_font(match line.kind {
			LineKind::Label => LABEL_FONT,
			LineKind::Example => EXAMPLE_FONT,
		});
		ctx.set_text_align(match line.align {
			Align::Center => "center",
			Align::Start => "left",
		});
		let _ = ctx.fill_text(&line.text, r.x + line.x, r.y + line.baseline);
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, r: &Rect, radius: f64) {
	let radius = radius.min(r.width / 2.0).min(r.height / 2.0);
	ctx.begin_path();
	ctx.move_to(r.x + radius, r.y);
	let _ = ctx.arc_to(r.right(), r.y, r.right(), r.bottom(), radius);
	let _ = ctx.arc_to(r.right(), r.bottom(), r.x, r.bottom(), radius);
	let _ = ctx.arc_to(r.x, r.bottom(), r.x, r.y, radius);
	let _ = ctx.arc_to(r.x, r.y, r.right(), r.y, radius);
	ctx.close_path();
}

fn midpoint(a: Point, b: Point) -> Point {
	Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}
