use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::PathwayState;
use super::types::Diagram;
use crate::config::RenderConfig;
use crate::selection::Selection;

struct Surface {
	state: PathwayState,
	ctx: CanvasRenderingContext2d,
}

impl Surface {
	fn redraw(&self) {
		render::render(&self.state, &self.ctx);
	}

	fn set_cursor(&self, canvas: &web_sys::HtmlElement) {
		let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", self.state.cursor());
	}
}

fn canvas_size(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(1000.0)
		}),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Interactive pathway diagram painted onto a canvas.
///
/// Repaints whenever `selection` changes. A click on a node reports its id
/// through `on_select`; dragging pans and the wheel zooms.
#[component]
pub fn PathwayCanvas(
	/// Diagram to draw.
	diagram: Arc<Diagram>,
	/// Node to highlight.
	#[prop(into)]
	selection: Signal<Selection>,
	/// Called with the id of a clicked node.
	#[prop(into)]
	on_select: Callback<String>,
	/// Connector mode, background and zoom limits.
	#[prop(optional)]
	config: RenderConfig,
	/// Fixed canvas width; defaults to the parent's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed canvas height; defaults to the parent's height.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let surface: Rc<RefCell<Option<Surface>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (surface_init, resize_cb_init) = (surface.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = canvas_size(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = context_2d(&canvas) else {
			warn!("canvas 2d context unavailable; diagram not drawn");
			return;
		};
		let mut state = PathwayState::new(diagram.clone(), config.clone(), w, h);
		state.selection = selection.get_untracked();
		let initial = Surface { state, ctx };
		initial.redraw();
		*surface_init.borrow_mut() = Some(initial);

		let (surface_resize, canvas_resize) = (surface_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = canvas_size(&canvas_resize, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *surface_resize.borrow_mut() {
				s.state.resize(nw, nh);
				s.redraw();
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	});

	let surface_sel = surface.clone();
	Effect::new(move |_| {
		let current = selection.get();
		if let Some(ref mut s) = *surface_sel.borrow_mut() {
			s.state.selection = current;
			s.redraw();
		}
	});

	let pointer = move |ev: &MouseEvent| {
		let canvas = canvas_ref.get()?;
		let rect = canvas.get_bounding_client_rect();
		Some((
			canvas,
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let surface_md = surface.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((canvas, x, y)) = pointer(&ev) else {
			return;
		};
		if let Some(ref mut s) = *surface_md.borrow_mut() {
			s.state.press(x, y);
			s.set_cursor(&canvas);
		}
	};

	let surface_mm = surface.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((canvas, x, y)) = pointer(&ev) else {
			return;
		};
		if let Some(ref mut s) = *surface_mm.borrow_mut() {
			if !s.state.pan.active {
				s.state.set_hover(x, y);
			}
			if s.state.drag_to(x, y) {
				s.redraw();
			}
			s.set_cursor(&canvas);
		}
	};

	let surface_mu = surface.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((canvas, x, y)) = pointer(&ev) else {
			return;
		};
		let picked = match *surface_mu.borrow_mut() {
			Some(ref mut s) => {
				let picked = s.state.release(x, y);
				s.set_cursor(&canvas);
				picked
			}
			None => None,
		};
		if let Some(id) = picked {
			info!("selected {id}");
			on_select.run(id);
		}
	};

	let surface_ml = surface.clone();
	let on_mouseleave = move |ev: MouseEvent| {
		let Some((canvas, _, _)) = pointer(&ev) else {
			return;
		};
		if let Some(ref mut s) = *surface_ml.borrow_mut() {
			s.state.cancel_gesture();
			s.set_cursor(&canvas);
		}
	};

	let surface_wh = surface.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let mouse: &MouseEvent = &ev;
		let Some((_, x, y)) = pointer(mouse) else {
			return;
		};
		if let Some(ref mut s) = *surface_wh.borrow_mut() {
			s.state.zoom_at(x, y, ev.delta_y());
			s.redraw();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="pathway-canvas"
			aria-label="Interactive pathway diagram"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; width: 100%; height: 100%; cursor: grab;"
		/>
	}
}
