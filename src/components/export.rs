//! PNG download of the diagram.
//!
//! Export clears the selection so the highlight is not captured, waits for
//! that frame to settle, rasterizes the scene at the configured scale onto a
//! padded background and hands the result to the browser as a download. The
//! selection is restored whether or not that worked.

use std::sync::Arc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlAnchorElement, HtmlCanvasElement};

use super::pathway::{Diagram, paint};
use super::pathway::scene::Scene;
use crate::config::{ExportConfig, RenderConfig};
use crate::error::{ExportError, ExportResult};
use crate::selection::Selection;

/// Allows one export at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportGate {
	in_flight: bool,
}

/// Proof that an export started; carries the selection to put back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportTicket {
	snapshot: Option<String>,
}

impl ExportGate {
	/// Whether an export is in flight.
	pub fn is_busy(&self) -> bool {
		self.in_flight
	}

	/// Starts an export unless one is already running, clearing the selection.
	pub fn begin(&mut self, selection: &mut Selection) -> Option<ExportTicket> {
		if self.in_flight {
			return None;
		}
		self.in_flight = true;
		Some(ExportTicket {
			snapshot: selection.clear(),
		})
	}

	/// Ends the export and restores the selection captured by `begin`.
	pub fn finish(&mut self, ticket: ExportTicket, selection: &mut Selection) {
		selection.restore(ticket.snapshot);
		self.in_flight = false;
	}
}

fn describe(err: JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn offscreen_canvas(document: &Document, width: u32, height: u32) -> ExportResult<HtmlCanvasElement> {
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")
		.map_err(|e| ExportError::Canvas(describe(e)))?
		.dyn_into()
		.map_err(|_| ExportError::Canvas("element is not a canvas".into()))?;
	canvas.set_width(width);
	canvas.set_height(height);
	Ok(canvas)
}

fn context_2d(canvas: &HtmlCanvasElement) -> ExportResult<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.map_err(|e| ExportError::Context(describe(e)))?
		.ok_or_else(|| ExportError::Context("no 2d context".into()))?
		.dyn_into()
		.map_err(|_| ExportError::Context("unexpected context type".into()))
}

/// Paints `scene` at `config.scale` and composites it onto a padded
/// background. Returns a PNG data URL.
fn rasterize(document: &Document, scene: &Scene, config: &ExportConfig) -> ExportResult<String> {
	let raster = offscreen_canvas(
		document,
		(scene.width * config.scale).ceil() as u32,
		(scene.height * config.scale).ceil() as u32,
	)?;
	let ctx = context_2d(&raster)?;
	ctx.scale(config.scale, config.scale)
		.map_err(|e| ExportError::Context(describe(e)))?;
	paint(scene, &ctx);

	let (w, h) = config.output_size(scene.width, scene.height);
	let padded = offscreen_canvas(document, w, h)?;
	let out = context_2d(&padded)?;
	out.set_fill_style_str(&config.background);
	out.fill_rect(0.0, 0.0, w as f64, h as f64);
	let inset = config.padding * config.scale;
	out.draw_image_with_html_canvas_element(&raster, inset, inset)
		.map_err(|e| ExportError::Encode(describe(e)))?;

	padded
		.to_data_url_with_type("image/png")
		.map_err(|e| ExportError::Encode(describe(e)))
}

fn download(document: &Document, url: &str, file_name: &str) -> ExportResult<()> {
	let anchor: HtmlAnchorElement = document
		.create_element("a")
		.map_err(|e| ExportError::Download(describe(e)))?
		.dyn_into()
		.map_err(|_| ExportError::Download("element is not an anchor".into()))?;
	anchor.set_href(url);
	anchor.set_download(file_name);
	anchor.click();
	Ok(())
}

/// Scene captured by an export. Always drawn unselected, whatever was
/// clicked while the capture was pending.
fn export_scene(diagram: &Diagram, render: &RenderConfig) -> Scene {
	Scene::build(diagram, &Selection::default(), render.connector)
}

fn export_png(diagram: &Diagram, render: &RenderConfig, config: &ExportConfig) -> ExportResult<()> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| ExportError::Canvas("no document".into()))?;
	let url = rasterize(&document, &export_scene(diagram, render), config)?;
	download(&document, &url, &config.file_name)
}

fn report(err: &ExportError) {
	error!("export failed: {err}");
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(&format!("Failed to download image: {err}"));
	}
}

/// Button that downloads the diagram as a PNG.
#[component]
pub fn ExportButton(
	/// Diagram to rasterize.
	diagram: Arc<Diagram>,
	/// Cleared for the capture and restored afterwards.
	selection: RwSignal<Selection>,
	/// Connector mode used for the image.
	#[prop(optional)]
	render: RenderConfig,
	/// File name, scale, padding and settle delay.
	#[prop(optional)]
	config: ExportConfig,
) -> impl IntoView {
	let gate = RwSignal::new(ExportGate::default());

	let finish = move |ticket: ExportTicket| {
		selection.update(|sel| gate.update(|g| g.finish(ticket, sel)));
	};

	let on_click = move |_| {
		if gate.get_untracked().is_busy() {
			return;
		}
		let mut ticket = None;
		selection.update(|sel| gate.update(|g| ticket = g.begin(sel)));
		let Some(ticket) = ticket else {
			return;
		};
		info!("exporting {}", config.file_name);

		let Some(window) = web_sys::window() else {
			finish(ticket);
			return;
		};
		let settle = config.settle_ms;
		let (diagram, render, config) = (diagram.clone(), render.clone(), config.clone());
		let held = ticket.clone();
		let capture = Closure::once_into_js(move || {
			if let Err(err) = export_png(&diagram, &render, &config) {
				report(&err);
			}
			finish(held);
		});
		if let Err(e) =
			window.set_timeout_with_callback_and_timeout_and_arguments_0(capture.unchecked_ref(), settle)
		{
			report(&ExportError::Canvas(describe(e)));
			finish(ticket);
		}
	};

	view! {
		<button
			class="export-button"
			on:click=on_click
			disabled=move || gate.get().is_busy()
		>
			{move || if gate.get().is_busy() { "Exporting…" } else { "Download PNG" }}
		</button>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::heart_failure;

	#[test]
	fn export_clears_then_restores_selection() {
		let mut gate = ExportGate::default();
		let mut sel = Selection::of("decreased-co");

		let ticket = gate.begin(&mut sel).unwrap();
		assert!(gate.is_busy());
		assert_eq!(sel.id(), None);

		gate.finish(ticket, &mut sel);
		assert!(!gate.is_busy());
		assert_eq!(sel.id(), Some("decreased-co"));
	}

	#[test]
	fn second_request_while_busy_is_ignored() {
		let mut gate = ExportGate::default();
		let mut sel = Selection::of("a");
		let ticket = gate.begin(&mut sel).unwrap();

		// Whatever the user clicks meanwhile must survive the ignored request.
		sel.select("b");
		assert_eq!(gate.begin(&mut sel), None);
		assert_eq!(sel.id(), Some("b"));

		gate.finish(ticket, &mut sel);
		assert_eq!(sel.id(), Some("a"));
	}

	#[test]
	fn capture_ignores_clicks_made_while_pending() {
		let diagram = heart_failure::diagram();
		let mut gate = ExportGate::default();
		let mut sel = Selection::of("decreased-co");
		let ticket = gate.begin(&mut sel).unwrap();

		sel.select("raas-activation");
		let scene = export_scene(&diagram, &RenderConfig::default());
		assert!(scene.nodes.iter().all(|n| !n.selected));
		assert_eq!(scene.nodes.len(), diagram.nodes.len());

		gate.finish(ticket, &mut sel);
		assert_eq!(sel.id(), Some("decreased-co"));
	}

	#[test]
	fn export_with_nothing_selected_restores_nothing() {
		let mut gate = ExportGate::default();
		let mut sel = Selection::default();
		let ticket = gate.begin(&mut sel).unwrap();
		gate.finish(ticket, &mut sel);
		assert_eq!(sel, Selection::default());
	}
}
