use std::sync::Arc;

use leptos::prelude::*;
use log::warn;

use crate::components::detail_panel::DetailPanel;
use crate::components::export::ExportButton;
use crate::components::legend::Legend;
use crate::components::pathway::{Diagram, PathwayCanvas};
use crate::config::RenderConfig;
use crate::data::heart_failure::{self, DEFAULT_SELECTION};
use crate::selection::Selection;

fn load_diagram() -> Arc<Diagram> {
	let diagram = heart_failure::diagram();
	for issue in diagram.validate() {
		warn!("diagram: {issue}");
	}
	Arc::new(diagram)
}

/// Pathway page: diagram and legend on the left, details on the right.
#[component]
pub fn Home() -> impl IntoView {
	let diagram = load_diagram();
	let selection = RwSignal::new(Selection::of(DEFAULT_SELECTION));
	let render = RenderConfig::default();
	let categories = diagram.categories.clone();

	let on_select = Callback::new(move |id: String| {
		// No notification when the node is already selected.
		selection.maybe_update(|s| s.select(&id));
	});

	view! {
		<div class="page">
			<header class="page-header">
				<h1>"Pathophysiology of Heart Failure"</h1>
				<p class="subtitle">
					"A detailed, interactive guide to the mechanisms and treatments."
				</p>
			</header>

			<main class="layout">
				<section class="card diagram-card">
					<div class="card-header">
						<h2>"Interactive Pathway"</h2>
						<ExportButton
							diagram=diagram.clone()
							selection=selection
							render=render.clone()
						/>
					</div>
					<div class="diagram-frame">
						<PathwayCanvas
							diagram=diagram.clone()
							selection=selection
							on_select=on_select
							config=render
						/>
					</div>
					<Legend categories=categories />
				</section>

				<aside class="card detail-card">
					<DetailPanel diagram=diagram selection=selection />
				</aside>
			</main>

			<footer class="page-footer">
				<p>
					"This diagram is a detailed representation for educational purposes. \
					Clinical decision-making requires consultation with qualified healthcare \
					professionals."
				</p>
			</footer>
		</div>
	}
}
