//! Category key shown under the diagram.

use leptos::either::Either;
use leptos::prelude::*;

use super::pathway::{Category, ColorToken};

/// Sample drawn beside a legend label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swatch {
	/// Filled square in a category's color.
	Fill(ColorToken),
	/// Line sample for an edge style rather than a node category.
	Line(ColorToken),
}

/// One row of the legend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
	/// Text beside the swatch.
	pub label: String,
	/// Sample drawn before the label.
	pub swatch: Swatch,
}

impl LegendEntry {
	/// Accessible name of the row.
	pub fn aria_label(&self) -> String {
		format!("Legend item: {}", self.label)
	}
}

/// Label of the feedback-edge sample.
pub const FEEDBACK_LABEL: &str = "Feedback Loop";

/// One entry per category, in table order, then the feedback-edge sample.
pub fn entries(categories: &[Category]) -> Vec<LegendEntry> {
	categories
		.iter()
		.map(|c| LegendEntry {
			label: c.display_name.clone(),
			swatch: Swatch::Fill(c.fill),
		})
		.chain(std::iter::once(LegendEntry {
			label: FEEDBACK_LABEL.into(),
			swatch: Swatch::Line(ColorToken::Orange500),
		}))
		.collect()
}

/// Category key plus the feedback-loop line sample.
#[component]
pub fn Legend(
	/// Categories in legend order.
	categories: Vec<Category>,
) -> impl IntoView {
	let items = entries(&categories)
		.into_iter()
		.map(|entry| {
			let swatch = match entry.swatch {
				Swatch::Fill(color) => Either::Left(view! {
					<span
						class="legend-swatch"
						style=format!("background-color: {};", color.css())
					></span>
				}),
				Swatch::Line(color) => Either::Right(view! {
					<svg width="24" height="16" viewBox="0 0 24 16" class="legend-line">
						<path d="M 4 8 C 12 0, 12 16, 20 8" stroke=color.css() stroke-width="2" fill="none" />
					</svg>
				}),
			};
			let aria = entry.aria_label();
			view! {
				<div class="legend-item" aria-label=aria>
					{swatch}
					<span class="legend-label">{entry.label}</span>
				</div>
			}
		})
		.collect_view();

	view! {
		<div class="legend">
			<h3>"Legend"</h3>
			<div class="legend-items">{items}</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::pathway::CategoryId;
	use pretty_assertions::assert_eq;

	#[test]
	fn categories_then_feedback_sample() {
		let categories = vec![Category {
			id: CategoryId::Factors,
			display_name: "Risk Factors".into(),
			fill: ColorToken::Orange200,
			text: ColorToken::Slate800,
		}];
		assert_eq!(
			entries(&categories),
			vec![
				LegendEntry {
					label: "Risk Factors".into(),
					swatch: Swatch::Fill(ColorToken::Orange200),
				},
				LegendEntry {
					label: FEEDBACK_LABEL.into(),
					swatch: Swatch::Line(ColorToken::Orange500),
				},
			]
		);
	}

	#[test]
	fn aria_label_names_the_entry() {
		let entry = LegendEntry {
			label: FEEDBACK_LABEL.into(),
			swatch: Swatch::Line(ColorToken::Orange500),
		};
		assert_eq!(entry.aria_label(), "Legend item: Feedback Loop");
	}
}
