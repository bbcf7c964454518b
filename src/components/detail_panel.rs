//! Side panel describing the selected node.

use std::sync::Arc;

use leptos::either::Either;
use leptos::prelude::*;

use super::pathway::{Diagram, Intervention, Node};
use crate::selection::Selection;

/// Heading shown while nothing is selected.
pub const PLACEHOLDER_TITLE: &str = "Select a Step";
/// Prompt under [`PLACEHOLDER_TITLE`].
pub const PLACEHOLDER_PROMPT: &str = "Click on any element in the diagram to view a detailed explanation and related treatment strategies.";

/// A piece of explanation text, bold when it was wrapped in `**`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
	/// Text with the `**` markers removed.
	pub text: String,
	/// Whether the run was wrapped in `**`.
	pub bold: bool,
}

/// Lines of one paragraph. Single line breaks inside a paragraph are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paragraph {
	/// One entry per source line, each split into runs.
	pub lines: Vec<Vec<Run>>,
}

/// What the detail panel shows.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelContent {
	/// Nothing selected, or the selected id is unknown.
	Placeholder,
	/// The selected node's explanation and interventions.
	Details {
		/// Label lines joined into one heading.
		header: String,
		/// Explanation split on blank lines.
		paragraphs: Vec<Paragraph>,
		/// `None` when the node lists no such interventions.
		pharmacological: Option<Vec<Intervention>>,
		/// As above, for non-pharmacological interventions.
		non_pharmacological: Option<Vec<Intervention>>,
	},
}

impl PanelContent {
	/// Content for `node`, or the placeholder when there is none.
	pub fn for_node(node: Option<&Node>) -> Self {
		let Some(node) = node else {
			return PanelContent::Placeholder;
		};

		let non_empty = |items: &Vec<Intervention>| (!items.is_empty()).then(|| items.clone());
		let (pharmacological, non_pharmacological) = match &node.interventions {
			Some(i) => (non_empty(&i.pharmacological), non_empty(&i.non_pharmacological)),
			None => (None, None),
		};

		PanelContent::Details {
			header: node.label.join(" "),
			paragraphs: paragraphs(&node.explanation),
			pharmacological,
			non_pharmacological,
		}
	}
}

/// Splits on blank lines; each remaining line is parsed for bold runs.
pub fn paragraphs(text: &str) -> Vec<Paragraph> {
	text.split("\n\n")
		.map(|p| p.trim_matches('\n'))
		.filter(|p| !p.is_empty())
		.map(|p| Paragraph {
			lines: p.lines().map(emphasis_runs).collect(),
		})
		.collect()
}

/// Splits a line on `**` markers. An unmatched trailing marker is literal.
pub fn emphasis_runs(line: &str) -> Vec<Run> {
	let mut parts: Vec<String> = line.split("**").map(str::to_string).collect();
	if parts.len() % 2 == 0 {
		let tail = parts.pop().unwrap_or_default();
		if let Some(last) = parts.last_mut() {
			last.push_str("**");
			last.push_str(&tail);
		}
	}
	parts
		.into_iter()
		.enumerate()
		.filter(|(_, text)| !text.is_empty())
		.map(|(i, text)| Run { text, bold: i % 2 == 1 })
		.collect()
}

fn paragraph_view(paragraph: Paragraph) -> impl IntoView {
	let lines = paragraph
		.lines
		.into_iter()
		.enumerate()
		.map(|(i, runs)| {
			view! {
				{(i > 0).then(|| view! { <br /> })}
				{runs.into_iter().map(run_view).collect_view()}
			}
		})
		.collect_view();
	view! { <p>{lines}</p> }
}

fn run_view(run: Run) -> impl IntoView {
	if run.bold {
		Either::Left(view! { <strong>{run.text}</strong> })
	} else {
		Either::Right(run.text)
	}
}

fn intervention_section(
	title: &'static str,
	class: &'static str,
	items: Vec<Intervention>,
) -> impl IntoView {
	view! {
		<section class=format!("intervention-section {class}")>
			<h3>{title}</h3>
			<div class="intervention-cards">
				{items
					.into_iter()
					.map(|item| {
						view! {
							<div class="intervention-card">
								<h4>{item.title}</h4>
								<p>{item.description}</p>
							</div>
						}
					})
					.collect_view()}
			</div>
		</section>
	}
}

/// Explanation and treatment cards for the selected node, or a prompt when
/// nothing is selected.
#[component]
pub fn DetailPanel(
	/// Diagram the selection refers to.
	diagram: Arc<Diagram>,
	/// Node to describe.
	#[prop(into)]
	selection: Signal<Selection>,
) -> impl IntoView {
	move || {
		let content =
			selection.with(|s| PanelContent::for_node(s.id().and_then(|id| diagram.node(id))));
		match content {
			PanelContent::Placeholder => view! {
				<div class="panel-placeholder">
					<h3>{PLACEHOLDER_TITLE}</h3>
					<p>{PLACEHOLDER_PROMPT}</p>
				</div>
			}
			.into_any(),
			PanelContent::Details {
				header,
				paragraphs,
				pharmacological,
				non_pharmacological,
			} => view! {
				<div class="panel-details">
					<h2 class="panel-header">{header}</h2>
					<div class="panel-explanation">
						{paragraphs.into_iter().map(paragraph_view).collect_view()}
					</div>
					{pharmacological
						.map(|items| {
							intervention_section("Pharmacological Interventions", "pharm", items)
						})}
					{non_pharmacological
						.map(|items| {
							intervention_section("Non-Pharmacological & Lifestyle", "non-pharm", items)
						})}
				</div>
			}
			.into_any(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::pathway::geometry::Rect;
	use crate::components::pathway::{CategoryId, Interventions};
	use pretty_assertions::assert_eq;

	fn node(explanation: &str, interventions: Option<Interventions>) -> Node {
		Node {
			id: "n".into(),
			rect: Rect::new(0.0, 0.0, 10.0, 10.0),
			category: CategoryId::Process,
			label: vec!["Clinical Syndrome of".into(), "Heart Failure".into()],
			examples: Vec::new(),
			explanation: explanation.into(),
			interventions,
		}
	}

	fn plain(text: &str) -> Run {
		Run {
			text: text.into(),
			bold: false,
		}
	}

	fn bold(text: &str) -> Run {
		Run {
			text: text.into(),
			bold: true,
		}
	}

	#[test]
	fn nothing_selected_shows_placeholder() {
		assert_eq!(PanelContent::for_node(None), PanelContent::Placeholder);
	}

	#[test]
	fn node_without_interventions_has_explanation_only() {
		let content = PanelContent::for_node(Some(&node("Just text.", None)));
		assert_eq!(
			content,
			PanelContent::Details {
				header: "Clinical Syndrome of Heart Failure".into(),
				paragraphs: vec![Paragraph {
					lines: vec![vec![plain("Just text.")]]
				}],
				pharmacological: None,
				non_pharmacological: None,
			}
		);
	}

	#[test]
	fn empty_intervention_list_is_omitted() {
		let interventions = Interventions {
			pharmacological: vec![Intervention {
				title: "Diuretics".into(),
				description: "Remove excess fluid.".into(),
			}],
			non_pharmacological: Vec::new(),
		};
		let PanelContent::Details {
			pharmacological,
			non_pharmacological,
			..
		} = PanelContent::for_node(Some(&node("x", Some(interventions))))
		else {
			panic!("expected details");
		};
		assert_eq!(pharmacological.map(|v| v.len()), Some(1));
		assert_eq!(non_pharmacological, None);
	}

	#[test]
	fn paragraphs_keep_line_breaks() {
		let parsed = paragraphs("First para.\n\n**1. Step:**\n• item one\n• item two\n");
		assert_eq!(parsed.len(), 2);
		assert_eq!(
			parsed[1].lines,
			vec![
				vec![bold("1. Step:")],
				vec![plain("• item one")],
				vec![plain("• item two")],
			]
		);
	}

	#[test]
	fn emphasis_marks_bold_runs() {
		assert_eq!(
			emphasis_runs("targeted by **Beta-blocker** medications"),
			vec![plain("targeted by "), bold("Beta-blocker"), plain(" medications")]
		);
		assert_eq!(emphasis_runs("dangling ** marker"), vec![plain("dangling ** marker")]);
	}
}
