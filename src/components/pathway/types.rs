//! Diagram data model.

use std::collections::HashSet;

use super::geometry::Rect;
use super::routing::RouteTable;
use crate::error::DiagramIssue;

/// Node category, which decides its colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryId {
	/// Predisposing and precipitating factors.
	Factors,
	/// Pathophysiological steps.
	Process,
	/// Clinical signs and symptoms.
	SignsSymptoms,
	/// Pharmacological management.
	Management,
	/// Non-pharmacological management.
	NonPharmManagement,
	/// Goals of therapy.
	PositiveOutcomes,
	/// Disease progression.
	NegativeOutcomes,
}

/// Palette entries a category may paint with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorToken {
	/// `#ffffff`
	White,
	/// `#fed7aa`
	Orange200,
	/// `#f97316`
	Orange500,
	/// `#ef4444`
	Red500,
	/// `#fbbf24`
	Amber400,
	/// `#22d3ee`
	Cyan400,
	/// `#a7f3d0`
	Emerald200,
	/// `#cbd5e1`
	Slate300,
	/// `#64748b`
	Slate500,
	/// `#1e293b`
	Slate800,
}

impl ColorToken {
	/// CSS hex color.
	pub fn css(self) -> &'static str {
		match self {
			ColorToken::White => "#ffffff",
			ColorToken::Orange200 => "#fed7aa",
			ColorToken::Orange500 => "#f97316",
			ColorToken::Red500 => "#ef4444",
			ColorToken::Amber400 => "#fbbf24",
			ColorToken::Cyan400 => "#22d3ee",
			ColorToken::Emerald200 => "#a7f3d0",
			ColorToken::Slate300 => "#cbd5e1",
			ColorToken::Slate500 => "#64748b",
			ColorToken::Slate800 => "#1e293b",
		}
	}
}

/// Display name and colors of a category.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
	/// Key nodes refer to.
	pub id: CategoryId,
	/// Name shown in the legend.
	pub display_name: String,
	/// Node fill.
	pub fill: ColorToken,
	/// Node text color.
	pub text: ColorToken,
}

/// One treatment card in the detail panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Intervention {
	/// Card heading.
	pub title: String,
	/// Card body.
	pub description: String,
}

/// Treatments listed for a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interventions {
	/// Drug therapies.
	pub pharmacological: Vec<Intervention>,
	/// Lifestyle and supportive measures.
	pub non_pharmacological: Vec<Intervention>,
}

/// A box in the diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique id that edges refer to.
	pub id: String,
	/// Authored position and size.
	pub rect: Rect,
	/// Category, which decides colors.
	pub category: CategoryId,
	/// Main text, one entry per line.
	pub label: Vec<String>,
	/// Secondary lines drawn under a separator, below the label.
	pub examples: Vec<String>,
	/// Detail panel text. Blank lines split paragraphs and `**` marks bold.
	pub explanation: String,
	/// Treatments shown in the detail panel.
	pub interventions: Option<Interventions>,
}

impl Intervention {
	/// Creates a card.
	pub fn new(title: &str, description: &str) -> Self {
		Self {
			title: title.into(),
			description: description.into(),
		}
	}
}

impl Node {
	/// Node with a label and no examples, explanation or interventions.
	pub fn new(id: &str, rect: Rect, category: CategoryId, label: &[&str]) -> Self {
		Self {
			id: id.into(),
			rect,
			category,
			label: label.iter().map(|l| l.to_string()).collect(),
			examples: Vec::new(),
			explanation: String::new(),
			interventions: None,
		}
	}

	/// Sets the example lines.
	pub fn examples(mut self, lines: &[&str]) -> Self {
		self.examples = lines.iter().map(|l| l.to_string()).collect();
		self
	}

	/// Sets the detail panel text.
	pub fn explanation(mut self, text: &str) -> Self {
		self.explanation = text.into();
		self
	}

	/// Sets the treatments.
	pub fn interventions(
		mut self,
		pharmacological: Vec<Intervention>,
		non_pharmacological: Vec<Intervention>,
	) -> Self {
		self.interventions = Some(Interventions {
			pharmacological,
			non_pharmacological,
		});
		self
	}
}

/// Stroke pattern of an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
	/// Continuous line.
	#[default]
	Solid,
	/// Dashed line.
	Dashed,
}

/// Role of an edge in the pathway.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeKind {
	/// Forward step.
	#[default]
	Primary,
	/// Loop back to an earlier step.
	Feedback,
}

/// Directed connection between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Source node id.
	pub from: String,
	/// Target node id.
	pub to: String,
	/// Stroke pattern.
	pub line_style: LineStyle,
	/// Primary or feedback.
	pub kind: EdgeKind,
}

impl Edge {
	/// Solid primary edge.
	pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
			line_style: LineStyle::default(),
			kind: EdgeKind::default(),
		}
	}

	/// Draws the edge dashed.
	pub fn dashed(mut self) -> Self {
		self.line_style = LineStyle::Dashed;
		self
	}

	/// Marks the edge as a feedback loop.
	pub fn feedback(mut self) -> Self {
		self.kind = EdgeKind::Feedback;
		self
	}
}

/// Immutable diagram: nodes, edges, the category lookup table and the
/// per-pair routing rules. Built once and shared read-only.
#[derive(Clone, Debug)]
pub struct Diagram {
	/// Painted in order, so later nodes are on top.
	pub nodes: Vec<Node>,
	/// Painted beneath the nodes.
	pub edges: Vec<Edge>,
	/// Category lookup table.
	pub categories: Vec<Category>,
	/// Per-pair routing rules.
	pub routes: RouteTable,
	/// Authored drawing area, the equivalent of a fixed viewBox.
	pub width: f64,
	/// Height of the drawing area.
	pub height: f64,
}

impl Diagram {
	/// Node with the given id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Category with the given id.
	pub fn category(&self, id: CategoryId) -> Option<&Category> {
		self.categories.iter().find(|c| c.id == id)
	}

	/// Everything that would make part of the diagram unrenderable. None of
	/// these are fatal; the scene skips the offending element.
	pub fn validate(&self) -> Vec<DiagramIssue> {
		let mut issues = Vec::new();
		let mut seen = HashSet::new();

		for node in &self.nodes {
			if !seen.insert(node.id.as_str()) {
				issues.push(DiagramIssue::DuplicateNode(node.id.clone()));
			}
			if node.rect.width <= 0.0 || node.rect.height <= 0.0 {
				issues.push(DiagramIssue::EmptyBounds(node.id.clone()));
			}
			if node.label.is_empty() {
				issues.push(DiagramIssue::MissingLabel(node.id.clone()));
			}
			if self.category(node.category).is_none() {
				issues.push(DiagramIssue::UnknownCategory {
					node: node.id.clone(),
					category: node.category,
				});
			}
		}

		for edge in &self.edges {
			for end in [&edge.from, &edge.to] {
				if !seen.contains(end.as_str()) {
					issues.push(DiagramIssue::DanglingEdge {
						from: edge.from.clone(),
						to: edge.to.clone(),
						missing: end.clone(),
					});
				}
			}
		}

		for obstacle in self.routes.obstacles() {
			if !seen.contains(obstacle) {
				issues.push(DiagramIssue::UnknownObstacle(obstacle.to_string()));
			}
		}

		issues
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn node(id: &str, category: CategoryId) -> Node {
		Node {
			id: id.into(),
			rect: Rect::new(0.0, 0.0, 100.0, 50.0),
			category,
			label: vec![id.to_uppercase()],
			examples: Vec::new(),
			explanation: String::new(),
			interventions: None,
		}
	}

	fn diagram(nodes: Vec<Node>, edges: Vec<Edge>) -> Diagram {
		Diagram {
			nodes,
			edges,
			categories: vec![Category {
				id: CategoryId::Process,
				display_name: "Process".into(),
				fill: ColorToken::White,
				text: ColorToken::Slate800,
			}],
			routes: RouteTable::default(),
			width: 200.0,
			height: 200.0,
		}
	}

	#[test]
	fn clean_diagram_has_no_issues() {
		let d = diagram(
			vec![node("a", CategoryId::Process), node("b", CategoryId::Process)],
			vec![Edge::new("a", "b")],
		);
		assert!(d.validate().is_empty());
	}

	#[test]
	fn reports_each_problem() {
		let mut bad = node("b", CategoryId::Factors);
		bad.rect.width = 0.0;
		bad.label.clear();
		let d = diagram(
			vec![node("a", CategoryId::Process), node("a", CategoryId::Process), bad],
			vec![Edge::new("a", "ghost")],
		);
		assert_eq!(
			d.validate(),
			vec![
				DiagramIssue::DuplicateNode("a".into()),
				DiagramIssue::EmptyBounds("b".into()),
				DiagramIssue::MissingLabel("b".into()),
				DiagramIssue::UnknownCategory {
					node: "b".into(),
					category: CategoryId::Factors,
				},
				DiagramIssue::DanglingEdge {
					from: "a".into(),
					to: "ghost".into(),
					missing: "ghost".into(),
				},
			]
		);
	}

	#[test]
	fn edge_defaults() {
		let e = Edge::new("a", "b");
		assert_eq!(e.line_style, LineStyle::Solid);
		assert_eq!(e.kind, EdgeKind::Primary);
		let e = e.dashed().feedback();
		assert_eq!(e.line_style, LineStyle::Dashed);
		assert_eq!(e.kind, EdgeKind::Feedback);
	}
}
