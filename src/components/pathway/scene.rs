//! Resolves a diagram into drawable primitives.
//!
//! Building the scene is the whole layout pass: it runs on every repaint and
//! is a pure function of the diagram, the selection and the connector mode.
//! Elements whose references do not resolve are left out.

use log::debug;

use super::geometry::{Arrowhead, Polyline, QuadCurve, Rect};
use super::routing;
use super::text::{self, TextBlock};
use super::types::{ColorToken, Diagram, Edge, EdgeKind, LineStyle, Node};
use crate::config::ConnectorMode;
use crate::selection::Selection;

const EDGE_WIDTH: f64 = 2.0;
const DASH_PATTERN: [f64; 2] = [5.0, 5.0];

/// Geometry of one drawn edge.
#[derive(Clone, Debug, PartialEq)]
pub enum Connector {
	/// Axis-aligned polyline.
	Orthogonal(Polyline),
	/// Single quadratic curve.
	Curved(QuadCurve),
}

impl Connector {
	/// Head at the connector's end point.
	pub fn arrowhead(&self) -> Option<Arrowhead> {
		match self {
			Connector::Orthogonal(path) => path.arrowhead(),
			Connector::Curved(curve) => curve.arrowhead(),
		}
	}
}

/// How an edge's line is stroked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStroke {
	/// Line and arrowhead color.
	pub color: ColorToken,
	/// Line width in diagram units.
	pub width: f64,
	/// On/off dash lengths, `None` for a solid line.
	pub dash: Option<[f64; 2]>,
}

impl EdgeStroke {
	/// Feedback edges are orange, primary edges slate. Dashed edges get the dash pattern.
	pub fn for_edge(edge: &Edge) -> Self {
		let color = match edge.kind {
			EdgeKind::Primary => ColorToken::Slate500,
			EdgeKind::Feedback => ColorToken::Orange500,
		};
		let dash = match edge.line_style {
			LineStyle::Solid => None,
			LineStyle::Dashed => Some(DASH_PATTERN),
		};
		Self {
			color,
			width: EDGE_WIDTH,
			dash,
		}
	}
}

/// A resolved edge, ready to paint.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeShape {
	/// Source node id.
	pub from: String,
	/// Target node id.
	pub to: String,
	/// Routed geometry.
	pub connector: Connector,
	/// Stroke style.
	pub stroke: EdgeStroke,
	/// Head at the target end, if the connector has a direction.
	pub arrow: Option<Arrowhead>,
}

/// A resolved node, ready to paint.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeShape {
	/// Node id.
	pub id: String,
	/// Box in diagram units.
	pub rect: Rect,
	/// Fill from the node's category.
	pub fill: ColorToken,
	/// Text color from the node's category.
	pub text_color: ColorToken,
	/// Thin outline for fills that would vanish against the background.
	pub outline: Option<ColorToken>,
	/// Whether to draw the selection highlight.
	pub selected: bool,
	/// Placed label and example lines.
	pub text: TextBlock,
}

/// Everything painted for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	/// Painted first, beneath the nodes.
	pub edges: Vec<EdgeShape>,
	/// Painted over the edges.
	pub nodes: Vec<NodeShape>,
	/// Drawing width in diagram units.
	pub width: f64,
	/// Drawing height in diagram units.
	pub height: f64,
}

impl Scene {
	/// Routes every edge and lays out every node.
	pub fn build(diagram: &Diagram, selection: &Selection, mode: ConnectorMode) -> Self {
		let edges = diagram
			.edges
			.iter()
			.filter_map(|edge| edge_shape(diagram, edge, mode))
			.collect();
		let nodes = diagram
			.nodes
			.iter()
			.filter_map(|node| node_shape(diagram, node, selection))
			.collect();

		Self {
			edges,
			nodes,
			width: diagram.width,
			height: diagram.height,
		}
	}
}

fn edge_shape(diagram: &Diagram, edge: &Edge, mode: ConnectorMode) -> Option<EdgeShape> {
	let (Some(from), Some(to)) = (diagram.node(&edge.from), diagram.node(&edge.to)) else {
		debug!("skipping edge {} -> {}: unknown endpoint", edge.from, edge.to);
		return None;
	};

	let connector = match mode {
		ConnectorMode::Curved if edge.from != edge.to => {
			Connector::Curved(routing::route_curved(&from.rect, &to.rect))
		}
		_ => Connector::Orthogonal(routing::route(edge, from, to, diagram)),
	};

	Some(EdgeShape {
		from: edge.from.clone(),
		to: edge.to.clone(),
		arrow: connector.arrowhead(),
		connector,
		stroke: EdgeStroke::for_edge(edge),
	})
}

fn node_shape(diagram: &Diagram, node: &Node, selection: &Selection) -> Option<NodeShape> {
	let Some(category) = diagram.category(node.category) else {
		debug!("skipping node {}: unknown category {:?}", node.id, node.category);
		return None;
	};

	Some(NodeShape {
		id: node.id.clone(),
		rect: node.rect,
		fill: category.fill,
		text_color: category.text,
		outline: (category.fill == ColorToken::White).then_some(ColorToken::Slate300),
		selected: selection.is(&node.id),
		text: text::layout(&node.label, &node.examples, node.rect.width, node.rect.height),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::pathway::geometry::Point;
	use crate::components::pathway::routing::RouteTable;
	use crate::components::pathway::types::{Category, CategoryId};
	use pretty_assertions::assert_eq;

	fn node(id: &str, y: f64, category: CategoryId) -> Node {
		Node {
			id: id.into(),
			rect: Rect::new(0.0, y, 100.0, 50.0),
			category,
			label: vec![id.into()],
			examples: Vec::new(),
			explanation: String::new(),
			interventions: None,
		}
	}

	fn diagram(edges: Vec<Edge>) -> Diagram {
		Diagram {
			nodes: vec![
				node("A", 0.0, CategoryId::Process),
				node("B", 200.0, CategoryId::Process),
				node("orphan", 400.0, CategoryId::SignsSymptoms),
			],
			edges,
			categories: vec![Category {
				id: CategoryId::Process,
				display_name: "Process".into(),
				fill: ColorToken::White,
				text: ColorToken::Slate800,
			}],
			routes: RouteTable::new(),
			width: 100.0,
			height: 450.0,
		}
	}

	#[test]
	fn dangling_edges_are_omitted() {
		let d = diagram(vec![
			Edge::new("A", "ghost"),
			Edge::new("A", "B"),
			Edge::new("ghost", "B"),
		]);
		let scene = Scene::build(&d, &Selection::default(), ConnectorMode::Orthogonal);
		assert_eq!(scene.edges.len(), 1);
		assert_eq!((scene.edges[0].from.as_str(), scene.edges[0].to.as_str()), ("A", "B"));
	}

	#[test]
	fn nodes_with_unknown_category_are_omitted() {
		let scene = Scene::build(&diagram(Vec::new()), &Selection::default(), ConnectorMode::Orthogonal);
		let ids: Vec<&str> = scene.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["A", "B"]);
		assert!(scene.nodes.iter().all(|n| n.outline == Some(ColorToken::Slate300)));
	}

	#[test]
	fn only_selected_node_is_highlighted() {
		let scene = Scene::build(&diagram(Vec::new()), &Selection::of("B"), ConnectorMode::Orthogonal);
		let selected: Vec<&str> = scene
			.nodes
			.iter()
			.filter(|n| n.selected)
			.map(|n| n.id.as_str())
			.collect();
		assert_eq!(selected, vec!["B"]);
	}

	#[test]
	fn stroke_follows_edge_metadata() {
		let plain = EdgeStroke::for_edge(&Edge::new("A", "B"));
		assert_eq!(plain.color, ColorToken::Slate500);
		assert_eq!(plain.dash, None);

		let loop_back = EdgeStroke::for_edge(&Edge::new("B", "A").dashed().feedback());
		assert_eq!(loop_back.color, ColorToken::Orange500);
		assert_eq!(loop_back.dash, Some(DASH_PATTERN));
	}

	#[test]
	fn arrow_sits_on_the_connector_end() {
		let d = diagram(vec![Edge::new("A", "B")]);
		let scene = Scene::build(&d, &Selection::default(), ConnectorMode::Orthogonal);
		let arrow = scene.edges[0].arrow.unwrap();
		assert_eq!(arrow.tip, Point::new(50.0, 200.0));

		let curved = Scene::build(&d, &Selection::default(), ConnectorMode::Curved);
		assert!(matches!(curved.edges[0].connector, Connector::Curved(_)));
		assert_eq!(curved.edges[0].arrow.unwrap().tip, Point::new(50.0, 200.0));
	}
}
