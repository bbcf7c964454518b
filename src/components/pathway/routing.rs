//! Connector routing between fixed node rectangles.
//!
//! The diagram's topology is small and authored, so routing is a lookup:
//! a [`RouteTable`] maps specific `(from, to)` pairs to a hand-tuned
//! [`Strategy`], and every other pair takes the generic dominant-axis route.
//! Each strategy is a pure function of the two rectangles (plus obstacle
//! bounds for bypasses), so the same input always yields the same path.

use super::geometry::{Point, Polyline, QuadCurve, Rect, Side};
use super::types::{Diagram, Edge, Node};

/// How far a self-loop swings out from the node.
const SELF_LOOP_REACH: f64 = 30.0;

/// Control point offset of a curved connector, as a fraction of chord length.
pub const CURVE_BOW: f64 = 0.2;

/// Which side of the diagram a detour or loop runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lateral {
	/// Towards smaller x.
	Left,
	/// Towards larger x.
	Right,
}

impl Lateral {
	fn side(self) -> Side {
		match self {
			Lateral::Left => Side::Left,
			Lateral::Right => Side::Right,
		}
	}
}

/// Routing template for one `(from, to)` pair.
#[derive(Clone, Debug, PartialEq)]
pub enum Strategy {
	/// Drop from the source's bottom-center to a horizontal rail `rail_drop`
	/// below it, run along the rail, then drop into the target's top edge at
	/// `target_fraction` of its width. Several sources sharing a target use
	/// different fractions so their arrows land apart.
	RailFan {
		/// Distance from the source's bottom edge down to the rail.
		rail_drop: f64,
		/// Landing point on the target's top edge, from 0 (left) to 1 (right).
		target_fraction: f64,
	},
	/// Straight down from the source's bottom-center into the target's top.
	Drop,
	/// Leave the source downwards, swing `clearance` beyond the union of the
	/// named obstacles on one side, come back in above the target and drop
	/// into its top at `target_fraction` of its width.
	Bypass {
		/// Ids of the nodes to steer around.
		obstacles: Vec<String>,
		/// Side the detour runs along.
		lateral: Lateral,
		/// Gap between the detour and the obstacles.
		clearance: f64,
		/// Length of the legs below the source and above the target.
		lead: f64,
		/// Landing point on the target's top edge, from 0 (left) to 1 (right).
		target_fraction: f64,
	},
	/// C-shaped loop: out of one side of the source, `reach` beyond both
	/// nodes, and back into the same side of the target.
	CLoop {
		/// Side the loop leaves and re-enters through.
		lateral: Lateral,
		/// Distance beyond both nodes.
		reach: f64,
	},
	/// Generic dominant-axis route with a single midpoint bend.
	Fallback,
}

#[derive(Clone, Debug, PartialEq)]
struct RouteRule {
	from: String,
	to: String,
	strategy: Strategy,
}

/// Per-pair routing overrides. Pairs without an entry use [`Strategy::Fallback`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteTable {
	rules: Vec<RouteRule>,
}

impl RouteTable {
	/// Empty table; every pair takes the fallback route.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a rule for the `(from, to)` pair.
	pub fn with(mut self, from: &str, to: &str, strategy: Strategy) -> Self {
		self.rules.push(RouteRule {
			from: from.into(),
			to: to.into(),
			strategy,
		});
		self
	}

	/// Registers a [`Strategy::RailFan`] for each `(source, fraction)` into `to`.
	pub fn fan(mut self, sources: &[(&str, f64)], to: &str, rail_drop: f64) -> Self {
		for &(from, target_fraction) in sources {
			self = self.with(
				from,
				to,
				Strategy::RailFan {
					rail_drop,
					target_fraction,
				},
			);
		}
		self
	}

	/// First rule registered for the pair, if any.
	pub fn strategy(&self, from: &str, to: &str) -> Option<&Strategy> {
		self.rules
			.iter()
			.find(|r| r.from == from && r.to == to)
			.map(|r| &r.strategy)
	}

	/// Every node id a bypass rule steers around.
	pub fn obstacles(&self) -> impl Iterator<Item = &str> {
		self.rules
			.iter()
			.filter_map(|r| match &r.strategy {
				Strategy::Bypass { obstacles, .. } => Some(obstacles),
				_ => None,
			})
			.flatten()
			.map(String::as_str)
	}
}

/// Orthogonal path for `edge` from `from` to `to`.
///
/// The path starts on `from`'s boundary, ends on `to`'s boundary and its
/// last segment always points into `to`.
pub fn route(edge: &Edge, from: &Node, to: &Node, diagram: &Diagram) -> Polyline {
	let (a, b) = (&from.rect, &to.rect);
	if edge.from == edge.to {
		return self_loop(a);
	}

	match diagram.routes.strategy(&edge.from, &edge.to) {
		Some(Strategy::RailFan {
			rail_drop,
			target_fraction,
		}) => rail_fan(a, b, *rail_drop, *target_fraction),
		Some(Strategy::Drop) => drop_into(a, b),
		Some(Strategy::Bypass {
			obstacles,
			lateral,
			clearance,
			lead,
			target_fraction,
		}) => match obstacle_bounds(diagram, obstacles) {
			Some(around) => bypass(a, b, &around, *lateral, *clearance, *lead, *target_fraction),
			None => drop_into(a, b),
		},
		Some(Strategy::CLoop { lateral, reach }) => c_loop(a, b, *lateral, *reach),
		Some(Strategy::Fallback) | None => fallback(a, b),
	}
}

fn obstacle_bounds(diagram: &Diagram, ids: &[String]) -> Option<Rect> {
	ids.iter()
		.filter_map(|id| diagram.node(id))
		.map(|n| n.rect)
		.reduce(|acc, r| acc.union(&r))
}

fn rail_fan(from: &Rect, to: &Rect, rail_drop: f64, target_fraction: f64) -> Polyline {
	let end = Point::new(to.x + to.width * target_fraction, to.y);
	Polyline::start(from.anchor(Side::Bottom))
		.v(from.bottom() + rail_drop)
		.h(end.x)
		.enter(end, Side::Top)
}

fn drop_into(from: &Rect, to: &Rect) -> Polyline {
	let start = from.anchor(Side::Bottom);
	let end = Point::new(start.x.clamp(to.x, to.right()), to.y);
	Polyline::start(start).enter(end, Side::Top)
}

fn bypass(
	from: &Rect,
	to: &Rect,
	around: &Rect,
	lateral: Lateral,
	clearance: f64,
	lead: f64,
	target_fraction: f64,
) -> Polyline {
	let start = from.anchor(Side::Bottom);
	let end = Point::new(to.x + to.width * target_fraction, to.y);
	let detour_x = match lateral {
		Lateral::Left => around.x - clearance,
		Lateral::Right => around.right() + clearance,
	};
	Polyline::start(start)
		.v(start.y + lead)
		.h(detour_x)
		.v(end.y - lead)
		.h(end.x)
		.enter(end, Side::Top)
}

fn c_loop(from: &Rect, to: &Rect, lateral: Lateral, reach: f64) -> Polyline {
	let side = lateral.side();
	let span = from.union(to);
	let outer_x = match lateral {
		Lateral::Left => span.x - reach,
		Lateral::Right => span.right() + reach,
	};
	let end = to.anchor(side);
	Polyline::start(from.anchor(side))
		.h(outer_x)
		.v(end.y)
		.enter(end, side)
}

fn self_loop(rect: &Rect) -> Polyline {
	let end = rect.anchor(Side::Top);
	Polyline::start(rect.anchor(Side::Right))
		.h(rect.right() + SELF_LOOP_REACH)
		.v(rect.y - SELF_LOOP_REACH)
		.h(end.x)
		.enter(end, Side::Top)
}

/// Generic route: travel along whichever axis separates the centers most,
/// bending once halfway.
pub fn fallback(from: &Rect, to: &Rect) -> Polyline {
	let (fc, tc) = (from.center(), to.center());
	let (dx, dy) = (tc.x - fc.x, tc.y - fc.y);

	if dy.abs() > dx.abs() {
		let (exit, entry) = if dy > 0.0 {
			(Side::Bottom, Side::Top)
		} else {
			(Side::Top, Side::Bottom)
		};
		let end = to.anchor(entry);
		Polyline::start(from.anchor(exit))
			.v(fc.y + dy / 2.0)
			.h(end.x)
			.enter(end, entry)
	} else {
		let (exit, entry) = if dx > 0.0 {
			(Side::Right, Side::Left)
		} else {
			(Side::Left, Side::Right)
		};
		let end = to.anchor(entry);
		Polyline::start(from.anchor(exit))
			.h(fc.x + dx / 2.0)
			.v(end.y)
			.enter(end, entry)
	}
}

/// Curved connector between two rectangles.
///
/// Each endpoint is where the center-to-center line crosses the rectangle's
/// edge on the dominant axis; the control point bows out perpendicular to the
/// chord by [`CURVE_BOW`] of its length.
pub fn route_curved(from: &Rect, to: &Rect) -> QuadCurve {
	let (fc, tc) = (from.center(), to.center());
	let (dx, dy) = (tc.x - fc.x, tc.y - fc.y);
	let start = edge_crossing(from, dx, dy);
	let end = edge_crossing(to, -dx, -dy);

	let (cx, cy) = (end.x - start.x, end.y - start.y);
	let len = (cx * cx + cy * cy).sqrt();
	let mid = Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
	let control = if len < f64::EPSILON {
		mid
	} else {
		let offset = len * CURVE_BOW;
		Point::new(mid.x - cy / len * offset, mid.y + cx / len * offset)
	};
	QuadCurve {
		start,
		control,
		end,
	}
}

/// Where a ray from the center along `(dx, dy)` leaves through the edge
/// facing the dominant axis, clamped to that edge.
fn edge_crossing(rect: &Rect, dx: f64, dy: f64) -> Point {
	let c = rect.center();
	if dx.abs() >= dy.abs() {
		if dx == 0.0 {
			return c;
		}
		let half = rect.width / 2.0;
		let y = (c.y + dy * half / dx.abs()).clamp(rect.y, rect.bottom());
		Point::new(c.x + half.copysign(dx), y)
	} else {
		let half = rect.height / 2.0;
		let x = (c.x + dx * half / dy.abs()).clamp(rect.x, rect.right());
		Point::new(x, c.y + half.copysign(dy))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::pathway::types::CategoryId;
	use pretty_assertions::assert_eq;

	fn node(id: &str, x: f64, y: f64, w: f64, h: f64) -> Node {
		Node {
			id: id.into(),
			rect: Rect::new(x, y, w, h),
			category: CategoryId::Process,
			label: vec![id.into()],
			examples: Vec::new(),
			explanation: String::new(),
			interventions: None,
		}
	}

	fn diagram(nodes: Vec<Node>, routes: RouteTable) -> Diagram {
		Diagram {
			nodes,
			edges: Vec::new(),
			categories: Vec::new(),
			routes,
			width: 1000.0,
			height: 1000.0,
		}
	}

	fn route_pair(d: &Diagram, from: &str, to: &str) -> Polyline {
		let edge = Edge::new(from, to);
		route(&edge, d.node(from).unwrap(), d.node(to).unwrap(), d)
	}

	fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
		raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
	}

	fn assert_enters(path: &Polyline, rect: &Rect) {
		let end = *path.points().last().unwrap();
		let side = rect.side_at(end).expect("path ends on the target boundary");
		assert_eq!(path.final_direction(), Some(side.inward()));
	}

	#[test]
	fn fallback_vertical_bends_at_midpoint() {
		let d = diagram(
			vec![node("A", 0.0, 0.0, 100.0, 50.0), node("B", 0.0, 200.0, 100.0, 50.0)],
			RouteTable::new(),
		);
		let path = route_pair(&d, "A", "B");
		assert_eq!(path.points(), pts(&[(50.0, 50.0), (50.0, 125.0), (50.0, 200.0)]));
	}

	#[test]
	fn fallback_upwards_enters_bottom_edge() {
		let d = diagram(
			vec![node("A", 200.0, 300.0, 100.0, 50.0), node("B", 0.0, 0.0, 100.0, 50.0)],
			RouteTable::new(),
		);
		let path = route_pair(&d, "A", "B");
		assert_eq!(
			path.points(),
			pts(&[(250.0, 300.0), (250.0, 175.0), (50.0, 175.0), (50.0, 50.0)])
		);
		assert_enters(&path, &d.node("B").unwrap().rect);
	}

	#[test]
	fn fallback_horizontal_uses_side_edges() {
		let d = diagram(
			vec![node("A", 0.0, 0.0, 100.0, 50.0), node("B", 300.0, 40.0, 100.0, 50.0)],
			RouteTable::new(),
		);
		let path = route_pair(&d, "A", "B");
		assert_eq!(
			path.points(),
			pts(&[(100.0, 25.0), (200.0, 25.0), (200.0, 65.0), (300.0, 65.0)])
		);

		let back = route_pair(&d, "B", "A");
		assert_eq!(
			back.points(),
			pts(&[(300.0, 65.0), (200.0, 65.0), (200.0, 25.0), (100.0, 25.0)])
		);
		assert_enters(&back, &d.node("A").unwrap().rect);
	}

	#[test]
	fn rail_fan_lands_at_fraction_of_target() {
		let routes = RouteTable::new().fan(&[("L", 0.25), ("R", 0.75)], "T", 30.0);
		let d = diagram(
			vec![
				node("L", 0.0, 0.0, 100.0, 100.0),
				node("R", 300.0, 0.0, 100.0, 100.0),
				node("T", 100.0, 150.0, 200.0, 60.0),
			],
			routes,
		);
		assert_eq!(
			route_pair(&d, "L", "T").points(),
			pts(&[(50.0, 100.0), (50.0, 130.0), (150.0, 130.0), (150.0, 150.0)])
		);
		assert_eq!(
			route_pair(&d, "R", "T").points(),
			pts(&[(350.0, 100.0), (350.0, 130.0), (250.0, 130.0), (250.0, 150.0)])
		);
	}

	#[test]
	fn drop_is_a_single_vertical() {
		let routes = RouteTable::new().with("A", "B", Strategy::Drop);
		let d = diagram(
			vec![node("A", 0.0, 0.0, 100.0, 50.0), node("B", 0.0, 100.0, 100.0, 50.0)],
			routes,
		);
		assert_eq!(
			route_pair(&d, "A", "B").points(),
			pts(&[(50.0, 50.0), (50.0, 100.0)])
		);
	}

	fn stacked_with_obstacle(obstacles: Vec<String>) -> Diagram {
		let routes = RouteTable::new().with(
			"A",
			"C",
			Strategy::Bypass {
				obstacles,
				lateral: Lateral::Right,
				clearance: 60.0,
				lead: 20.0,
				target_fraction: 0.5,
			},
		);
		diagram(
			vec![
				node("A", 0.0, 0.0, 100.0, 50.0),
				node("B", 0.0, 100.0, 100.0, 50.0),
				node("C", 0.0, 200.0, 100.0, 50.0),
			],
			routes,
		)
	}

	#[test]
	fn bypass_swings_around_obstacle() {
		let d = stacked_with_obstacle(vec!["B".into()]);
		let path = route_pair(&d, "A", "C");
		assert_eq!(
			path.points(),
			pts(&[
				(50.0, 50.0),
				(50.0, 70.0),
				(160.0, 70.0),
				(160.0, 180.0),
				(50.0, 180.0),
				(50.0, 200.0),
			])
		);
		let obstacle = d.node("B").unwrap().rect;
		assert!(path.segments().all(|(a, b)| !obstacle.segment_enters_interior(a, b)));
	}

	#[test]
	fn bypass_without_obstacle_degrades_to_drop() {
		let d = stacked_with_obstacle(vec!["missing".into()]);
		assert_eq!(
			route_pair(&d, "A", "C").points(),
			pts(&[(50.0, 50.0), (50.0, 200.0)])
		);
	}

	#[test]
	fn c_loop_reenters_matching_side() {
		let routes = RouteTable::new().with(
			"low",
			"high",
			Strategy::CLoop {
				lateral: Lateral::Right,
				reach: 100.0,
			},
		);
		let d = diagram(
			vec![node("high", 0.0, 0.0, 100.0, 50.0), node("low", 0.0, 200.0, 120.0, 50.0)],
			routes,
		);
		let path = route_pair(&d, "low", "high");
		assert_eq!(
			path.points(),
			pts(&[(120.0, 225.0), (220.0, 225.0), (220.0, 25.0), (100.0, 25.0)])
		);
		assert_eq!(path.final_direction(), Some((-1.0, 0.0)));
	}

	#[test]
	fn self_loop_comes_back_through_top() {
		let d = diagram(vec![node("A", 0.0, 100.0, 100.0, 50.0)], RouteTable::new());
		let path = route_pair(&d, "A", "A");
		assert_eq!(
			path.points(),
			pts(&[(100.0, 125.0), (130.0, 125.0), (130.0, 70.0), (50.0, 70.0), (50.0, 100.0)])
		);
		assert_enters(&path, &d.node("A").unwrap().rect);
	}

	#[test]
	fn routing_is_deterministic() {
		let d = stacked_with_obstacle(vec!["B".into()]);
		assert_eq!(route_pair(&d, "A", "C"), route_pair(&d, "A", "C"));
		assert_eq!(route_pair(&d, "B", "A"), route_pair(&d, "B", "A"));
	}

	#[test]
	fn table_lookup_is_directional() {
		let routes = RouteTable::new().with("A", "B", Strategy::Drop);
		assert_eq!(routes.strategy("A", "B"), Some(&Strategy::Drop));
		assert_eq!(routes.strategy("B", "A"), None);
	}

	#[test]
	fn curved_connector_picks_dominant_edges() {
		let a = Rect::new(0.0, 0.0, 100.0, 50.0);
		let b = Rect::new(300.0, 0.0, 100.0, 50.0);
		let curve = route_curved(&a, &b);
		assert_eq!(curve.start, Point::new(100.0, 25.0));
		assert_eq!(curve.end, Point::new(300.0, 25.0));
		// Chord of 200 bows 40 perpendicular to its direction.
		assert_eq!(curve.control, Point::new(200.0, 65.0));
		assert!(curve.arrowhead().is_some());

		let below = Rect::new(0.0, 200.0, 100.0, 50.0);
		let curve = route_curved(&a, &below);
		assert_eq!(curve.start, Point::new(50.0, 50.0));
		assert_eq!(curve.end, Point::new(50.0, 200.0));
	}
}
