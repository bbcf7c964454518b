//! Axis-aligned primitives shared by the router, the scene builder and hit-testing.

/// Distance kept outside a node before the final inward segment when a route
/// has to be corrected to approach its terminal side head-on.
pub const APPROACH_STUB: f64 = 12.0;

const ARROW_LENGTH: f64 = 10.0;
const ARROW_HALF_WIDTH: f64 = 5.0;

/// Position in diagram units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// Creates a point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	fn distance(self, other: Point) -> f64 {
		((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
	}
}

/// Axis-aligned box given by its top-left corner and size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Horizontal extent.
	pub width: f64,
	/// Vertical extent.
	pub height: f64,
}

impl Rect {
	/// Creates a rectangle from its top-left corner and size.
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// X of the right edge.
	pub fn right(&self) -> f64 {
		self.x + self.width
	}

	/// Y of the bottom edge.
	pub fn bottom(&self) -> f64 {
		self.y + self.height
	}

	/// Center point.
	pub fn center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// Midpoint of the given side.
	pub fn anchor(&self, side: Side) -> Point {
		let c = self.center();
		match side {
			Side::Top => Point::new(c.x, self.y),
			Side::Bottom => Point::new(c.x, self.bottom()),
			Side::Left => Point::new(self.x, c.y),
			Side::Right => Point::new(self.right(), c.y),
		}
	}

	/// Boundary-inclusive containment, used for hit-testing.
	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
	}

	/// The side `p` lies on, if it is on the boundary at all. Corners report
	/// their horizontal edge.
	pub fn side_at(&self, p: Point) -> Option<Side> {
		let within_x = p.x >= self.x && p.x <= self.right();
		let within_y = p.y >= self.y && p.y <= self.bottom();
		if within_x && p.y == self.y {
			Some(Side::Top)
		} else if within_x && p.y == self.bottom() {
			Some(Side::Bottom)
		} else if within_y && p.x == self.x {
			Some(Side::Left)
		} else if within_y && p.x == self.right() {
			Some(Side::Right)
		} else {
			None
		}
	}

	/// Smallest rectangle covering both.
	pub fn union(&self, other: &Rect) -> Rect {
		let (x, y) = (self.x.min(other.x), self.y.min(other.y));
		Rect::new(
			x,
			y,
			self.right().max(other.right()) - x,
			self.bottom().max(other.bottom()) - y,
		)
	}

	/// Whether an axis-aligned segment passes through the open interior.
	/// Segments running along or ending on the boundary do not count.
	pub fn segment_enters_interior(&self, a: Point, b: Point) -> bool {
		if a.x == b.x {
			let (lo, hi) = (a.y.min(b.y), a.y.max(b.y));
			a.x > self.x && a.x < self.right() && lo.max(self.y) < hi.min(self.bottom())
		} else if a.y == b.y {
			let (lo, hi) = (a.x.min(b.x), a.x.max(b.x));
			a.y > self.y && a.y < self.bottom() && lo.max(self.x) < hi.min(self.right())
		} else {
			false
		}
	}
}

/// One edge of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
	/// Edge at `y`.
	Top,
	/// Edge at `y + height`.
	Bottom,
	/// Edge at `x`.
	Left,
	/// Edge at `x + width`.
	Right,
}

impl Side {
	/// Unit direction of travel when crossing this side into the rectangle.
	pub fn inward(self) -> (f64, f64) {
		match self {
			Side::Top => (0.0, 1.0),
			Side::Bottom => (0.0, -1.0),
			Side::Left => (1.0, 0.0),
			Side::Right => (-1.0, 0.0),
		}
	}

	fn is_horizontal_edge(self) -> bool {
		matches!(self, Side::Top | Side::Bottom)
	}
}

/// Filled triangle drawn at the end of a connector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrowhead {
	/// Point the head points at.
	pub tip: Point,
	/// Base corner on one side of the shaft.
	pub left: Point,
	/// Base corner on the other side.
	pub right: Point,
}

impl Arrowhead {
	/// Builds a head whose tip sits on `tip` and points along `(ux, uy)`.
	pub fn pointing(tip: Point, (ux, uy): (f64, f64)) -> Self {
		let back = Point::new(tip.x - ux * ARROW_LENGTH, tip.y - uy * ARROW_LENGTH);
		let (px, py) = (-uy * ARROW_HALF_WIDTH, ux * ARROW_HALF_WIDTH);
		Self {
			tip,
			left: Point::new(back.x + px, back.y + py),
			right: Point::new(back.x - px, back.y - py),
		}
	}
}

/// Orthogonal connector built with SVG-like `v`/`h` moves.
///
/// Coincident points are never stored, so no segment has zero length. Collinear
/// waypoints are kept as authored.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
	points: Vec<Point>,
}

impl Polyline {
	/// Starts a path at `at`.
	pub fn start(at: Point) -> Self {
		Self { points: vec![at] }
	}

	/// Vertical move to `y`.
	pub fn v(mut self, y: f64) -> Self {
		let x = self.last().x;
		self.push(Point::new(x, y));
		self
	}

	/// Horizontal move to `x`.
	pub fn h(mut self, x: f64) -> Self {
		let y = self.last().y;
		self.push(Point::new(x, y));
		self
	}

	/// Finishes the path on `end`, which lies on `side` of the destination.
	///
	/// When the current position already sits on the inward normal of `end`
	/// the path goes straight in. Otherwise it is bent out to a stub in front
	/// of the side first, so the last segment always points into the node.
	pub fn enter(mut self, end: Point, side: Side) -> Self {
		let last = self.last();
		let (ux, uy) = side.inward();
		let aligned = if side.is_horizontal_edge() {
			last.x == end.x && (end.y - last.y) * uy > 0.0
		} else {
			last.y == end.y && (end.x - last.x) * ux > 0.0
		};
		if !aligned {
			let lead = Point::new(end.x - ux * APPROACH_STUB, end.y - uy * APPROACH_STUB);
			if side.is_horizontal_edge() {
				self.push(Point::new(last.x, lead.y));
				self.push(Point::new(end.x, lead.y));
			} else {
				self.push(Point::new(lead.x, last.y));
				self.push(Point::new(lead.x, end.y));
			}
		}
		self.push(end);
		self
	}

	fn push(&mut self, p: Point) {
		if self.last() != p {
			self.points.push(p);
		}
	}

	fn last(&self) -> Point {
		self.points[self.points.len() - 1]
	}

	/// Waypoints in travel order.
	pub fn points(&self) -> &[Point] {
		&self.points
	}

	/// Consecutive waypoint pairs.
	pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
		self.points.windows(2).map(|w| (w[0], w[1]))
	}

	/// Unit direction of the final segment.
	pub fn final_direction(&self) -> Option<(f64, f64)> {
		let (a, b) = self.segments().last()?;
		let len = a.distance(b);
		Some(((b.x - a.x) / len, (b.y - a.y) / len))
	}

	/// Head on the last point, along the final segment.
	pub fn arrowhead(&self) -> Option<Arrowhead> {
		self.final_direction()
			.map(|dir| Arrowhead::pointing(self.last(), dir))
	}
}

/// Single quadratic connector used by the curved connector mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadCurve {
	/// Point on the source boundary.
	pub start: Point,
	/// Quadratic control point.
	pub control: Point,
	/// Point on the target boundary.
	pub end: Point,
}

impl QuadCurve {
	/// Tangent at the end point.
	pub fn final_direction(&self) -> Option<(f64, f64)> {
		let len = self.control.distance(self.end);
		if len < f64::EPSILON {
			return None;
		}
		Some((
			(self.end.x - self.control.x) / len,
			(self.end.y - self.control.y) / len,
		))
	}

	/// Head on `end`, along the end tangent.
	pub fn arrowhead(&self) -> Option<Arrowhead> {
		self.final_direction()
			.map(|dir| Arrowhead::pointing(self.end, dir))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn zero_length_moves_are_dropped() {
		let path = Polyline::start(Point::new(50.0, 50.0))
			.v(125.0)
			.h(50.0)
			.enter(Point::new(50.0, 200.0), Side::Top);
		assert_eq!(
			path.points(),
			&[
				Point::new(50.0, 50.0),
				Point::new(50.0, 125.0),
				Point::new(50.0, 200.0)
			]
		);
	}

	#[test]
	fn misaligned_entry_gets_a_stub() {
		// Arrives level with the target's top edge, which would draw a sideways arrow.
		let path = Polyline::start(Point::new(0.0, 100.0))
			.h(40.0)
			.enter(Point::new(80.0, 100.0), Side::Top);
		assert_eq!(
			path.points(),
			&[
				Point::new(0.0, 100.0),
				Point::new(40.0, 100.0),
				Point::new(40.0, 88.0),
				Point::new(80.0, 88.0),
				Point::new(80.0, 100.0),
			]
		);
		assert_eq!(path.final_direction(), Some((0.0, 1.0)));
	}

	#[test]
	fn entering_where_the_path_already_is_still_has_a_final_segment() {
		let end = Point::new(10.0, 10.0);
		let path = Polyline::start(end).enter(end, Side::Left);
		assert!(path.points().len() >= 2);
		assert_eq!(path.final_direction(), Some((1.0, 0.0)));
	}

	#[test]
	fn arrowhead_follows_last_segment() {
		let path = Polyline::start(Point::new(100.0, 0.0))
			.h(60.0)
			.enter(Point::new(60.0, 40.0), Side::Top);
		let head = path.arrowhead().unwrap();
		assert_eq!(head.tip, Point::new(60.0, 40.0));
		assert_eq!(head.left, Point::new(55.0, 30.0));
		assert_eq!(head.right, Point::new(65.0, 30.0));
	}

	#[test]
	fn interior_test_ignores_boundary_runs() {
		let r = Rect::new(0.0, 0.0, 100.0, 50.0);
		assert!(!r.segment_enters_interior(Point::new(0.0, 0.0), Point::new(100.0, 0.0)));
		assert!(!r.segment_enters_interior(Point::new(50.0, 50.0), Point::new(50.0, 90.0)));
		assert!(r.segment_enters_interior(Point::new(50.0, 60.0), Point::new(50.0, 40.0)));
		assert!(r.segment_enters_interior(Point::new(-10.0, 25.0), Point::new(10.0, 25.0)));
	}

	#[test]
	fn union_covers_both() {
		let a = Rect::new(20.0, 920.0, 380.0, 70.0);
		let b = Rect::new(20.0, 1050.0, 300.0, 120.0);
		assert_eq!(a.union(&b), Rect::new(20.0, 920.0, 380.0, 250.0));
	}
}
