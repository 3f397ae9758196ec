//! Edge arrow geometry.
//!
//! Arrows are drawn from circle boundary to circle boundary rather than from
//! center to center. Axis-aligned edges are padded by exactly `r` along the
//! axis of travel with no square root; diagonal edges are padded by `r`
//! along the normalized direction.

use super::types::{Diagram, Point};

/// How an edge is oriented, which decides how its padding is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClass {
    Horizontal,
    Vertical,
    Diagonal,
}

impl EdgeClass {
    /// Classify the edge from `p1` to `p2`. Callers must not pass coincident
    /// points; [`Diagram::new`] rejects them.
    pub fn of(p1: Point, p2: Point) -> Self {
        if p1.y == p2.y {
            Self::Horizontal
        } else if p1.x == p2.x {
            Self::Vertical
        } else {
            Self::Diagonal
        }
    }
}

/// A boundary-flush arrow: starts at `start` and ends at `start + delta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub class: EdgeClass,
    pub start: Point,
    pub delta: Point,
}

impl Arrow {
    /// Compute the arrow between two circle centers of radius `radius`.
    pub fn between(p1: Point, p2: Point, radius: f64) -> Self {
        let class = EdgeClass::of(p1, p2);
        let d = p2 - p1;
        let pad = match class {
            EdgeClass::Horizontal => Point::new(radius * signum(d.x), 0.0),
            EdgeClass::Vertical => Point::new(0.0, radius * signum(d.y)),
            EdgeClass::Diagonal => d * (radius / d.length()),
        };
        Self {
            class,
            start: p1 + pad,
            delta: d - pad * 2.0,
        }
    }

    /// Where the arrowhead ends: on the target circle's boundary.
    pub fn tip(&self) -> Point {
        self.start + self.delta
    }

    /// Anchor for the edge's weight label.
    pub fn midpoint(&self) -> Point {
        self.start + self.delta / 2.0
    }

    pub fn length(&self) -> f64 {
        self.delta.length()
    }

    /// Polygon for a filled arrow with a length-inclusive head.
    ///
    /// `width` is the shaft width, `head_width` and `head_length` size the
    /// head. The head is shortened to the arrow length for very short
    /// arrows so the tip never overshoots.
    pub fn outline(&self, width: f64, head_width: f64, head_length: f64) -> ArrowOutline {
        let length = self.length();
        if length == 0.0 {
            return ArrowOutline {
                points: [self.start; 7],
            };
        }
        let u = self.delta / length;
        let n = Point::new(-u.y, u.x);
        let head_length = head_length.min(length);
        let neck = self.start + u * (length - head_length);
        let tip = self.tip();
        let half_shaft = n * (width / 2.0);
        let half_head = n * (head_width / 2.0);

        ArrowOutline {
            points: [
                self.start + half_shaft,
                neck + half_shaft,
                neck + half_head,
                tip,
                neck - half_head,
                neck - half_shaft,
                self.start - half_shaft,
            ],
        }
    }
}

/// The seven corners of a filled arrow, starting at the shaft's tail and
/// running up one side, around the tip and back down the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowOutline {
    pub points: [Point; 7],
}

/// `sign(v)` for a nonzero axis delta.
fn signum(v: f64) -> f64 {
    if v > 0.0 { 1.0 } else { -1.0 }
}

/// Plotting-area extent `(max_x + 1, max_y + 1)` over `positions`.
///
/// Maxima start at zero, so an empty diagram still has a one-unit canvas.
pub fn canvas_extent<I>(positions: I) -> Point
where
    I: IntoIterator<Item = Point>,
{
    let max = positions
        .into_iter()
        .fold(Point::default(), |acc, p| Point::new(acc.x.max(p.x), acc.y.max(p.y)));
    Point::new(max.x + 1.0, max.y + 1.0)
}

impl Diagram {
    /// Arrows for every edge, in edge order.
    pub fn arrows(&self) -> Vec<Arrow> {
        self.edges()
            .iter()
            .map(|edge| {
                let (p1, p2) = self.endpoints(edge);
                Arrow::between(p1, p2, self.radius())
            })
            .collect()
    }

    /// Plotting-area extent of this diagram.
    pub fn extent(&self) -> Point {
        canvas_extent(self.vertices().iter().map(|v| v.position))
    }
}
