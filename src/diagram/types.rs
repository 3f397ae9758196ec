//! Core diagram types.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use super::error::DiagramError;

/// A position or vector in plotting units. Y grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when the point is read as a vector.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A labeled vertex circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub label: String,
    pub position: Point,
}

/// A directed edge between two vertex indices.
///
/// `weight` is drawn as a label at the arrow's midpoint when present.
/// `Some(0.0)` is a real label, not an absent one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: Option<f64>,
}

impl Edge {
    pub const fn new(source: usize, target: usize) -> Self {
        Self {
            source,
            target,
            weight: None,
        }
    }

    pub fn weighted(source: usize, target: usize, weight: impl Into<f64>) -> Self {
        Self {
            source,
            target,
            weight: Some(weight.into()),
        }
    }

    /// Text drawn for this edge's weight, if any.
    pub fn label(&self) -> Option<String> {
        self.weight.map(format_weight)
    }
}

impl From<(usize, usize)> for Edge {
    fn from((source, target): (usize, usize)) -> Self {
        Self::new(source, target)
    }
}

impl From<(usize, usize, f64)> for Edge {
    fn from((source, target, weight): (usize, usize, f64)) -> Self {
        Self::weighted(source, target, weight)
    }
}

/// Format a weight the way it is printed on an edge.
///
/// Integral values print without a fractional part (`4`, `-5`), negative
/// zero prints as `0`.
pub fn format_weight(weight: f64) -> String {
    if weight == 0.0 {
        return "0".to_string();
    }
    format!("{weight}")
}

/// A validated diagram: vertices, edges and the shared circle radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    name: Option<String>,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    radius: f64,
}

impl Diagram {
    /// Build a diagram from parallel label and position lists.
    ///
    /// # Errors
    ///
    /// Returns a [`DiagramError`] if the lists differ in length, an edge
    /// references a missing vertex, the radius is not a positive finite
    /// number, a coordinate is negative or not finite, or an edge connects
    /// two circles that coincide or overlap.
    pub fn new<L, P, E>(labels: L, positions: P, edges: E, radius: f64) -> Result<Self, DiagramError>
    where
        L: IntoIterator,
        L::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<Point>,
        E: IntoIterator,
        E::Item: Into<Edge>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let positions: Vec<Point> = positions.into_iter().map(Into::into).collect();
        let edges: Vec<Edge> = edges.into_iter().map(Into::into).collect();

        if labels.len() != positions.len() {
            return Err(DiagramError::LengthMismatch {
                labels: labels.len(),
                positions: positions.len(),
            });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(DiagramError::InvalidRadius(radius));
        }
        for (vertex, p) in positions.iter().enumerate() {
            if !(p.x.is_finite() && p.y.is_finite()) || p.x < 0.0 || p.y < 0.0 {
                return Err(DiagramError::InvalidCoordinate {
                    vertex,
                    x: p.x,
                    y: p.y,
                });
            }
        }

        let len = positions.len();
        for (i, edge) in edges.iter().enumerate() {
            for index in [edge.source, edge.target] {
                if index >= len {
                    return Err(DiagramError::VertexOutOfRange {
                        edge: i,
                        index,
                        len,
                    });
                }
            }
            let (p1, p2) = (positions[edge.source], positions[edge.target]);
            if p1 == p2 {
                return Err(DiagramError::CoincidentEndpoints {
                    edge: i,
                    from: edge.source,
                    to: edge.target,
                });
            }
            let distance = p1.distance(p2);
            if distance <= 2.0 * radius {
                return Err(DiagramError::OverlappingEndpoints {
                    edge: i,
                    from: edge.source,
                    to: edge.target,
                    distance,
                    radius,
                });
            }
        }

        let vertices = labels
            .into_iter()
            .zip(positions)
            .map(|(label, position)| Vertex { label, position })
            .collect();

        Ok(Self {
            name: None,
            vertices,
            edges,
            radius,
        })
    }

    /// Attach a name used in logs and default file names.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Center of the vertex at `index`.
    ///
    /// Indices stored in edges are validated at construction, so this only
    /// returns `None` for caller-supplied indices.
    pub fn position(&self, index: usize) -> Option<Point> {
        self.vertices.get(index).map(|v| v.position)
    }

    /// Endpoint centers of an edge belonging to this diagram.
    pub(crate) fn endpoints(&self, edge: &Edge) -> (Point, Point) {
        (
            self.vertices[edge.source].position,
            self.vertices[edge.target].position,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_vertices() -> (Vec<&'static str>, Vec<(f64, f64)>) {
        (vec!["a", "b"], vec![(1.0, 1.0), (3.0, 1.0)])
    }

    #[test]
    fn test_new_accepts_valid_diagram() {
        let (labels, positions) = two_vertices();
        let diagram = Diagram::new(labels, positions, [(0, 1)], 0.3).unwrap();
        assert_eq!(diagram.vertices().len(), 2);
        assert_eq!(diagram.edges(), &[Edge::new(0, 1)]);
        assert_eq!(diagram.vertices()[1].label, "b");
        assert!(diagram.name().is_none());
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = Diagram::new(["a"], [(1.0, 1.0), (2.0, 2.0)], Vec::<Edge>::new(), 0.3)
            .unwrap_err();
        assert_eq!(
            err,
            DiagramError::LengthMismatch {
                labels: 1,
                positions: 2
            }
        );
    }

    #[test]
    fn test_new_rejects_out_of_range_edge() {
        let (labels, positions) = two_vertices();
        let err = Diagram::new(labels, positions, [(0, 1), (1, 5)], 0.3).unwrap_err();
        assert_eq!(
            err,
            DiagramError::VertexOutOfRange {
                edge: 1,
                index: 5,
                len: 2
            }
        );
    }

    #[test]
    fn test_new_rejects_bad_radius() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let (labels, positions) = two_vertices();
            let err = Diagram::new(labels, positions, Vec::<Edge>::new(), radius).unwrap_err();
            assert!(matches!(err, DiagramError::InvalidRadius(_)));
        }
    }

    #[test]
    fn test_new_rejects_negative_coordinate() {
        let err = Diagram::new(["a", "b"], [(1.0, 1.0), (-2.0, 1.0)], Vec::<Edge>::new(), 0.3)
            .unwrap_err();
        assert!(matches!(
            err,
            DiagramError::InvalidCoordinate { vertex: 1, .. }
        ));
    }

    #[test]
    fn test_new_rejects_self_loop_and_coincident_vertices() {
        let (labels, positions) = two_vertices();
        let err = Diagram::new(labels, positions, [(1, 1)], 0.3).unwrap_err();
        assert!(matches!(err, DiagramError::CoincidentEndpoints { edge: 0, .. }));

        let err = Diagram::new(["a", "b"], [(2.0, 2.0), (2.0, 2.0)], [(0, 1)], 0.3).unwrap_err();
        assert!(matches!(
            err,
            DiagramError::CoincidentEndpoints { from: 0, to: 1, .. }
        ));
    }

    #[test]
    fn test_new_rejects_overlapping_circles() {
        let err = Diagram::new(["a", "b"], [(1.0, 1.0), (1.5, 1.0)], [(0, 1)], 0.3).unwrap_err();
        assert!(matches!(err, DiagramError::OverlappingEndpoints { .. }));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let (labels, positions) = two_vertices();
        let err = Diagram::new(labels, positions, [(0, 7)], 0.3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "edge 0 references vertex 7, but the diagram has 2 vertices"
        );
    }

    #[test]
    fn test_zero_weight_is_a_label() {
        assert_eq!(Edge::weighted(0, 1, 0).label(), Some("0".to_string()));
        assert_eq!(Edge::new(0, 1).label(), None);
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(4.0), "4");
        assert_eq!(format_weight(-5.0), "-5");
        assert_eq!(format_weight(4.5), "4.5");
        assert_eq!(format_weight(-0.0), "0");
    }

    #[test]
    fn test_with_name() {
        let (labels, positions) = two_vertices();
        let diagram = Diagram::new(labels, positions, [(0, 1)], 0.3)
            .unwrap()
            .with_name("pair");
        assert_eq!(diagram.name(), Some("pair"));
    }
}
