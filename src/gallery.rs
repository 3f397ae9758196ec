//! Built-in example diagrams.
//!
//! Each example is a fixed graph used to illustrate a classic algorithm.
//! Nothing is computed here: vertex positions, labels and edges are
//! literals.

use crate::diagram::{Diagram, DiagramError};

/// Radius used by every example except the A* shortest-path one.
pub const DEFAULT_RADIUS: f64 = 0.3;

/// Declare vertex index bindings and their labels in one go.
///
/// `vertices!(labels: a, b, c)` binds `a = 0`, `b = 1`, `c = 2` and
/// `labels = ["a", "b", "c"]`.
macro_rules! vertices {
    ($labels:ident: $($name:ident),+ $(,)?) => {
        let $labels = [$(stringify!($name)),+];
        let mut indices = 0usize..;
        $(let $name: usize = indices.next().unwrap_or_default();)+
    };
}

/// A named example diagram.
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> Result<Diagram, DiagramError>,
}

impl Example {
    /// Build the example's diagram.
    ///
    /// # Errors
    ///
    /// Propagates validation errors; the built-in data is expected to be
    /// valid.
    pub fn diagram(&self) -> Result<Diagram, DiagramError> {
        (self.build)().map(|d| d.with_name(self.name))
    }

    /// Default output file name for the given extension (e.g. `scc.png`).
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.name)
    }
}

/// All examples, in the order the CLI renders them.
pub static EXAMPLES: [Example; 7] = [
    Example {
        name: "scc",
        description: "strongly connected components",
        build: scc,
    },
    Example {
        name: "mst",
        description: "minimum spanning tree",
        build: mst,
    },
    Example {
        name: "spa",
        description: "shortest path on a geometric graph (A*)",
        build: spa,
    },
    Example {
        name: "spn",
        description: "shortest paths with negative edge weights",
        build: spn,
    },
    Example {
        name: "mbm",
        description: "maximum bipartite matching",
        build: mbm,
    },
    Example {
        name: "dp",
        description: "edge and vertex disjoint paths",
        build: dp,
    },
    Example {
        name: "mf",
        description: "maximum flow network",
        build: mf,
    },
];

/// Look up an example by name.
pub fn find(name: &str) -> Option<&'static Example> {
    EXAMPLES.iter().find(|e| e.name == name)
}

fn scc() -> Result<Diagram, DiagramError> {
    vertices!(labels: a, b, c, d, e, f, g, h, i);
    let positions = [
        (1.0, 2.0),
        (2.0, 2.0),
        (1.0, 1.0),
        (2.0, 1.0),
        (3.0, 3.0),
        (3.5, 3.0 - 3f64.sqrt() / 2.0),
        (4.0, 3.0),
        (5.0, 2.0),
        (5.0, 1.0),
    ];
    let edges = [
        (a, b),
        (a, c),
        (b, d),
        (b, e),
        (b, i),
        (c, d),
        (d, a),
        (d, h),
        (e, f),
        (f, g),
        (g, e),
        (g, h),
        (h, i),
        (i, h),
    ];
    Diagram::new(labels, positions, edges, DEFAULT_RADIUS)
}

fn mst() -> Result<Diagram, DiagramError> {
    vertices!(labels: a, b, c, d, e, f, g, h, i);
    let positions = [
        (1.0, 2.0),
        (2.0, 3.0),
        (4.0, 3.0),
        (6.0, 3.0),
        (7.0, 2.0),
        (6.0, 1.0),
        (4.0, 1.0),
        (2.0, 1.0),
        (3.0, 2.0),
    ];
    let edges = [
        (a, b, 4.0),
        (a, h, 8.0),
        (b, c, 8.0),
        (b, h, 11.0),
        (c, d, 7.0),
        (c, f, 4.0),
        (c, i, 2.0),
        (d, e, 9.0),
        (d, f, 14.0),
        (e, f, 10.0),
        (f, g, 2.0),
        (g, h, 1.0),
        (g, i, 6.0),
        (h, i, 7.0),
    ];
    Diagram::new(labels, positions, edges, DEFAULT_RADIUS)
}

/// Vertices sit on a grid of equilateral triangles so that straight-line
/// distances make a consistent A* heuristic.
fn spa() -> Result<Diagram, DiagramError> {
    vertices!(labels: s, a, b, c, d, e, t);
    let dx = 3f64.sqrt();
    let positions = [
        (1.0, 4.0),
        (1.0 + dx, 5.0),
        (1.0 + dx, 3.0),
        (1.0 + 2.0 * dx, 5.0),
        (1.0, 2.0),
        (1.0 + dx, 1.0),
        (1.0 + 3.0 * dx, 3.0),
    ];
    let edges = [
        (s, a, 3.0),
        (s, d, 2.0),
        (a, b, 2.0),
        (b, c, 3.0),
        (c, t, 3.0),
        (d, e, 4.0),
        (e, t, 4.5),
    ];
    Diagram::new(labels, positions, edges, 1.0 / 3.0)
}

/// A regular pentagon with side length 2.
fn spn() -> Result<Diagram, DiagramError> {
    vertices!(labels: v1, v2, v3, v4, v5);
    let dx = 2.0 * 72f64.to_radians().cos();
    let dy = 2.0 * 72f64.to_radians().sin();
    let positions = [
        (1.0, 1.0 + dy),
        (2.0 + dx, 1.0 + dy + 2.0 * 36f64.to_radians().sin()),
        (3.0 + 2.0 * dx, 1.0 + dy),
        (3.0 + dx, 1.0),
        (1.0 + dx, 1.0),
    ];
    let edges = [
        (v1, v2, 3.0),
        (v1, v3, 8.0),
        (v1, v5, -4.0),
        (v2, v4, 1.0),
        (v2, v5, 7.0),
        (v3, v2, 4.0),
        (v4, v1, 2.0),
        (v4, v3, -5.0),
        (v5, v4, 6.0),
    ];
    Diagram::new(labels, positions, edges, DEFAULT_RADIUS)
}

fn mbm() -> Result<Diagram, DiagramError> {
    vertices!(labels: x1, x2, x3, x4, x5, x6, y1, y2, y3, y4, y5, y6);
    let positions = [
        (1.0, 3.0),
        (2.0, 3.0),
        (3.0, 3.0),
        (4.0, 3.0),
        (5.0, 3.0),
        (6.0, 3.0),
        (1.0, 1.0),
        (2.0, 1.0),
        (3.0, 1.0),
        (4.0, 1.0),
        (5.0, 1.0),
        (6.0, 1.0),
    ];
    let edges = [
        (x1, y1),
        (x1, y4),
        (x2, y1),
        (x2, y2),
        (x2, y5),
        (x3, y2),
        (x3, y3),
        (x3, y6),
        (x4, y3),
        (x5, y6),
        (x6, y5),
    ];
    Diagram::new(labels, positions, edges, DEFAULT_RADIUS)
}

fn dp() -> Result<Diagram, DiagramError> {
    vertices!(labels: s, a, b, c, d, e, t);
    let positions = [
        (1.0, 2.0),
        (2.0, 3.0),
        (4.0, 3.0),
        (3.0, 2.0),
        (4.0, 1.0),
        (2.0, 1.0),
        (5.0, 2.0),
    ];
    let edges = [
        (s, a),
        (s, c),
        (s, e),
        (a, b),
        (b, t),
        (c, b),
        (c, d),
        (c, t),
        (d, t),
        (e, c),
    ];
    Diagram::new(labels, positions, edges, DEFAULT_RADIUS)
}

fn mf() -> Result<Diagram, DiagramError> {
    vertices!(labels: s, v1, v2, v3, v4, t);
    let positions = [
        (1.0, 2.0),
        (2.0, 3.0),
        (2.0, 1.0),
        (4.0, 3.0),
        (4.0, 1.0),
        (5.0, 2.0),
    ];
    let edges = [
        (s, v1, 16.0),
        (s, v2, 13.0),
        (v1, v3, 12.0),
        (v2, v1, 4.0),
        (v2, v4, 14.0),
        (v3, v2, 9.0),
        (v3, t, 20.0),
        (v4, v3, 7.0),
        (v4, t, 4.0),
    ];
    Diagram::new(labels, positions, edges, DEFAULT_RADIUS)
}
