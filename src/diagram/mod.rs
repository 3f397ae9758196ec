//! Diagram data model and arrow geometry.
//!
//! A [`Diagram`] is a validated, immutable set of labeled vertex circles and
//! directed edges. [`geometry`] turns each edge into an arrow whose start and
//! tip sit on the circle boundaries.

mod error;
pub mod geometry;
mod types;

pub use error::DiagramError;
pub use geometry::{Arrow, ArrowOutline, EdgeClass};
pub use types::{Diagram, Edge, Point, Vertex, format_weight};
