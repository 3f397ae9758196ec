// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. diagram::DiagramError)
    clippy::module_name_repetitions
)]

//! # Graphfig
//!
//! Renders static figures of small directed graphs: vertices as labeled
//! circles, edges as arrows with optional weight labels.
//!
//! Arrows start and end on the circle boundaries rather than at their
//! centers. Axis-aligned edges are padded without a square root; diagonal
//! edges are padded along the normalized direction.
//!
//! ## Modules
//!
//! - [`diagram`]: Data model, validation and arrow geometry
//! - [`render`]: SVG scene, rasterization and file output
//! - [`gallery`]: Built-in example diagrams
//! - [`input`]: JSON5 diagram files
//! - [`app`]: Command orchestration
//! - [`config`]: Saved command-line defaults
//! - [`watcher`]: File watching
//! - [`perf`]: Timing and debug logging

pub mod app;
pub mod config;
pub mod diagram;
pub mod gallery;
pub mod input;
pub mod perf;
pub mod render;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::diagram::{Diagram, DiagramError, Edge, Point};
    pub use crate::render::{Canvas, RenderMode, RenderOptions, plot, render};
}
