//! Diagram files.
//!
//! Diagrams can be described in JSON5 and loaded with [`load_diagram`].
//! [`to_json`] writes the same schema back out, which is handy as a
//! starting point copied from a built-in example.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::diagram::{Diagram, Edge, Point};
use crate::gallery::DEFAULT_RADIUS;

/// On-disk form of a diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_radius")]
    pub radius: f64,
    pub vertices: Vec<VertexEntry>,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VertexEntry {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeEntry {
    pub source: usize,
    pub target: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

const fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

impl DiagramFile {
    /// Validate into a [`Diagram`].
    ///
    /// # Errors
    ///
    /// Returns an error if the diagram fails validation.
    pub fn into_diagram(self) -> Result<Diagram> {
        let (labels, positions): (Vec<String>, Vec<Point>) = self
            .vertices
            .into_iter()
            .map(|v| (v.label, Point::new(v.x, v.y)))
            .unzip();
        let edges = self.edges.into_iter().map(|e| Edge {
            source: e.source,
            target: e.target,
            weight: e.weight,
        });
        let diagram = Diagram::new(labels, positions, edges, self.radius)?;
        Ok(match self.name {
            Some(name) => diagram.with_name(name),
            None => diagram,
        })
    }
}

impl From<&Diagram> for DiagramFile {
    fn from(diagram: &Diagram) -> Self {
        Self {
            name: diagram.name().map(ToOwned::to_owned),
            radius: diagram.radius(),
            vertices: diagram
                .vertices()
                .iter()
                .map(|v| VertexEntry {
                    label: v.label.clone(),
                    x: v.position.x,
                    y: v.position.y,
                })
                .collect(),
            edges: diagram
                .edges()
                .iter()
                .map(|e| EdgeEntry {
                    source: e.source,
                    target: e.target,
                    weight: e.weight,
                })
                .collect(),
        }
    }
}

/// Parse a diagram from JSON5 text.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON5 for the diagram schema or
/// the diagram fails validation.
pub fn parse_diagram(source: &str) -> Result<Diagram> {
    let file: DiagramFile = json5::from_str(source).context("Invalid diagram file")?;
    file.into_diagram()
}

/// Load a diagram from a JSON5 file. Unnamed diagrams take the file stem as
/// their name.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_diagram(path: &Path) -> Result<Diagram> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read diagram {}", path.display()))?;
    let diagram =
        parse_diagram(&source).with_context(|| format!("Failed to load {}", path.display()))?;
    if diagram.name().is_some() {
        return Ok(diagram);
    }
    Ok(match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => diagram.with_name(stem),
        None => diagram,
    })
}

/// Serialize a diagram as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(diagram: &Diagram) -> Result<String> {
    serde_json::to_string_pretty(&DiagramFile::from(diagram)).context("Failed to serialize diagram")
}
