//! Visual constants for rendered diagrams.
//!
//! Font sizes and stroke widths are in points, with one plotting unit taken
//! as one inch. Arrow dimensions are in plotting units so they stay
//! proportional to the vertex circles.

/// Colors, fonts and arrow sizing used by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub background: String,
    pub vertex_fill: String,
    pub vertex_stroke: String,
    /// Circle outline width in points.
    pub vertex_stroke_width: f64,
    pub font_family: String,
    pub text_color: String,
    /// Vertex label size in points.
    pub vertex_font_size: f64,
    /// Weight label size in points.
    pub weight_font_size: f64,
    pub weight_background: String,
    pub arrow_fill: String,
    /// Shaft width in plotting units.
    pub arrow_width: f64,
    /// Head width in plotting units.
    pub head_width: f64,
    /// Head length in plotting units, included in the arrow's length.
    pub head_length: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            vertex_fill: "#b2df8a".to_string(),
            vertex_stroke: "#33a02c".to_string(),
            vertex_stroke_width: 2.0,
            font_family: "Monaco, Menlo, 'DejaVu Sans Mono', monospace".to_string(),
            text_color: "#000000".to_string(),
            vertex_font_size: 24.0,
            weight_font_size: 16.0,
            weight_background: "#ffffff".to_string(),
            arrow_fill: "#131926".to_string(),
            arrow_width: 0.02,
            head_width: 0.1,
            head_length: 0.09,
        }
    }
}

impl Style {
    /// Pixels per point for a canvas drawn at `scale` pixels per unit.
    ///
    /// The default scale of 100 matches a 100 dpi figure one inch per unit.
    pub fn px_per_point(scale: f64) -> f64 {
        scale / 72.0
    }
}
