//! SVG scene generation.
//!
//! Diagram coordinates have y growing upward; the scene maps them into
//! image space with y growing downward, at `scale` pixels per unit on both
//! axes so circles stay circular.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use super::style::Style;
use crate::diagram::{Arrow, Diagram, Point};

/// Average advance of a monospace glyph, as a fraction of the font size.
const GLYPH_ASPECT: f64 = 0.6;

/// Maps plotting units to pixel space.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Viewport {
    pub scale: f64,
    pub extent: Point,
}

impl Viewport {
    pub fn for_diagram(diagram: &Diagram, scale: f64) -> Self {
        Self {
            scale,
            extent: diagram.extent(),
        }
    }

    pub fn to_px(self, p: Point) -> (f64, f64) {
        (p.x * self.scale, (self.extent.y - p.y) * self.scale)
    }

    /// Pixel dimensions, rounded up so nothing on the boundary is clipped.
    pub fn size_px(self) -> (u32, u32) {
        (
            (self.extent.x * self.scale).ceil().max(1.0) as u32,
            (self.extent.y * self.scale).ceil().max(1.0) as u32,
        )
    }
}

/// Build the full SVG document for `diagram`.
pub(crate) fn build_svg(diagram: &Diagram, style: &Style, viewport: Viewport) -> String {
    let (width, height) = viewport.size_px();
    let pt = Style::px_per_point(viewport.scale);
    let mut svg = String::new();

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    );
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        style.background
    );

    let radius_px = diagram.radius() * viewport.scale;
    let vertex_font_px = style.vertex_font_size * pt;
    for vertex in diagram.vertices() {
        let (cx, cy) = viewport.to_px(vertex.position);
        let _ = write!(
            svg,
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{radius_px:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            style.vertex_fill,
            style.vertex_stroke,
            style.vertex_stroke_width * pt,
        );
        push_text(&mut svg, cx, cy, &vertex.label, vertex_font_px, style);
    }

    let arrows = diagram.arrows();
    for arrow in &arrows {
        push_arrow(&mut svg, arrow, style, viewport);
    }

    // Weight labels go on top of every arrow, not just their own.
    let weight_font_px = style.weight_font_size * pt;
    for (edge, arrow) in diagram.edges().iter().zip(&arrows) {
        if let Some(label) = edge.label() {
            let (x, y) = viewport.to_px(arrow.midpoint());
            push_label_box(&mut svg, x, y, &label, weight_font_px, style);
            push_text(&mut svg, x, y, &label, weight_font_px, style);
        }
    }

    svg.push_str("</svg>");
    svg
}

fn push_arrow(svg: &mut String, arrow: &Arrow, style: &Style, viewport: Viewport) {
    let outline = arrow.outline(style.arrow_width, style.head_width, style.head_length);
    let points = outline
        .points
        .iter()
        .map(|p| {
            let (x, y) = viewport.to_px(*p);
            format!("{x:.2},{y:.2}")
        })
        .collect::<Vec<_>>()
        .join(" ");
    let _ = write!(
        svg,
        "<polygon points=\"{points}\" fill=\"{}\"/>",
        style.arrow_fill
    );
}

fn push_text(svg: &mut String, x: f64, y: f64, text: &str, font_px: f64, style: &Style) {
    let _ = write!(
        svg,
        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{font_px:.2}\" fill=\"{}\">{}</text>",
        escape_xml(&style.font_family),
        style.text_color,
        escape_xml(text)
    );
}

/// Opaque box behind a weight label so crossing arrows don't run through it.
fn push_label_box(svg: &mut String, x: f64, y: f64, text: &str, font_px: f64, style: &Style) {
    let (w, h) = label_box_size(text, font_px);
    let _ = write!(
        svg,
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" fill=\"{}\"/>",
        x - w / 2.0,
        y - h / 2.0,
        style.weight_background
    );
}

/// Box size for `text` at `font_px`, padded by a fifth of the font size.
pub(crate) fn label_box_size(text: &str, font_px: f64) -> (f64, f64) {
    let pad = font_px * 0.2;
    let columns = text.width() as f64;
    (columns * font_px * GLYPH_ASPECT + 2.0 * pad, font_px + 2.0 * pad)
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
