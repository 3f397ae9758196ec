//! Diagram rendering.
//!
//! [`render`] turns a [`Diagram`] into a [`Canvas`] holding an SVG scene.
//! [`plot`] renders and optionally writes the result to a file whose format
//! is picked from its extension: `.svg` is written as-is, raster
//! extensions go through [`raster::rasterize_svg`] and the `image` encoders.

pub mod raster;
mod scene;
pub mod style;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat};

use crate::diagram::Diagram;
use scene::Viewport;
pub use style::Style;

/// Pixels per plotting unit unless configured otherwise.
pub const DEFAULT_SCALE: f64 = 100.0;

/// Whether a canvas is kept around after it has been written to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Write the file and release the canvas.
    #[default]
    Batch,
    /// Write the file (if any) and hand the canvas back to the caller.
    Interactive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Pixels per plotting unit.
    pub scale: f64,
    pub mode: RenderMode,
    pub style: Style,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            mode: RenderMode::default(),
            style: Style::default(),
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }
}

/// File format chosen from an output path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Raster(ImageFormat),
}

impl OutputFormat {
    /// Infer the format from `path`'s extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the path has no extension or it names a format
    /// that cannot be encoded from an RGB canvas.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .with_context(|| format!("Output path {} has no extension", path.display()))?;
        if ext.eq_ignore_ascii_case("svg") {
            return Ok(Self::Svg);
        }
        ImageFormat::from_extension(ext)
            .filter(|format| encodes_rgb8(*format))
            .map(Self::Raster)
            .with_context(|| format!("Unsupported output format .{ext} for {}", path.display()))
    }
}

/// Raster formats whose encoder takes an 8-bit RGB image of any size.
const fn encodes_rgb8(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png
            | ImageFormat::Jpeg
            | ImageFormat::Bmp
            | ImageFormat::Gif
            | ImageFormat::Tga
            | ImageFormat::Tiff
            | ImageFormat::Pnm
            | ImageFormat::WebP
            | ImageFormat::Qoi
    )
}

/// A rendered diagram: an SVG scene of known pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    svg: String,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Rasterize the canvas at its native pixel size.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization fails.
    pub fn to_image(&self) -> Result<DynamicImage> {
        raster::rasterize_svg(&self.svg, self.width)
    }

    /// Write the canvas to `path`, keeping it available afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is unsupported, rasterization fails,
    /// or the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let _scope = crate::perf::scope("render.write");
        match OutputFormat::from_path(path)? {
            OutputFormat::Svg => fs::write(path, &self.svg)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            OutputFormat::Raster(format) => {
                // The background is opaque, so dropping alpha keeps every
                // encoder (JPEG included) happy.
                let rgb = DynamicImage::ImageRgb8(self.to_image()?.to_rgb8());
                rgb.save_with_format(path, format)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        crate::perf::log_event(
            "render.write",
            format!("{} {}x{}", path.display(), self.width, self.height),
        );
        tracing::info!(path = %path.display(), "wrote diagram");
        Ok(())
    }

    /// Write the canvas to `path` and release it.
    ///
    /// # Errors
    ///
    /// See [`Canvas::write_to`].
    pub fn save(self, path: &Path) -> Result<()> {
        self.write_to(path)
    }
}

/// Render `diagram` into an in-memory canvas.
pub fn render(diagram: &Diagram, options: &RenderOptions) -> Canvas {
    let _scope = crate::perf::scope("render.svg");
    let viewport = Viewport::for_diagram(diagram, options.scale);
    let (width, height) = viewport.size_px();
    tracing::debug!(
        name = diagram.name().unwrap_or("<unnamed>"),
        vertices = diagram.vertices().len(),
        edges = diagram.edges().len(),
        width,
        height,
        "rendering diagram"
    );
    let svg = scene::build_svg(diagram, &options.style, viewport);
    crate::perf::log_event(
        "render.svg",
        format!(
            "{} bytes={} size={width}x{height}",
            diagram.name().unwrap_or("<unnamed>"),
            svg.len()
        ),
    );
    Canvas { svg, width, height }
}

/// Render `diagram` and write it to `output` if given.
///
/// Without an output path the canvas is always returned. With one, the
/// canvas is returned only in [`RenderMode::Interactive`].
///
/// # Errors
///
/// Returns an error if writing the output file fails.
pub fn plot(
    diagram: &Diagram,
    options: &RenderOptions,
    output: Option<&Path>,
) -> Result<Option<Canvas>> {
    let canvas = render(diagram, options);
    let Some(path) = output else {
        return Ok(Some(canvas));
    };
    match options.mode {
        RenderMode::Batch => {
            canvas.save(path)?;
            Ok(None)
        }
        RenderMode::Interactive => {
            canvas.write_to(path)?;
            Ok(Some(canvas))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::Edge;
    use tempfile::tempdir;

    fn triangle() -> Diagram {
        Diagram::new(
            ["a", "b", "c"],
            [(1.0, 1.0), (3.0, 1.0), (2.0, 2.5)],
            [Edge::weighted(0, 1, 2), Edge::new(1, 2), Edge::weighted(2, 0, 4.5)],
            0.3,
        )
        .unwrap()
        .with_name("triangle")
    }

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("a.svg")).unwrap(),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("a.PNG")).unwrap(),
            OutputFormat::Raster(ImageFormat::Png)
        );
        assert!(OutputFormat::from_path(Path::new("a")).is_err());
        assert!(OutputFormat::from_path(Path::new("a.nope")).is_err());
        assert_eq!(
            OutputFormat::from_path(Path::new("a.jpg")).unwrap(),
            OutputFormat::Raster(ImageFormat::Jpeg)
        );
        for ext in ["dds", "hdr", "exr", "ff", "ico"] {
            let path = format!("a.{ext}");
            assert!(OutputFormat::from_path(Path::new(&path)).is_err(), "{ext}");
        }
    }

    #[test]
    fn test_canvas_size_follows_extent_and_scale() {
        let canvas = render(&triangle(), &RenderOptions::default().with_scale(50.0));
        assert_eq!((canvas.width(), canvas.height()), (200, 175));
    }

    #[test]
    fn test_render_is_deterministic() {
        let options = RenderOptions::default();
        let first = render(&triangle(), &options);
        let second = render(&triangle(), &options);
        assert_eq!(first, second);
        assert_eq!(
            first.to_image().unwrap().as_bytes(),
            second.to_image().unwrap().as_bytes()
        );
    }

    #[test]
    fn test_plot_without_output_returns_canvas() {
        let canvas = plot(&triangle(), &RenderOptions::default(), None).unwrap();
        assert!(canvas.is_some());
    }

    #[test]
    fn test_plot_batch_writes_and_releases() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("triangle.png");
        let canvas = plot(&triangle(), &RenderOptions::default(), Some(&path)).unwrap();
        assert!(canvas.is_none());
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (400, 350));
    }

    #[test]
    fn test_plot_interactive_writes_and_keeps_canvas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("triangle.svg");
        let options = RenderOptions::default().with_mode(RenderMode::Interactive);
        let canvas = plot(&triangle(), &options, Some(&path)).unwrap().unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, canvas.svg());
    }

    #[test]
    fn test_plot_rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("triangle.nope");
        assert!(plot(&triangle(), &RenderOptions::default(), Some(&path)).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_plot_rejects_format_without_rgb_encoder() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("triangle.dds");
        assert!(plot(&triangle(), &RenderOptions::default(), Some(&path)).is_err());
        assert!(!path.exists());
    }
}
