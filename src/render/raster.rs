//! SVG rasterization.
//!
//! Rasterizes rendered diagram SVG with `resvg` into an `image` buffer.

use std::sync::{Arc, LazyLock};

use anyhow::Result;
use image::DynamicImage;
use resvg::usvg::fontdb;

static FONTS: LazyLock<Arc<fontdb::Database>> = LazyLock::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded system fonts");
    Arc::new(db)
});

/// Rasterize an SVG string to a `DynamicImage`.
///
/// Scales the SVG so its width matches `target_width_px`, preserving aspect
/// ratio.
///
/// # Errors
///
/// Returns an error if the SVG cannot be parsed or the pixmap cannot be
/// allocated.
pub fn rasterize_svg(svg: &str, target_width_px: u32) -> Result<DynamicImage> {
    let _scope = crate::perf::scope("render.rasterize");

    let opts = resvg::usvg::Options {
        fontdb: Arc::clone(&FONTS),
        ..Default::default()
    };

    let tree = resvg::usvg::Tree::from_str(svg, &opts)?;
    let size = tree.size();

    #[allow(clippy::cast_precision_loss)]
    let scale = target_width_px as f32 / size.width();

    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("failed to create pixmap {width}x{height}"))?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let rgba = pixmap.data().to_vec();
    let img_buf = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| anyhow::anyhow!("failed to create image from pixmap data"))?;

    crate::perf::log_event("render.rasterize", format!("{width}x{height}"));
    Ok(DynamicImage::ImageRgba8(img_buf))
}
