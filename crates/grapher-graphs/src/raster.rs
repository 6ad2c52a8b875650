//! Bitmap rendering into an in-memory RGB buffer.

use std::path::Path;

use grapher_common::{GrapherError, Result};
use image::{ImageFormat, RgbImage};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters_backend::DrawingErrorKind;
use tracing::{debug, warn};

use crate::traits::{DrawResult, GraphRenderer, TextMode};

/// Draws `graph` into a fresh white image.
///
/// A missing system font is not fatal: the figure is drawn again without
/// text and a warning is logged.
pub fn render_image<R: GraphRenderer>(graph: &R) -> Result<RgbImage> {
    let (width, height) = graph.size().pixels();
    let mut buffer = vec![0_u8; width as usize * height as usize * 3];

    match draw_into(graph, &mut buffer, (width, height), TextMode::Full) {
        Ok(()) => {}
        Err(DrawingAreaErrorKind::BackendError(DrawingErrorKind::FontError(err))) => {
            warn!(
                graph = graph.name(),
                error = %err,
                "No usable font, rendering without text"
            );
            draw_into(graph, &mut buffer, (width, height), TextMode::Suppressed)?;
        }
        Err(err) => return Err(err.into()),
    }

    RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| GrapherError::graph("bitmap buffer does not match the figure size"))
}

fn draw_into<R: GraphRenderer>(
    graph: &R,
    buffer: &mut [u8],
    size: (u32, u32),
    text: TextMode,
) -> DrawResult<(), BitMapBackend<'static>> {
    let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
    root.fill(&WHITE)?;
    graph.draw(&root, text)?;
    root.present()?;
    Ok(())
}

/// Writes `image` as a PNG file.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| {
            GrapherError::graph_with_source(format!("cannot write {}", path.display()), err)
        })?;
    debug!(path = %path.display(), "Wrote PNG");
    Ok(())
}

/// Bounding box of the pixels that are not pure white, as
/// `(x, y, width, height)`. `None` for a blank image.
#[must_use]
pub fn content_bounds(image: &RgbImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0 == [255, 255, 255] {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Crops `image` to its content plus `pad` pixels on each side, staying
/// inside the image.
#[must_use]
pub fn crop_to_content(image: &RgbImage, pad: u32) -> RgbImage {
    let Some((x, y, w, h)) = content_bounds(image) else {
        return image.clone();
    };
    let left = x.saturating_sub(pad);
    let top = y.saturating_sub(pad);
    let right = (x + w + pad).min(image.width());
    let bottom = (y + h + pad).min(image.height());
    image::imageops::crop_imm(image, left, top, right - left, bottom - top).to_image()
}
