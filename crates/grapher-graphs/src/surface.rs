//! The symmetry factor as a 3-D surface.
//!
//! The surface is rendered into memory only. Saving the frame is left to the
//! caller through [`SurfaceView::save`].

use std::f64::consts::PI;
use std::path::Path;

use grapher_common::Result;
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_backend::DrawingBackend;
use tracing::info;

use crate::contour::arange;
use crate::figure::FigureSize;
use crate::output::ensure_parent;
use crate::raster::{render_image, save_png};
use crate::symmetry::symmetry_factor;
use crate::text::font;
use crate::traits::{DrawResult, GraphRenderer, TextMode};

/// Grid spacing of the surface mesh.
pub const SURFACE_STEP: f64 = 0.1;
/// Upper limit of the vertical axis; values above it are clipped.
pub const SURFACE_Z_MAX: f64 = 2.0;
/// Tick count on the vertical axis.
pub const SURFACE_Z_TICKS: usize = 10;

const COOLWARM: [(f64, (u8, u8, u8)); 5] = [
    (0.0, (59, 76, 192)),
    (0.25, (141, 176, 254)),
    (0.5, (221, 220, 219)),
    (0.75, (244, 154, 123)),
    (1.0, (180, 4, 38)),
];

/// The coolwarm colour map at `t` in `[0, 1]`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn coolwarm(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let upper = COOLWARM
        .iter()
        .position(|&(stop, _)| stop >= t)
        .unwrap_or(COOLWARM.len() - 1)
        .max(1);
    let (t0, c0) = COOLWARM[upper - 1];
    let (t1, c1) = COOLWARM[upper];
    let f = (t - t0) / (t1 - t0);
    let mix = |a: u8, b: u8| (f64::from(a) + f * (f64::from(b) - f64::from(a))).round() as u8;
    RGBColor(mix(c0.0, c1.0), mix(c0.1, c1.1), mix(c0.2, c1.2))
}

/// The 3-D surface of the symmetry factor for one `alpha`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePlot {
    alpha: f64,
    axis: Vec<f64>,
    size: FigureSize,
}

impl SurfacePlot {
    /// A surface for `alpha` on the default mesh.
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            axis: arange(-PI, PI + 0.001, SURFACE_STEP),
            size: FigureSize::default(),
        }
    }

    /// Height of the surface at `(x, y)`, clipped to the vertical axis.
    #[must_use]
    pub fn height(&self, x: f64, y: f64) -> f64 {
        symmetry_factor(self.alpha, x, y).min(SURFACE_Z_MAX)
    }

    /// Mesh nodes along each horizontal axis.
    #[must_use]
    pub fn axis(&self) -> &[f64] {
        &self.axis
    }
}

impl GraphRenderer for SurfacePlot {
    fn size(&self) -> FigureSize {
        self.size
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        text: TextMode,
    ) -> DrawResult<(), DB> {
        let full = text == TextMode::Full;
        let tick_px = self.size.points_to_px(crate::text::TICK_POINTS);
        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .build_cartesian_3d(-PI..PI, 0.0..SURFACE_Z_MAX, -PI..PI)?;
        chart.with_projection(|mut pb| {
            pb.yaw = 0.6;
            pb.pitch = 0.45;
            pb.scale = 0.75;
            pb.into_matrix()
        });

        let height_label = |value: &f64| format!("{value:.2}");
        let plane_label = |value: &f64| format!("{value:.0}");
        chart
            .configure_axes()
            .x_labels(if full { 7 } else { 0 })
            .y_labels(if full { SURFACE_Z_TICKS } else { 0 })
            .z_labels(if full { 7 } else { 0 })
            .x_formatter(&plane_label)
            .y_formatter(&height_label)
            .z_formatter(&plane_label)
            .label_style(font(tick_px))
            .max_light_lines(3)
            .draw()?;

        let color_of = |z: &f64| coolwarm(*z / SURFACE_Z_MAX).filled();
        chart.draw_series(
            SurfaceSeries::xoz(
                self.axis.iter().copied(),
                self.axis.iter().copied(),
                |x, y| self.height(x, y),
            )
            .style_func(&color_of),
        )?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "symmetry factor surface"
    }
}

/// A rendered surface frame held in memory.
#[derive(Debug, Clone)]
pub struct SurfaceView {
    /// The `alpha` the surface was drawn for.
    pub alpha: f64,
    /// Mesh nodes per horizontal axis.
    pub nodes: usize,
    /// The rendered frame.
    pub image: RgbImage,
}

impl SurfaceView {
    /// Writes the frame as a PNG file.
    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        save_png(&self.image, path)?;
        info!(alpha = self.alpha, path = %path.display(), "Saved surface preview");
        Ok(())
    }
}

/// Renders the surface for `alpha` into memory.
pub fn render_surface(alpha: f64) -> Result<SurfaceView> {
    let plot = SurfacePlot::new(alpha);
    let image = render_image(&plot)?;
    info!(
        alpha,
        width = image.width(),
        height = image.height(),
        "Rendered symmetry factor surface"
    );
    Ok(SurfaceView {
        alpha,
        nodes: plot.axis.len(),
        image,
    })
}
