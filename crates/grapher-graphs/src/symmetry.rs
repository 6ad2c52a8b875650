//! The symmetry factor `|sin x + α sin y|` as a filled contour with a
//! colour bar.

use std::f64::consts::PI;
use std::path::PathBuf;

use grapher_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_backend::DrawingBackend;
use tracing::info;

use crate::contour::{arange, filled_runs, nice_levels, FilledRun, Grid};
use crate::figure::FigureSize;
use crate::output::{ensure_parent, output_path};
use crate::raster::{crop_to_content, render_image, save_png};
use crate::text::font;
use crate::ticks::TickFormat;
use crate::traits::{DrawResult, GraphRenderer, TextMode};

/// Grid spacing of the contour plot.
pub const CONTOUR_STEP: f64 = 0.01;
/// Number of filled bands.
pub const CONTOUR_BANDS: usize = 20;
/// Resolution of the contour PNG.
pub const CONTOUR_DPI: f64 = 200.0;
/// Padding kept around the content when cropping, in inches.
pub const CROP_PAD_IN: f64 = 0.1;
/// Tick label size in points.
pub const CONTOUR_TICK_POINTS: f64 = 10.0;
/// Tick label size in points with `large_font`.
pub const CONTOUR_LARGE_TICK_POINTS: f64 = 18.0;

/// `|sin x + alpha * sin y|`.
#[must_use]
pub fn symmetry_factor(alpha: f64, x: f64, y: f64) -> f64 {
    (x.sin() + alpha * y.sin()).abs()
}

/// The symmetry factor sampled on `arange(-π, π + 0.001, step)` along both
/// axes.
#[must_use]
pub fn symmetry_grid(alpha: f64, step: f64) -> Grid {
    let axis = arange(-PI, PI + 0.001, step);
    Grid::sample(axis.clone(), axis, |x, y| symmetry_factor(alpha, x, y))
}

/// The colour of `band` out of `bands` in the binary map: the lowest band
/// is white and the highest black.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn band_color(band: usize, bands: usize) -> RGBColor {
    let t = if bands > 1 {
        band.min(bands - 1) as f64 / (bands - 1) as f64
    } else {
        0.0
    };
    let grey = (255.0 * (1.0 - t)).round() as u8;
    RGBColor(grey, grey, grey)
}

/// A filled contour figure with a colour bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourPlot {
    size: FigureSize,
    x: (f64, f64),
    y: (f64, f64),
    levels: Vec<f64>,
    runs: Vec<FilledRun>,
    tick_points: f64,
}

impl ContourPlot {
    /// Lays out the filled contour of `grid` with `bands` bands.
    #[must_use]
    pub fn new(grid: &Grid, bands: usize, size: FigureSize, tick_points: f64) -> Self {
        let (lo, hi) = grid.range().unwrap_or((0.0, 1.0));
        let levels = nice_levels(lo, hi, bands);
        let bounds = |axis: &[f64]| {
            (
                axis.first().copied().unwrap_or(0.0),
                axis.last().copied().unwrap_or(1.0),
            )
        };
        Self {
            size,
            x: bounds(&grid.xs),
            y: bounds(&grid.ys),
            runs: filled_runs(grid, &levels),
            levels,
            tick_points,
        }
    }

    /// Contour levels, lowest first.
    #[must_use]
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Filled runs in draw order.
    #[must_use]
    pub fn runs(&self) -> &[FilledRun] {
        &self.runs
    }

    fn bands(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn px(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

impl GraphRenderer for ContourPlot {
    fn size(&self) -> FigureSize {
        self.size
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        text: TextMode,
    ) -> DrawResult<(), DB> {
        let full = text == TextMode::Full;
        let (width, _) = self.size.pixels();
        let tick_px = self.size.points_to_px(self.tick_points);
        let margin = px(tick_px);
        let x_area = px(tick_px * 2.5);

        let (main, bar) = root.split_horizontally(px(f64::from(width) * 0.8));

        let mut chart = ChartBuilder::on(&main)
            .margin(margin)
            .x_label_area_size(x_area)
            .y_label_area_size(px(tick_px * 3.0))
            .build_cartesian_2d(self.x.0..self.x.1, self.y.0..self.y.1)?;
        let general = TickFormat::parse("%g").unwrap_or_default();
        let axis_label = |value: &f64| general.format(*value);
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(if full { 7 } else { 0 })
            .y_labels(if full { 7 } else { 0 })
            .x_label_formatter(&axis_label)
            .y_label_formatter(&axis_label)
            .label_style(font(tick_px))
            .axis_style(BLACK)
            .draw()?;
        let bands = self.bands();
        chart.draw_series(self.runs.iter().map(|run| {
            Rectangle::new([run.from, run.to], band_color(run.band, bands).filled())
        }))?;

        let (Some(&lo), Some(&hi)) = (self.levels.first(), self.levels.last()) else {
            return Ok(());
        };
        let mut colorbar = ChartBuilder::on(&bar)
            .margin_top(margin)
            .margin_bottom(margin + x_area)
            .margin_left(margin)
            .right_y_label_area_size(px(tick_px * 3.0))
            .build_cartesian_2d(0.0..1.0, lo..hi)?;
        let bar_label = |value: &f64| format!("{value:.1}");
        colorbar
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .x_labels(0)
            .y_labels(if full { bands / 2 + 1 } else { 0 })
            .y_label_formatter(&bar_label)
            .label_style(font(tick_px))
            .axis_style(BLACK)
            .draw()?;
        colorbar.draw_series(self.levels.windows(2).enumerate().map(|(band, pair)| {
            Rectangle::new([(0.0, pair[0]), (1.0, pair[1])], band_color(band, bands).filled())
        }))?;
        colorbar.draw_series(std::iter::once(Rectangle::new(
            [(0.0, lo), (1.0, hi)],
            BLACK.stroke_width(1),
        )))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "symmetry factor contour"
    }
}

/// The contour figure for `alpha` at the contour resolution.
#[must_use]
pub fn contour_plot(alpha: f64, large_font: bool) -> ContourPlot {
    let tick_points = if large_font {
        CONTOUR_LARGE_TICK_POINTS
    } else {
        CONTOUR_TICK_POINTS
    };
    ContourPlot::new(
        &symmetry_grid(alpha, CONTOUR_STEP),
        CONTOUR_BANDS,
        FigureSize::default().with_dpi(CONTOUR_DPI),
        tick_points,
    )
}

/// Renders the filled contour for `alpha` to `<stem>.png`, cropped to its
/// content, and returns the path written.
pub fn render_contour(alpha: f64, stem: &str, large_font: bool) -> Result<PathBuf> {
    let plot = contour_plot(alpha, large_font);
    let image = render_image(&plot)?;
    let pad = u32::try_from(plot.size.inches_to_px(CROP_PAD_IN)).unwrap_or(0);
    let cropped = crop_to_content(&image, pad);

    let path = output_path(stem, "png");
    ensure_parent(&path)?;
    save_png(&cropped, &path)?;
    info!(
        alpha,
        path = %path.display(),
        width = cropped.width(),
        height = cropped.height(),
        "Saved symmetry factor contour"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_symmetry_factor_values() {
        assert_eq!(symmetry_factor(-1.0, FRAC_PI_2, FRAC_PI_2), 0.0);
        assert_eq!(symmetry_factor(1.0, FRAC_PI_2, FRAC_PI_2), 2.0);
        assert_eq!(symmetry_factor(0.5, 0.0, -FRAC_PI_2), 0.5);
    }

    #[test]
    fn test_band_colors_run_white_to_black() {
        assert_eq!(band_color(0, 20), RGBColor(255, 255, 255));
        assert_eq!(band_color(19, 20), RGBColor(0, 0, 0));
        assert_eq!(band_color(0, 1), RGBColor(255, 255, 255));
    }

    #[test]
    fn test_contour_layout_on_coarse_grid() {
        let grid = symmetry_grid(1.0, 0.1);
        assert_eq!(grid.xs.len(), 63);
        let size = FigureSize::default();
        let plot = ContourPlot::new(&grid, CONTOUR_BANDS, size, CONTOUR_TICK_POINTS);
        assert_eq!(plot.levels().first(), Some(&0.0));
        assert!(plot.levels().len() <= CONTOUR_BANDS + 1);
        assert!(plot.runs().iter().all(|run| run.band < plot.bands()));
    }

    #[test]
    fn test_large_font_changes_tick_size() {
        let normal = contour_plot(-1.0, false);
        let large = contour_plot(-1.0, true);
        assert_eq!(normal.tick_points, CONTOUR_TICK_POINTS);
        assert_eq!(large.tick_points, CONTOUR_LARGE_TICK_POINTS);
        assert_eq!(normal.size.pixels(), (1280, 960));
    }
}
