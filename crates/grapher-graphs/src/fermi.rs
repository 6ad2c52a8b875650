//! Fermi surface of the hole band over the first Brillouin zone.
//!
//! The band energy is sampled on a square grid, reduced to an occupation
//! field of zeros and ones, and the boundary between them is traced as a
//! contour at level 0.5.

use std::f64::consts::PI;

use grapher_config::FermiParams;
use plotters::style::RGBColor;

use crate::contour::{arange, marching_squares, Grid};
use crate::figure::{AxisRange, FigureSize};
use crate::geometry::{Point, View};
use crate::painter::{Layer, Plot};
use crate::ticks::TickFormat;

/// Grid spacing in reciprocal lattice units.
pub const GRID_STEP: f64 = 0.05;
/// Contour level separating empty from occupied states.
pub const FERMI_LEVEL: f64 = 0.5;
/// Line colour of the surface.
pub const SURFACE_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Hole band energy at `(kx, ky)`.
#[must_use]
pub fn band_energy(params: &FermiParams, kx: f64, ky: f64) -> f64 {
    let (sx, sy) = (kx.sin(), ky.sin());
    2.0 * params.th * ((sx + sy).powi(2) - 1.0)
        + 4.0 * (2.0 * params.d1 * params.t0 - params.thp) * sx * sy
        - params.mu_h
}

/// `1.0` where the band energy is non-negative, `0.0` elsewhere.
#[must_use]
pub fn occupation(params: &FermiParams, kx: f64, ky: f64) -> f64 {
    if band_energy(params, kx, ky) >= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// The occupation field sampled on `arange(-π, π, 0.05)` along both axes.
#[must_use]
pub fn fermi_field(params: &FermiParams) -> Grid {
    let axis = arange(-PI, PI, GRID_STEP);
    Grid::sample(axis.clone(), axis, |kx, ky| occupation(params, kx, ky))
}

/// Contour segments of the Fermi surface.
#[must_use]
pub fn fermi_segments(params: &FermiParams) -> Vec<(Point, Point)> {
    marching_squares(&fermi_field(params), FERMI_LEVEL)
}

/// The Fermi surface figure: the zone boundary at ±π on both axes, no axis
/// labels and no legend.
#[must_use]
pub fn fermi_plot(
    params: &FermiParams,
    size: FigureSize,
    ticks: TickFormat,
    num_ticks: usize,
) -> Plot {
    let zone = AxisRange::new(-PI, PI);
    Plot {
        name: "Fermi surface",
        size,
        view: View { x: zone, y: zone },
        xlabel: String::new(),
        ylabel: String::new(),
        label_points: 0.0,
        ticks,
        num_ticks,
        layers: vec![Layer::Segments {
            segments: fermi_segments(params),
            color: SURFACE_COLOR,
        }],
        legend: None,
    }
}
