//! Series preparation and marker glyph geometry.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use grapher_common::Result;
use grapher_config::SeriesSpec;

use crate::geometry::{clip_polyline, dash_polyline, PixelScale, Point, View};
use crate::style::{ColorCycle, FormatToken, Marker, SeriesStyle};

/// Empty labels and labels starting with `_` (such as `_nolegend_`) stay out
/// of the legend.
#[must_use]
pub fn shows_in_legend(label: &str) -> bool {
    !label.is_empty() && !label.starts_with('_')
}

/// One series ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayer {
    /// Points in input order.
    pub points: Vec<Point>,
    /// Resolved style.
    pub style: SeriesStyle,
    /// Legend label.
    pub label: Option<String>,
}

impl SeriesLayer {
    /// Resolves the style token of `series`, drawing a colour from `cycle`
    /// when the token has none.
    pub fn prepare(series: &SeriesSpec, cycle: &mut ColorCycle) -> Result<Self> {
        let token = FormatToken::parse(&series.style)?;
        let points = series.xs().into_iter().zip(series.ys()).collect();
        Ok(Self {
            points,
            style: cycle.resolve(token),
            label: series.label.clone().filter(|label| shows_in_legend(label)),
        })
    }

    /// Whether anything of this series is drawn.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.style.marker.is_some() || self.style.line.is_some()
    }

    /// Visible line pieces after clipping to `view` and dashing.
    #[must_use]
    pub fn line_pieces(&self, view: &View, scale: &PixelScale, line_px: f64) -> Vec<Vec<Point>> {
        let Some(line) = self.style.line else {
            return Vec::new();
        };
        let pattern: Vec<f64> = line.pattern().iter().map(|len| len * line_px).collect();
        clip_polyline(&self.points, view)
            .iter()
            .flat_map(|run| dash_polyline(run, &pattern, scale))
            .collect()
    }

    /// Points whose markers are visible inside `view`.
    #[must_use]
    pub fn marker_points(&self, view: &View) -> Vec<Point> {
        if self.style.marker.is_none() {
            return Vec::new();
        }
        self.points
            .iter()
            .copied()
            .filter(|&p| p.0.is_finite() && p.1.is_finite() && view.contains(p))
            .collect()
    }
}

/// A marker outline in pixel offsets from its centre, y pointing down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Glyph {
    /// A closed shape to fill.
    Filled(Vec<(i32, i32)>),
    /// An open path to stroke. Separate strokes are joined by retracing
    /// through the centre.
    Stroked(Vec<(i32, i32)>),
}

#[allow(clippy::cast_possible_truncation)]
fn round(p: (f64, f64)) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}

/// Vertices of a regular polygon of radius `r` with one vertex at `start`
/// radians, measured counter-clockwise from the positive x axis.
#[allow(clippy::cast_precision_loss)]
fn regular(sides: usize, r: f64, start: f64) -> Vec<(i32, i32)> {
    (0..sides)
        .map(|i| {
            let angle = start + TAU * i as f64 / sides as f64;
            round((r * angle.cos(), -r * angle.sin()))
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn star(r: f64) -> Vec<(i32, i32)> {
    let inner = r * 0.381_966;
    (0..10)
        .map(|i| {
            let angle = FRAC_PI_2 + PI * i as f64 / 5.0;
            let radius = if i % 2 == 0 { r } else { inner };
            round((radius * angle.cos(), -radius * angle.sin()))
        })
        .collect()
}

fn spokes(ends: &[(f64, f64)]) -> Vec<(i32, i32)> {
    let mut path = Vec::with_capacity(ends.len() * 2 + 1);
    path.push((0, 0));
    for &end in ends {
        path.push(round(end));
        path.push((0, 0));
    }
    path
}

/// The outline of `marker` for a marker `size_px` across.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn glyph(marker: Marker, size_px: f64) -> Glyph {
    let r = size_px / 2.0;
    let tri = |start: f64| Glyph::Filled(regular(3, r, start));
    let arms = |start: f64| {
        let ends: Vec<(f64, f64)> = (0..3)
            .map(|i| {
                let angle = start + TAU * f64::from(i) / 3.0;
                (r * angle.cos(), -r * angle.sin())
            })
            .collect();
        Glyph::Stroked(spokes(&ends))
    };
    match marker {
        Marker::Point => Glyph::Filled(regular(12, (r * 0.4).max(1.0), 0.0)),
        Marker::Pixel => Glyph::Filled(vec![(0, 0), (1, 0), (1, 1), (0, 1)]),
        Marker::Circle => Glyph::Filled(regular(20, r, 0.0)),
        Marker::TriangleUp => tri(FRAC_PI_2),
        Marker::TriangleDown => tri(-FRAC_PI_2),
        Marker::TriangleLeft => tri(PI),
        Marker::TriangleRight => tri(0.0),
        Marker::TriDown => arms(-FRAC_PI_2),
        Marker::TriUp => arms(FRAC_PI_2),
        Marker::TriLeft => arms(PI),
        Marker::TriRight => arms(0.0),
        Marker::Octagon => Glyph::Filled(regular(8, r, PI / 8.0)),
        Marker::Square => Glyph::Filled(regular(4, r * std::f64::consts::SQRT_2 * 0.8, PI / 4.0)),
        Marker::Pentagon => Glyph::Filled(regular(5, r, FRAC_PI_2)),
        Marker::Star => Glyph::Filled(star(r * 1.2)),
        Marker::Hexagon1 => Glyph::Filled(regular(6, r, FRAC_PI_2)),
        Marker::Hexagon2 => Glyph::Filled(regular(6, r, 0.0)),
        Marker::Diamond => Glyph::Filled(regular(4, r, 0.0)),
        Marker::ThinDiamond => Glyph::Filled(
            regular(4, r, 0.0)
                .into_iter()
                .map(|(x, y)| ((f64::from(x) * 0.6).round() as i32, y))
                .collect(),
        ),
        Marker::Plus => Glyph::Stroked(spokes(&[(r, 0.0), (-r, 0.0), (0.0, r), (0.0, -r)])),
        Marker::Cross => {
            let d = r * std::f64::consts::FRAC_1_SQRT_2;
            Glyph::Stroked(spokes(&[(d, d), (-d, -d), (d, -d), (-d, d)]))
        }
        Marker::VLine => Glyph::Stroked(vec![round((0.0, -r)), round((0.0, r))]),
        Marker::HLine => Glyph::Stroked(vec![round((-r, 0.0)), round((r, 0.0))]),
    }
}
