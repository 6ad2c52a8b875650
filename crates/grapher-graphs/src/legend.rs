//! Legend placement.

use grapher_config::LegendLoc;
use plotters::chart::SeriesLabelPosition;

use crate::geometry::{Point, View};
use crate::text::approx_width;

/// Locations tried for `best`, in the order ties are broken.
const CANDIDATES: [LegendLoc; 9] = [
    LegendLoc::UpperRight,
    LegendLoc::UpperLeft,
    LegendLoc::LowerLeft,
    LegendLoc::LowerRight,
    LegendLoc::CenterRight,
    LegendLoc::CenterLeft,
    LegendLoc::LowerCenter,
    LegendLoc::UpperCenter,
    LegendLoc::Center,
];

/// Width of the glyph column of a legend row, in pixels.
pub const GLYPH_PX: f64 = 28.0;

/// A legend box to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// First row, drawn without a glyph.
    pub title: Option<String>,
    /// Labels of the entries, in series order.
    pub labels: Vec<String>,
    /// Requested location; [`LegendLoc::Best`] is resolved against the data.
    pub loc: LegendLoc,
    /// Text size in pixels.
    pub font_px: f64,
}

impl Legend {
    /// Approximate box size in pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn box_size(&self) -> (f64, f64) {
        let rows = self.labels.len() + usize::from(self.title.is_some());
        let widest = self
            .title
            .iter()
            .chain(&self.labels)
            .map(|text| approx_width(text, self.font_px))
            .fold(0.0, f64::max);
        (
            widest + GLYPH_PX + 20.0,
            rows as f64 * (self.font_px + 5.0) + 10.0,
        )
    }

    /// The location to draw at, given the visible data and the plotting
    /// area size in pixels.
    #[must_use]
    pub fn resolve(&self, points: &[Point], view: &View, area: (u32, u32)) -> LegendLoc {
        if self.loc != LegendLoc::Best {
            return self.loc;
        }
        let (w, h) = self.box_size();
        let frac = (
            w / f64::from(area.0.max(1)),
            h / f64::from(area.1.max(1)),
        );
        best_location(points, view, frac)
    }
}

/// Picks the candidate location whose box covers the fewest `points`.
///
/// `box_frac` is the box size as a fraction of the plotting area.
#[must_use]
pub fn best_location(points: &[Point], view: &View, box_frac: (f64, f64)) -> LegendLoc {
    let (w, h) = (box_frac.0.min(1.0), box_frac.1.min(1.0));
    let fractions: Vec<Point> = points
        .iter()
        .filter(|p| view.contains(**p))
        .map(|&(x, y)| {
            (
                (x - view.x.min) / view.x.span(),
                (y - view.y.min) / view.y.span(),
            )
        })
        .collect();

    let mut best = (LegendLoc::UpperRight, usize::MAX);
    for loc in CANDIDATES {
        let (left, bottom) = anchor(loc, w, h);
        let covered = fractions
            .iter()
            .filter(|(x, y)| *x >= left && *x <= left + w && *y >= bottom && *y <= bottom + h)
            .count();
        if covered < best.1 {
            best = (loc, covered);
        }
    }
    best.0
}

/// Lower-left corner, as area fractions, of a `w` by `h` box at `loc`.
fn anchor(loc: LegendLoc, w: f64, h: f64) -> (f64, f64) {
    let left = match loc {
        LegendLoc::UpperLeft | LegendLoc::LowerLeft | LegendLoc::CenterLeft => 0.0,
        LegendLoc::LowerCenter | LegendLoc::UpperCenter | LegendLoc::Center => (1.0 - w) / 2.0,
        _ => 1.0 - w,
    };
    let bottom = match loc {
        LegendLoc::LowerLeft | LegendLoc::LowerRight | LegendLoc::LowerCenter => 0.0,
        LegendLoc::CenterLeft | LegendLoc::CenterRight | LegendLoc::Right | LegendLoc::Center => {
            (1.0 - h) / 2.0
        }
        _ => 1.0 - h,
    };
    (left, bottom)
}

/// The plotters position for a resolved location.
#[must_use]
pub const fn label_position(loc: LegendLoc) -> SeriesLabelPosition {
    match loc {
        LegendLoc::Best | LegendLoc::UpperRight => SeriesLabelPosition::UpperRight,
        LegendLoc::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendLoc::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendLoc::LowerRight => SeriesLabelPosition::LowerRight,
        LegendLoc::Right | LegendLoc::CenterRight => SeriesLabelPosition::MiddleRight,
        LegendLoc::CenterLeft => SeriesLabelPosition::MiddleLeft,
        LegendLoc::LowerCenter => SeriesLabelPosition::LowerMiddle,
        LegendLoc::UpperCenter => SeriesLabelPosition::UpperMiddle,
        LegendLoc::Center => SeriesLabelPosition::MiddleMiddle,
    }
}
