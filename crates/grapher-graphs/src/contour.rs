//! Sampled grids, contour lines and filled contour bands.

use crate::geometry::Point;

/// Evenly spaced values in `[start, stop)`.
///
/// The length is `ceil((stop - start) / step)`; a non-positive step or an
/// empty interval gives no values.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || stop <= start {
        return Vec::new();
    }
    let count = ((stop - start) / step).ceil() as usize;
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// A function sampled on the cartesian product of two axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Sample positions along x.
    pub xs: Vec<f64>,
    /// Sample positions along y.
    pub ys: Vec<f64>,
    values: Vec<f64>,
}

impl Grid {
    /// Samples `f(x, y)` at every grid node.
    pub fn sample(xs: Vec<f64>, ys: Vec<f64>, f: impl Fn(f64, f64) -> f64) -> Self {
        let values = ys
            .iter()
            .flat_map(|&y| xs.iter().map(move |&x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self { xs, ys, values }
    }

    /// The value at column `i`, row `j`.
    #[must_use]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.xs.len() + i]
    }

    /// Every sampled value, row by row.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Smallest and largest finite value; `None` when there is none.
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let columns = self.xs.len().saturating_sub(1);
        (0..self.ys.len().saturating_sub(1)).flat_map(move |j| (0..columns).map(move |i| (i, j)))
    }
}

/// Line segments where `grid` crosses `level` (marching squares).
///
/// A node counts as inside when its value is at least `level`. Saddle cells
/// are split by the average of their four corners.
#[must_use]
pub fn marching_squares(grid: &Grid, level: f64) -> Vec<(Point, Point)> {
    let mut segments = Vec::new();
    for (i, j) in grid.cells() {
        let corners = [
            (grid.xs[i], grid.ys[j], grid.at(i, j)),
            (grid.xs[i + 1], grid.ys[j], grid.at(i + 1, j)),
            (grid.xs[i + 1], grid.ys[j + 1], grid.at(i + 1, j + 1)),
            (grid.xs[i], grid.ys[j + 1], grid.at(i, j + 1)),
        ];
        let inside = corners.map(|(_, _, v)| v >= level);
        let crossing = |a: usize, b: usize| -> Option<Point> {
            if inside[a] == inside[b] {
                return None;
            }
            let (xa, ya, va) = corners[a];
            let (xb, yb, vb) = corners[b];
            let t = if vb == va { 0.5 } else { (level - va) / (vb - va) };
            Some((xa + t * (xb - xa), ya + t * (yb - ya)))
        };
        let bottom = crossing(0, 1);
        let right = crossing(1, 2);
        let top = crossing(3, 2);
        let left = crossing(0, 3);

        match (bottom, right, top, left) {
            (Some(b), Some(r), Some(t), Some(l)) => {
                let centre = corners.iter().map(|c| c.2).sum::<f64>() / 4.0;
                if (centre >= level) == inside[0] {
                    segments.push((b, r));
                    segments.push((t, l));
                } else {
                    segments.push((l, b));
                    segments.push((r, t));
                }
            }
            _ => {
                let crossed: Vec<Point> = [bottom, right, top, left].into_iter().flatten().collect();
                if let [a, b] = crossed[..] {
                    segments.push((a, b));
                }
            }
        }
    }
    segments
}

/// Contour levels on round numbers covering `[min, max]` with at most
/// `bands` bands.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn nice_levels(min: f64, max: f64, bands: usize) -> Vec<f64> {
    let bands = bands.max(1);
    let (min, max) = if max > min { (min, max) } else { (min - 0.5, min + 0.5) };
    let raw = (max - min) / bands as f64;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&step| {
            let lo = (min / step + 1e-9).floor();
            let hi = (max / step - 1e-9).ceil();
            hi - lo <= bands as f64
        })
        .unwrap_or(magnitude * 10.0);
    let lo = (min / step + 1e-9).floor() as i64;
    let hi = (max / step - 1e-9).ceil() as i64;
    (lo..=hi).map(|k| k as f64 * step).collect()
}

/// The band of `levels` that `value` falls in. The top band includes its
/// upper level; values outside the levels belong to no band.
#[must_use]
pub fn band_index(levels: &[f64], value: f64) -> Option<usize> {
    let (&first, &last) = (levels.first()?, levels.last()?);
    if levels.len() < 2 || !(first..=last).contains(&value) {
        return None;
    }
    let above = levels.partition_point(|&level| level <= value);
    Some(above.saturating_sub(1).min(levels.len() - 2))
}

/// A horizontal run of grid cells that share one band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledRun {
    /// Lower-left corner.
    pub from: Point,
    /// Upper-right corner.
    pub to: Point,
    /// Band index into the levels.
    pub band: usize,
}

/// Filled contour cells, each coloured by the average of its corners, with
/// neighbours in the same band merged into runs.
#[must_use]
pub fn filled_runs(grid: &Grid, levels: &[f64]) -> Vec<FilledRun> {
    let mut runs: Vec<FilledRun> = Vec::new();
    let mut row = usize::MAX;
    for (i, j) in grid.cells() {
        let average =
            (grid.at(i, j) + grid.at(i + 1, j) + grid.at(i + 1, j + 1) + grid.at(i, j + 1)) / 4.0;
        let Some(band) = band_index(levels, average) else {
            row = usize::MAX;
            continue;
        };
        let (from, to) = ((grid.xs[i], grid.ys[j]), (grid.xs[i + 1], grid.ys[j + 1]));
        match runs.last_mut() {
            Some(run) if row == j && run.band == band && run.to.0 == from.0 => run.to = to,
            _ => runs.push(FilledRun { from, to, band }),
        }
        row = j;
    }
    runs
}
