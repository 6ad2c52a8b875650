//! Polyline clipping and dashing in data coordinates.
//!
//! plotters draws whatever it is given, including points outside the plotting
//! area, so lines are clipped to the view first. Dash lengths are measured in
//! pixels through [`PixelScale`] so they look the same at any data scale.

use crate::figure::AxisRange;

/// A point in data coordinates.
pub type Point = (f64, f64);

/// The visible data rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Horizontal extent.
    pub x: AxisRange,
    /// Vertical extent.
    pub y: AxisRange,
}

impl View {
    /// Whether `p` lies inside the view, borders included.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.x.contains(p.0) && self.y.contains(p.1)
    }
}

/// Pixels per data unit on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    /// Horizontal pixels per x unit.
    pub x: f64,
    /// Vertical pixels per y unit.
    pub y: f64,
}

impl PixelScale {
    /// The scale of a plotting area `pixels` wide and high showing `view`.
    #[must_use]
    pub fn new(view: &View, pixels: (u32, u32)) -> Self {
        let per_unit = |px: u32, range: AxisRange| {
            let span = range.span();
            if span > 0.0 {
                f64::from(px) / span
            } else {
                1.0
            }
        };
        Self {
            x: per_unit(pixels.0, view.x),
            y: per_unit(pixels.1, view.y),
        }
    }

    /// Length of the segment `a`-`b` in pixels.
    #[must_use]
    pub fn length(&self, a: Point, b: Point) -> f64 {
        ((b.0 - a.0) * self.x).hypot((b.1 - a.1) * self.y)
    }
}

/// Clips the segment `a`-`b` to `view` (Liang-Barsky).
#[must_use]
pub fn clip_segment(a: Point, b: Point, view: &View) -> Option<(Point, Point)> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let edges = [
        (-dx, a.0 - view.x.min),
        (dx, view.x.max - a.0),
        (-dy, a.1 - view.y.min),
        (dy, view.y.max - a.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    let at = |t: f64| {
        if t <= 0.0 {
            a
        } else if t >= 1.0 {
            b
        } else {
            (a.0 + t * dx, a.1 + t * dy)
        }
    };
    Some((at(t0), at(t1)))
}

/// Splits a polyline into the runs that are visible inside `view`.
///
/// Non-finite points break the line, like gaps in matplotlib.
#[must_use]
pub fn clip_polyline(points: &[Point], view: &View) -> Vec<Vec<Point>> {
    let mut runs: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let finite = |p: &Point| p.0.is_finite() && p.1.is_finite();

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if !finite(&a) || !finite(&b) {
            flush(&mut runs, &mut current);
            continue;
        }
        match clip_segment(a, b, view) {
            Some((start, end)) => {
                if current.last() != Some(&start) {
                    flush(&mut runs, &mut current);
                    current.push(start);
                }
                current.push(end);
                if end != b {
                    flush(&mut runs, &mut current);
                }
            }
            None => flush(&mut runs, &mut current),
        }
    }
    flush(&mut runs, &mut current);
    runs
}

fn flush(runs: &mut Vec<Vec<Point>>, current: &mut Vec<Point>) {
    if current.len() >= 2 {
        runs.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Cuts a polyline into dashes following `pattern`, given as alternating
/// on/off lengths in pixels. An empty pattern returns the line unchanged.
#[must_use]
pub fn dash_polyline(points: &[Point], pattern: &[f64], scale: &PixelScale) -> Vec<Vec<Point>> {
    if pattern.is_empty() || pattern.iter().all(|&len| len <= 0.0) {
        return vec![points.to_vec()];
    }

    let mut dashes = Vec::new();
    let mut current: Vec<Point> = points.first().copied().into_iter().collect();
    let mut index = 0;
    let mut left = pattern[0];
    let mut on = true;

    for pair in points.windows(2) {
        let (mut a, b) = (pair[0], pair[1]);
        let mut length = scale.length(a, b);
        while length > left {
            let t = left / length;
            let split = (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1));
            if on {
                current.push(split);
                dashes.push(std::mem::take(&mut current));
            } else {
                current = vec![split];
            }
            length -= left;
            a = split;
            on = !on;
            index = (index + 1) % pattern.len();
            left = pattern[index];
        }
        left -= length;
        if on {
            current.push(b);
        }
    }
    if on && current.len() >= 2 {
        dashes.push(current);
    }
    dashes
}
