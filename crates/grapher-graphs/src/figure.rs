//! Figure sizes, axis ranges and the value returned from a render.

use std::path::PathBuf;

use grapher_config::Dimensions;

/// Width of a figure without `dimensions`, in inches.
pub const DEFAULT_WIDTH_IN: f64 = 6.4;
/// Height of a figure without `dimensions`, in inches.
pub const DEFAULT_HEIGHT_IN: f64 = 4.8;
/// Resolution of spec-driven figures.
pub const DEFAULT_DPI: f64 = 100.0;
/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;
/// Fraction of the data extent added on each side when autoscaling.
pub const AXIS_MARGIN: f64 = 0.05;

/// Physical figure size and the resolution it is rasterised at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    /// Width in inches.
    pub width_in: f64,
    /// Height in inches.
    pub height_in: f64,
    /// Pixels per inch.
    pub dpi: f64,
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            width_in: DEFAULT_WIDTH_IN,
            height_in: DEFAULT_HEIGHT_IN,
            dpi: DEFAULT_DPI,
        }
    }
}

impl FigureSize {
    /// The size for a spec's `dimensions`, or the default size.
    #[must_use]
    pub fn from_dimensions(dimensions: Option<Dimensions>) -> Self {
        dimensions.map_or_else(Self::default, |d| Self {
            width_in: d.width,
            height_in: d.height,
            dpi: DEFAULT_DPI,
        })
    }

    /// Same physical size at another resolution.
    #[must_use]
    pub const fn with_dpi(self, dpi: f64) -> Self {
        Self { dpi, ..self }
    }

    /// Size in whole pixels, at least one in each direction.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixels(&self) -> (u32, u32) {
        let w = (self.width_in * self.dpi).round().max(1.0);
        let h = (self.height_in * self.dpi).round().max(1.0);
        (w as u32, h as u32)
    }

    /// Converts a length in points to pixels at this resolution.
    #[must_use]
    pub fn points_to_px(&self, points: f64) -> f64 {
        points * self.dpi / POINTS_PER_INCH
    }

    /// Converts a length in inches to whole pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn inches_to_px(&self, inches: f64) -> i32 {
        (inches * self.dpi).round() as i32
    }
}

/// A closed interval on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl AxisRange {
    /// A range with the given bounds.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Length of the range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies inside the range.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// The autoscaled range for `values`: their extent widened by
    /// [`AXIS_MARGIN`] on each side. Non-finite values are ignored and an
    /// empty set gives `[0, 1]`.
    pub fn autoscale(values: impl IntoIterator<Item = f64>) -> Self {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if lo > hi {
            return Self::default();
        }
        let span = hi - lo;
        if span == 0.0 {
            let pad = if lo == 0.0 { AXIS_MARGIN } else { lo.abs() * AXIS_MARGIN };
            return Self::new(lo - pad, hi + pad);
        }
        Self::new(lo - span * AXIS_MARGIN, hi + span * AXIS_MARGIN)
    }

    /// Moves the lower bound to `bottom`, keeping the upper bound unless it
    /// would no longer lie above the new bottom.
    #[must_use]
    pub fn with_bottom(self, bottom: f64) -> Self {
        // A bottom at or above the autoscaled top would leave an empty or
        // inverted axis, so the top moves to one unit above the bottom.
        let max = if self.max > bottom { self.max } else { bottom + 1.0 };
        Self::new(bottom, max)
    }
}

/// What a rendered figure shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FigureKind {
    /// A scatter graph.
    Scatter {
        /// Series drawn, including invisible ones.
        series: usize,
        /// Points across all series.
        points: usize,
        /// Whether a legend box was placed.
        legend: bool,
    },
    /// A Fermi surface contour.
    FermiSurface {
        /// Line segments of the zero crossing.
        segments: usize,
    },
}

/// The outcome of rendering one graph spec.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFigure {
    /// What was drawn.
    pub kind: FigureKind,
    /// Size and resolution of the figure.
    pub size: FigureSize,
    /// Final x range of the axes.
    pub x_range: AxisRange,
    /// Final y range of the axes.
    pub y_range: AxisRange,
    /// Files written, in writer order. Empty without `graph_filepath`.
    pub files: Vec<PathBuf>,
}

impl RenderedFigure {
    /// Number of data points drawn; zero for contour figures.
    #[must_use]
    pub const fn points(&self) -> usize {
        match self.kind {
            FigureKind::Scatter { points, .. } => points,
            FigureKind::FermiSurface { .. } => 0,
        }
    }
}
