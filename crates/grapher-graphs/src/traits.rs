//! Graph renderer trait definitions shared by every output backend.

use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind};
use plotters_backend::DrawingBackend;

use crate::figure::FigureSize;

/// Result of drawing onto a plotters area backed by `DB`.
pub type DrawResult<T, DB> = Result<T, DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Whether text is drawn.
///
/// Raster output falls back to [`TextMode::Suppressed`] when no usable font
/// is installed, so a figure still gets its data drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Labels, tick text and legend are drawn.
    #[default]
    Full,
    /// Everything except text is drawn.
    Suppressed,
}

/// Something that can draw itself onto any plotters drawing area.
pub trait GraphRenderer {
    /// Figure size and resolution the renderer was laid out for.
    fn size(&self) -> FigureSize;

    /// Draws the whole figure onto `root`, which is already cleared.
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        text: TextMode,
    ) -> DrawResult<(), DB>;

    /// Gets the name of this graph type.
    fn name(&self) -> &'static str;
}
