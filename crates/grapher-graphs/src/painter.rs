//! The laid-out figure and how it draws onto a plotters area.
//!
//! A [`Plot`] is backend independent: the same value is drawn into the PNG
//! buffer and through the EPS backend. Spacing follows matplotlib's default
//! subplot parameters so figures keep their proportions at any size.

use plotters::chart::SeriesAnno;
use plotters::coord::Shift;
use plotters::element::{EmptyElement, PathElement, Polygon};
use plotters::prelude::*;
use plotters_backend::DrawingBackend;

use crate::figure::FigureSize;
use crate::geometry::{PixelScale, Point, View};
use crate::legend::{label_position, Legend, GLYPH_PX};
use crate::series::{glyph, Glyph, SeriesLayer};
use crate::style::{SeriesStyle, LINE_WIDTH_POINTS, MARKER_POINTS};
use crate::text::{display_text, font, TICK_POINTS};
use crate::ticks::TickFormat;
use crate::traits::{DrawResult, GraphRenderer, TextMode};

/// Left edge of the axes as a fraction of the figure width.
const SUBPLOT_LEFT: f64 = 0.125;
/// Space right of the axes as a fraction of the figure width.
const SUBPLOT_RIGHT: f64 = 0.1;
/// Space under the axes as a fraction of the figure height.
const SUBPLOT_BOTTOM: f64 = 0.11;
/// Space above the axes as a fraction of the figure height.
const SUBPLOT_TOP: f64 = 0.12;

/// Something drawn inside the axes.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// A styled data series.
    Series(SeriesLayer),
    /// Independent line segments in one colour, as produced by a contour.
    Segments {
        /// Segment end points.
        segments: Vec<(Point, Point)>,
        /// Stroke colour.
        color: RGBColor,
    },
}

/// A figure ready to be drawn on any backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    /// Graph type name used in logs.
    pub name: &'static str,
    /// Figure size and resolution.
    pub size: FigureSize,
    /// Visible data rectangle.
    pub view: View,
    /// Text under the x axis, TeX markup allowed.
    pub xlabel: String,
    /// Text beside the y axis, TeX markup allowed.
    pub ylabel: String,
    /// Axis label size in points.
    pub label_points: f64,
    /// Tick label format shared by both axes.
    pub ticks: TickFormat,
    /// Tick count per axis.
    pub num_ticks: usize,
    /// Layers in draw order; later layers are on top.
    pub layers: Vec<Layer>,
    /// Legend box, if one is drawn.
    pub legend: Option<Legend>,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn px(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

impl Plot {
    /// Points of every series visible in the view.
    #[must_use]
    pub fn visible_points(&self) -> Vec<Point> {
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                Layer::Series(series) => Some(series),
                Layer::Segments { .. } => None,
            })
            .flat_map(|series| series.points.iter().copied())
            .filter(|p| self.view.contains(*p))
            .collect()
    }

    fn line_px(&self) -> f64 {
        self.size.points_to_px(LINE_WIDTH_POINTS)
    }
}

impl GraphRenderer for Plot {
    fn size(&self) -> FigureSize {
        self.size
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        text: TextMode,
    ) -> DrawResult<(), DB> {
        let (width, height) = self.size.pixels();
        let (width, height) = (f64::from(width), f64::from(height));
        let full = text == TextMode::Full;

        let mut chart = ChartBuilder::on(root)
            .margin_top(px(height * SUBPLOT_TOP))
            .margin_right(px(width * SUBPLOT_RIGHT))
            .x_label_area_size(px(height * SUBPLOT_BOTTOM))
            .y_label_area_size(px(width * SUBPLOT_LEFT))
            .build_cartesian_2d(
                self.view.x.min..self.view.x.max,
                self.view.y.min..self.view.y.max,
            )?;

        let tick_label = |value: &f64| self.ticks.format(*value);
        let tick_count = if full { self.num_ticks } else { 0 };
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_labels(tick_count)
            .y_labels(tick_count)
            .x_label_formatter(&tick_label)
            .y_label_formatter(&tick_label)
            .label_style(font(self.size.points_to_px(TICK_POINTS)))
            .axis_style(BLACK);
        if full {
            mesh.x_desc(display_text(&self.xlabel))
                .y_desc(display_text(&self.ylabel))
                .axis_desc_style(font(self.size.points_to_px(self.label_points)));
        }
        mesh.draw()?;

        let scale = PixelScale::new(&self.view, chart.plotting_area().dim_in_pixel());
        let line_px = self.line_px();
        let stroke_width = px(line_px).max(1);
        let marker_px = self.size.points_to_px(MARKER_POINTS);

        for layer in &self.layers {
            match layer {
                Layer::Series(series) => {
                    let stroke = series.style.color.stroke_width(stroke_width);
                    chart.draw_series(
                        series
                            .line_pieces(&self.view, &scale, line_px)
                            .into_iter()
                            .map(|piece| PathElement::new(piece, stroke)),
                    )?;
                    if let Some(marker) = series.style.marker {
                        let points = series.marker_points(&self.view);
                        match glyph(marker, marker_px) {
                            Glyph::Filled(outline) => {
                                let fill = series.style.color.filled();
                                chart.draw_series(points.into_iter().map(|p| {
                                    EmptyElement::at(p) + Polygon::new(outline.clone(), fill)
                                }))?;
                            }
                            Glyph::Stroked(outline) => {
                                chart.draw_series(points.into_iter().map(|p| {
                                    EmptyElement::at(p) + PathElement::new(outline.clone(), stroke)
                                }))?;
                            }
                        }
                    }
                }
                Layer::Segments { segments, color } => {
                    let stroke = color.stroke_width(stroke_width);
                    chart.draw_series(
                        segments
                            .iter()
                            .map(|&(a, b)| PathElement::new(vec![a, b], stroke)),
                    )?;
                }
            }
        }

        let Some(legend) = self.legend.as_ref().filter(|_| full) else {
            return Ok(());
        };

        if let Some(title) = &legend.title {
            chart
                .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
                .label(display_text(title))
                .legend(EmptyElement::at);
        }
        for layer in &self.layers {
            if let Layer::Series(SeriesLayer {
                label: Some(label),
                style,
                ..
            }) = layer
            {
                let anno = chart.draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?;
                anno.label(display_text(label));
                legend_glyph(anno, *style, stroke_width, marker_px);
            }
        }

        let loc = legend.resolve(
            &self.visible_points(),
            &self.view,
            chart.plotting_area().dim_in_pixel(),
        );
        chart
            .configure_series_labels()
            .position(label_position(loc))
            .label_font(font(legend.font_px))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Attaches the legend sample for `style` to `anno`.
#[allow(clippy::cast_possible_truncation)]
fn legend_glyph<'a, DB: DrawingBackend + 'a>(
    anno: &mut SeriesAnno<'a, DB>,
    style: SeriesStyle,
    stroke_width: u32,
    marker_px: f64,
) {
    let half = (GLYPH_PX / 2.0) as i32;
    let stroke = style.color.stroke_width(stroke_width);
    let fill = style.color.filled();
    let sample = move || vec![(-half, 0), (half, 0)];
    match (style.line.is_some(), style.marker.map(|m| glyph(m, marker_px))) {
        (true, None) => {
            anno.legend(move |c| EmptyElement::at(c) + PathElement::new(sample(), stroke));
        }
        (false, Some(Glyph::Filled(outline))) => {
            anno.legend(move |c| EmptyElement::at(c) + Polygon::new(outline.clone(), fill));
        }
        (false, Some(Glyph::Stroked(outline))) => {
            anno.legend(move |c| EmptyElement::at(c) + PathElement::new(outline.clone(), stroke));
        }
        (true, Some(Glyph::Filled(outline))) => {
            anno.legend(move |c| {
                EmptyElement::at(c)
                    + PathElement::new(sample(), stroke)
                    + Polygon::new(outline.clone(), fill)
            });
        }
        (true, Some(Glyph::Stroked(outline))) => {
            anno.legend(move |c| {
                EmptyElement::at(c)
                    + PathElement::new(sample(), stroke)
                    + PathElement::new(outline.clone(), stroke)
            });
        }
        (false, None) => {
            anno.legend(EmptyElement::at);
        }
    }
}
