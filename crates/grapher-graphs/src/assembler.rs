//! Turns graph specs into figures and hands them to the writers.

use grapher_common::Result;
use grapher_config::{FermiParams, GraphSpec, PlotKind, SeriesSpec};
use tracing::{debug, info, info_span, warn};

use crate::fermi::fermi_plot;
use crate::figure::{AxisRange, FigureKind, FigureSize, RenderedFigure};
use crate::geometry::View;
use crate::legend::Legend;
use crate::output::{default_writers, write_all, FigureWriter};
use crate::painter::{Layer, Plot};
use crate::series::SeriesLayer;
use crate::style::ColorCycle;
use crate::ticks::TickFormat;

/// Renders graph specs one at a time.
pub struct GraphAssembler {
    writers: Vec<Box<dyn FigureWriter>>,
}

impl GraphAssembler {
    /// An assembler writing PNG and EPS files.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writers(default_writers())
    }

    /// An assembler writing through `writers` instead.
    #[must_use]
    pub fn with_writers(writers: Vec<Box<dyn FigureWriter>>) -> Self {
        Self { writers }
    }

    /// Lays out `spec` without writing anything.
    pub fn layout(&self, spec: &GraphSpec) -> Result<(Plot, FigureKind)> {
        let size = FigureSize::from_dimensions(spec.dimensions);
        let ticks = TickFormat::parse(&spec.tick_formatstr)?;
        match &spec.kind {
            PlotKind::Scatter { series } => scatter_plot(spec, series, size, ticks),
            PlotKind::FermiSurface(params) => Ok(fermi_figure(spec, params, size, ticks)),
        }
    }

    /// Renders one spec, writing its files when it has an output stem.
    pub fn render(&self, spec: GraphSpec) -> Result<RenderedFigure> {
        let (plot, kind) = self.layout(&spec)?;
        let files = match spec.graph_filepath.as_deref() {
            Some(stem) => write_all(&plot, stem, &self.writers)?,
            None => {
                debug!(graph = plot.name, "No graph_filepath, nothing written");
                Vec::new()
            }
        };
        Ok(RenderedFigure {
            kind,
            size: plot.size,
            x_range: plot.view.x,
            y_range: plot.view.y,
            files,
        })
    }

    /// Renders every spec in order. A failing spec is logged and reported in
    /// its slot; the rest still render.
    pub fn render_all(&self, specs: Vec<GraphSpec>) -> Vec<Result<RenderedFigure>> {
        self.render_each(specs.into_iter().map(Ok).collect())
    }

    /// Renders the graphs of a document decoded one by one. A graph that did
    /// not decode keeps its error in its slot. Each failure is logged once.
    pub fn render_each(&self, graphs: Vec<Result<GraphSpec>>) -> Vec<Result<RenderedFigure>> {
        let total = graphs.len();
        let results: Vec<_> = graphs
            .into_iter()
            .enumerate()
            .map(|(index, graph)| {
                let _span = info_span!("graph", index).entered();
                let result = graph.and_then(|spec| self.render(spec));
                if let Err(err) = &result {
                    warn!(index, error = %err, "Graph not rendered");
                }
                result
            })
            .collect();
        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(total, failed, "Rendered graph batch");
        results
    }
}

impl Default for GraphAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn scatter_plot(
    spec: &GraphSpec,
    series: &[SeriesSpec],
    size: FigureSize,
    ticks: TickFormat,
) -> Result<(Plot, FigureKind)> {
    let mut cycle = ColorCycle::default();
    let layers = series
        .iter()
        .enumerate()
        .map(|(index, s)| {
            let layer = SeriesLayer::prepare(s, &mut cycle)?;
            debug!(
                index,
                points = layer.points.len(),
                style = %s.style,
                label = layer.label.as_deref().unwrap_or(""),
                "Prepared series"
            );
            Ok(layer)
        })
        .collect::<Result<Vec<_>>>()?;

    let points = layers.iter().map(|l| l.points.len()).sum();
    let x = AxisRange::autoscale(layers.iter().flat_map(|l| l.points.iter().map(|p| p.0)));
    let y = AxisRange::autoscale(layers.iter().flat_map(|l| l.points.iter().map(|p| p.1)));
    let y = spec.ymin.map_or(y, |bottom| y.with_bottom(bottom));

    let labels: Vec<String> = layers.iter().filter_map(|l| l.label.clone()).collect();
    let legend = (!labels.is_empty() || spec.legend_title.is_some()).then(|| Legend {
        title: spec.legend_title.clone(),
        labels,
        loc: spec.legend_loc,
        font_px: size.points_to_px(spec.legend_fontsize.points()),
    });

    let kind = FigureKind::Scatter {
        series: layers.len(),
        points,
        legend: legend.is_some(),
    };
    let plot = Plot {
        name: "scatter",
        size,
        view: View { x, y },
        xlabel: spec.xlabel.clone(),
        ylabel: spec.ylabel.clone(),
        label_points: spec.axis_label_fontsize.points(),
        ticks,
        num_ticks: spec.num_ticks,
        layers: layers.into_iter().map(Layer::Series).collect(),
        legend,
    };
    Ok((plot, kind))
}

fn fermi_figure(
    spec: &GraphSpec,
    params: &FermiParams,
    size: FigureSize,
    ticks: TickFormat,
) -> (Plot, FigureKind) {
    if spec.ymin.is_some() {
        debug!("ymin does not apply to Fermi surface graphs");
    }
    let plot = fermi_plot(params, size, ticks, spec.num_ticks);
    let segments = plot
        .layers
        .iter()
        .map(|layer| match layer {
            Layer::Segments { segments, .. } => segments.len(),
            Layer::Series(_) => 0,
        })
        .sum();
    (plot, FigureKind::FermiSurface { segments })
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapher_config::parse;

    fn spec(json: &str) -> GraphSpec {
        parse(json).unwrap().into_specs().remove(0)
    }

    #[test]
    fn test_scatter_layout() {
        let assembler = GraphAssembler::new();
        let graph = spec(
            r#"{"series": [
                {"data": [[0, 0], [10, 5]], "label": "a", "style": "r-"},
                {"data": [[2, 1]], "style": "bo"}
            ]}"#,
        );
        let (plot, kind) = assembler.layout(&graph).unwrap();
        assert_eq!(
            kind,
            FigureKind::Scatter {
                series: 2,
                points: 3,
                legend: true
            }
        );
        assert!((plot.view.x.min + 0.5).abs() < 1e-12);
        assert!((plot.view.x.max - 10.5).abs() < 1e-12);
        assert_eq!(plot.legend.map(|l| l.labels), Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_legend_only_with_labels_or_title() {
        let assembler = GraphAssembler::new();
        let (plot, _) = assembler
            .layout(&spec(r#"{"series": [{"data": [[1, 1]]}]}"#))
            .unwrap();
        assert!(plot.legend.is_none());
        let (plot, _) = assembler
            .layout(&spec(r#"{"legend_title": "T", "series": []}"#))
            .unwrap();
        assert!(plot.legend.is_some());
    }

    #[test]
    fn test_bad_style_fails_layout() {
        let assembler = GraphAssembler::new();
        let graph = spec(r#"{"series": [{"data": [[1, 1]], "style": "zz"}]}"#);
        let result = assembler.layout(&graph);
        assert!(matches!(result, Err(grapher_common::GrapherError::Style { .. })));
    }

    #[test]
    fn test_render_each_keeps_decode_errors_in_place() {
        let assembler = GraphAssembler::new();
        let graphs = grapher_config::parse_each(
            r#"[{"plot_type": "Fermi_surface", "th": "abc"}, {"series": []}]"#,
        )
        .unwrap();
        let results = assembler.render_each(graphs);
        assert_eq!(results.len(), 2);
        assert!(results[0]
            .as_ref()
            .is_err_and(grapher_common::GrapherError::is_malformed_input));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_render_all_isolates_failures() {
        let assembler = GraphAssembler::new();
        let specs = parse(
            r#"[
                {"series": [{"data": [[1, 1]], "style": "zz"}]},
                {"series": [{"data": [[1, 1]]}]}
            ]"#,
        )
        .unwrap()
        .into_specs();
        let results = assembler.render_all(specs);
        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert!(results[1].as_ref().is_ok_and(|f| f.files.is_empty()));
    }
}
