//! Producing graph specs from computed data.
//!
//! Programs that compute curves build a [`GraphSpec`] here and either hand it
//! to the renderer directly or write it next to the output as `<stem>.json`.

use std::path::PathBuf;

use grapher_common::{GrapherError, Result};

use crate::defaults::keys;
use crate::schema::{Dimensions, FermiParams, GraphSpec, PlotKind, SeriesSpec};

/// Solid then dashed lines in each of the seven base colours.
pub const COLOR_STYLES: [&str; 14] = [
    "k-", "r-", "b-", "g-", "c-", "m-", "y-", "k--", "r--", "b--", "g--", "c--", "m--", "y--",
];

/// Black line styles that stay distinguishable in greyscale print.
pub const PRINT_STYLES: [&str; 4] = ["k-", "k--", "k-.", "k:"];

/// Curve styles for screen or for black and white print.
#[must_use]
pub const fn line_styles(print: bool) -> &'static [&'static str] {
    if print {
        &PRINT_STYLES
    } else {
        &COLOR_STYLES
    }
}

/// Fluent construction of scatter graph specs.
#[derive(Debug, Clone, Default)]
pub struct GraphSpecBuilder {
    spec: GraphSpec,
}

impl GraphSpecBuilder {
    /// Start from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both axis labels.
    #[must_use]
    pub fn labels(mut self, xlabel: impl Into<String>, ylabel: impl Into<String>) -> Self {
        self.spec.xlabel = xlabel.into();
        self.spec.ylabel = ylabel.into();
        self
    }

    /// Set the figure size in inches.
    #[must_use]
    pub const fn dimensions(mut self, width: f64, height: f64) -> Self {
        self.spec.dimensions = Some(Dimensions { width, height });
        self
    }

    /// Clamp the lower y bound.
    #[must_use]
    pub const fn ymin(mut self, ymin: f64) -> Self {
        self.spec.ymin = Some(ymin);
        self
    }

    /// Set the legend title.
    #[must_use]
    pub fn legend_title(mut self, title: impl Into<String>) -> Self {
        self.spec.legend_title = Some(title.into());
        self
    }

    /// Set the output stem.
    #[must_use]
    pub fn output(mut self, stem: impl Into<String>) -> Self {
        self.spec.graph_filepath = Some(stem.into());
        self
    }

    /// Append a series.
    #[must_use]
    pub fn series(mut self, series: SeriesSpec) -> Self {
        if let PlotKind::Scatter { series: list } = &mut self.spec.kind {
            list.push(series);
        }
        self
    }

    /// Append several series.
    #[must_use]
    pub fn extend_series(self, series: impl IntoIterator<Item = SeriesSpec>) -> Self {
        series.into_iter().fold(self, Self::series)
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> GraphSpec {
        self.spec
    }
}

/// Series labelled by the value of the parameter that distinguishes them.
///
/// Series `i` is labelled `"{label}={value:.precision$}"` and styled with
/// `styles[i % styles.len()]`.
pub fn parameter_series(
    label: &str,
    precision: usize,
    values: &[f64],
    curves: Vec<Vec<(f64, f64)>>,
    styles: &[&str],
) -> Result<Vec<SeriesSpec>> {
    if values.len() != curves.len() {
        return Err(GrapherError::validation_field(
            format!("{} parameter values for {} curves", values.len(), curves.len()),
            keys::SERIES,
        ));
    }
    if styles.is_empty() {
        return Err(GrapherError::validation_field(
            "at least one style is required",
            keys::STYLE,
        ));
    }
    Ok(curves
        .into_iter()
        .zip(values)
        .enumerate()
        .map(|(i, (data, value))| SeriesSpec {
            data,
            label: Some(format!("{label}={value:.precision$}")),
            style: styles[i % styles.len()].to_string(),
            ..SeriesSpec::default()
        })
        .collect())
}

/// A Fermi surface job over the Brillouin zone, written to `out_prefix`.
#[must_use]
pub fn fermi_surface_spec(params: FermiParams, out_prefix: impl Into<String>) -> GraphSpec {
    GraphSpec {
        xlabel: "$k_x$".to_string(),
        ylabel: "$k_y$".to_string(),
        graph_filepath: Some(out_prefix.into()),
        kind: PlotKind::FermiSurface(params),
        ..GraphSpec::default()
    }
}

/// Write `spec` to `<graph_filepath>.json` and return that path.
pub fn write_spec_json(spec: &GraphSpec) -> Result<PathBuf> {
    let stem = spec.graph_filepath.as_deref().ok_or_else(|| {
        GrapherError::validation_field("no output stem to name the JSON file", keys::GRAPH_FILEPATH)
    })?;
    let path = PathBuf::from(format!("{stem}.json"));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string(spec)?;
    std::fs::write(&path, text)?;
    tracing::debug!(path = %path.display(), "wrote graph spec");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_series_in_order() {
        let spec = GraphSpecBuilder::new()
            .labels("$x$", "$T_p$")
            .ymin(0.0)
            .series(SeriesSpec::from_xy(&[1.0], &[2.0]).unwrap())
            .series(SeriesSpec::from_xy(&[3.0], &[4.0]).unwrap())
            .build();
        assert_eq!(spec.xlabel, "$x$");
        assert_eq!(spec.ymin, Some(0.0));
        assert_eq!(spec.series().len(), 2);
        assert_eq!(spec.series()[1].data, vec![(3.0, 4.0)]);
    }

    #[test]
    fn test_parameter_series_labels_and_cycles_styles() {
        let curves = vec![vec![(0.0, 1.0)], vec![(0.0, 2.0)], vec![(0.0, 3.0)]];
        let series = parameter_series("t_z", 3, &[0.1, 0.2, 0.3], curves, &PRINT_STYLES[..2])
            .unwrap();
        assert_eq!(series[0].label.as_deref(), Some("t_z=0.100"));
        assert_eq!(series[2].label.as_deref(), Some("t_z=0.300"));
        assert_eq!(series[0].style, "k-");
        assert_eq!(series[1].style, "k--");
        assert_eq!(series[2].style, "k-");
    }

    #[test]
    fn test_line_styles() {
        assert_eq!(line_styles(false).len(), 14);
        assert_eq!(line_styles(true), ["k-", "k--", "k-.", "k:"]);
    }

    #[test]
    fn test_parameter_series_rejects_mismatch() {
        assert!(parameter_series("a", 1, &[1.0], vec![], &COLOR_STYLES).is_err());
        assert!(parameter_series("a", 1, &[1.0], vec![vec![]], &[]).is_err());
    }

    #[test]
    fn test_fermi_surface_spec() {
        let params = FermiParams {
            th: 1.0,
            thp: 0.1,
            t0: 1.0,
            d1: 0.05,
            mu_h: -0.2,
            epsilon_min: -3.0,
        };
        let spec = fermi_surface_spec(params, "out/fs");
        assert_eq!(spec.kind, PlotKind::FermiSurface(params));
        assert_eq!(spec.graph_filepath.as_deref(), Some("out/fs"));
        assert_eq!(spec.xlabel, "$k_x$");
    }

    #[test]
    fn test_write_spec_json_requires_stem() {
        let err = write_spec_json(&GraphSpec::default()).unwrap_err();
        assert_eq!(err.field(), Some(keys::GRAPH_FILEPATH));
    }
}
