//! Default values and the additive default-fill step.
//!
//! Filling only ever inserts keys that are missing, so it never changes a
//! value the input provided and applying it twice equals applying it once.

use serde_json::{json, Map, Value};

use crate::schema::{FontSize, GraphSpec, LegendLoc, NamedFontSize, PlotKind, SeriesSpec};

/// JSON keys of graph and series objects.
pub mod keys {
    /// Graph: x axis text.
    pub const XLABEL: &str = "xlabel";
    /// Graph: y axis text.
    pub const YLABEL: &str = "ylabel";
    /// Graph: `[width, height]` in inches.
    pub const DIMENSIONS: &str = "dimensions";
    /// Graph: legend title.
    pub const LEGEND_TITLE: &str = "legend_title";
    /// Graph: legend location code or name.
    pub const LEGEND_LOC: &str = "legend_loc";
    /// Graph: legend font size.
    pub const LEGEND_FONTSIZE: &str = "legend_fontsize";
    /// Graph: axis label font size.
    pub const AXIS_LABEL_FONTSIZE: &str = "axis_label_fontsize";
    /// Graph: ticks per axis.
    pub const NUM_TICKS: &str = "num_ticks";
    /// Graph: tick label format.
    pub const TICK_FORMATSTR: &str = "tick_formatstr";
    /// Graph: lower y bound.
    pub const YMIN: &str = "ymin";
    /// Graph: output path stem.
    pub const GRAPH_FILEPATH: &str = "graph_filepath";
    /// Graph: `scatter` or `Fermi_surface`.
    pub const PLOT_TYPE: &str = "plot_type";
    /// Graph: list of series objects.
    pub const SERIES: &str = "series";
    /// Series: list of `[x, y]` points.
    pub const DATA: &str = "data";
    /// Series: legend label.
    pub const LABEL: &str = "label";
    /// Series: format token.
    pub const STYLE: &str = "style";
}

/// Default x axis text.
pub const DEFAULT_XLABEL: &str = "x";
/// Default y axis text.
pub const DEFAULT_YLABEL: &str = "y";
/// Default tick count per axis.
pub const DEFAULT_NUM_TICKS: usize = 5;
/// Default tick label format.
pub const DEFAULT_TICK_FORMATSTR: &str = "%.2f";
/// Default legend font size.
pub const DEFAULT_LEGEND_FONTSIZE: NamedFontSize = NamedFontSize::Large;
/// Default axis label font size.
pub const DEFAULT_AXIS_LABEL_FONTSIZE: NamedFontSize = NamedFontSize::XLarge;
/// Default series style: black dot markers.
pub const DEFAULT_SERIES_STYLE: &str = "k.";

/// Graph-level defaults as JSON, in key order.
#[must_use]
pub fn graph_defaults() -> Vec<(&'static str, Value)> {
    vec![
        (keys::XLABEL, json!(DEFAULT_XLABEL)),
        (keys::YLABEL, json!(DEFAULT_YLABEL)),
        (keys::NUM_TICKS, json!(DEFAULT_NUM_TICKS)),
        (keys::AXIS_LABEL_FONTSIZE, json!(DEFAULT_AXIS_LABEL_FONTSIZE.name())),
        (keys::TICK_FORMATSTR, json!(DEFAULT_TICK_FORMATSTR)),
        (keys::LEGEND_FONTSIZE, json!(DEFAULT_LEGEND_FONTSIZE.name())),
        (keys::LEGEND_LOC, json!(LegendLoc::Best.code())),
        (keys::LEGEND_TITLE, Value::Null),
        (keys::YMIN, Value::Null),
        (keys::GRAPH_FILEPATH, Value::Null),
        (keys::PLOT_TYPE, json!(crate::schema::PLOT_TYPE_SCATTER)),
        ("th", Value::Null),
        ("thp", Value::Null),
        ("t0", Value::Null),
        ("D1", Value::Null),
        ("Mu_h", Value::Null),
        ("epsilon_min", Value::Null),
    ]
}

/// Series-level defaults as JSON.
#[must_use]
pub fn series_defaults() -> Vec<(&'static str, Value)> {
    vec![
        (keys::LABEL, Value::Null),
        (keys::STYLE, json!(DEFAULT_SERIES_STYLE)),
    ]
}

fn fill_missing(object: &mut Map<String, Value>, defaults: Vec<(&'static str, Value)>) {
    for (key, value) in defaults {
        object.entry(key).or_insert(value);
    }
}

/// Insert every missing graph and series default into `graph`.
///
/// Each graph without a `series` key gets its own empty list. Series entries
/// that are not objects are left alone for the decoder to reject.
pub fn fill_defaults(graph: &mut Map<String, Value>) {
    fill_missing(graph, graph_defaults());
    let series = graph
        .entry(keys::SERIES)
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(entries) = series {
        for entry in entries {
            if let Value::Object(series) = entry {
                fill_missing(series, series_defaults());
            }
        }
    }
}

impl Default for SeriesSpec {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            label: None,
            style: DEFAULT_SERIES_STYLE.to_string(),
            extra: Map::new(),
        }
    }
}

impl Default for GraphSpec {
    fn default() -> Self {
        Self {
            xlabel: DEFAULT_XLABEL.to_string(),
            ylabel: DEFAULT_YLABEL.to_string(),
            dimensions: None,
            legend_title: None,
            legend_loc: LegendLoc::Best,
            legend_fontsize: FontSize::Named(DEFAULT_LEGEND_FONTSIZE),
            axis_label_fontsize: FontSize::Named(DEFAULT_AXIS_LABEL_FONTSIZE),
            num_ticks: DEFAULT_NUM_TICKS,
            tick_formatstr: DEFAULT_TICK_FORMATSTR.to_string(),
            ymin: None,
            graph_filepath: None,
            kind: PlotKind::Scatter { series: Vec::new() },
            extra: Map::new(),
        }
    }
}
