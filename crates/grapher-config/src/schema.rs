//! Typed graph specification decoded from defaulted JSON objects.

use grapher_common::{GrapherError, Result};
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::defaults::keys;
use crate::validator;

/// One rendering job.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSpec {
    /// Text under the x axis.
    pub xlabel: String,
    /// Text beside the y axis.
    pub ylabel: String,
    /// Figure size in inches; renderer default when absent.
    pub dimensions: Option<Dimensions>,
    /// Title row of the legend.
    pub legend_title: Option<String>,
    /// Where the legend box goes.
    pub legend_loc: LegendLoc,
    /// Legend text size.
    pub legend_fontsize: FontSize,
    /// Axis label text size.
    pub axis_label_fontsize: FontSize,
    /// Tick count per axis.
    pub num_ticks: usize,
    /// printf-style tick label format.
    pub tick_formatstr: String,
    /// Lower bound of the y axis.
    pub ymin: Option<f64>,
    /// Output path stem; nothing is written when absent.
    pub graph_filepath: Option<String>,
    /// What gets drawn.
    pub kind: PlotKind,
    /// Keys this schema does not know, kept verbatim.
    pub extra: Map<String, Value>,
}

/// The two mutually exclusive rendering paths selected by `plot_type`.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotKind {
    /// Points and lines, one entry per series.
    Scatter {
        /// Series in draw order.
        series: Vec<SeriesSpec>,
    },
    /// Zero crossing of the hole band energy over the Brillouin zone.
    FermiSurface(FermiParams),
}

impl PlotKind {
    /// The `plot_type` string this kind is written as.
    #[must_use]
    pub const fn plot_type(&self) -> &'static str {
        match self {
            Self::Scatter { .. } => PLOT_TYPE_SCATTER,
            Self::FermiSurface(_) => PLOT_TYPE_FERMI_SURFACE,
        }
    }
}

/// `plot_type` value of scatter graphs.
pub const PLOT_TYPE_SCATTER: &str = "scatter";
/// `plot_type` value of Fermi surface graphs.
pub const PLOT_TYPE_FERMI_SURFACE: &str = "Fermi_surface";

/// Band parameters of a Fermi surface graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FermiParams {
    /// Nearest-neighbour hole hopping.
    pub th: f64,
    /// Next-nearest-neighbour hole hopping.
    pub thp: f64,
    /// Bare hopping scale.
    pub t0: f64,
    /// Pair amplitude.
    #[serde(rename = "D1")]
    pub d1: f64,
    /// Hole chemical potential.
    #[serde(rename = "Mu_h")]
    pub mu_h: f64,
    /// Band minimum. Accepted for compatibility; the energy does not use it.
    pub epsilon_min: f64,
}

impl FermiParams {
    /// JSON keys of the parameters, in the order they are checked.
    pub const KEYS: [&'static str; 6] = ["th", "thp", "t0", "D1", "Mu_h", "epsilon_min"];

    fn from_object(object: &Map<String, Value>) -> Result<Self> {
        let field = |key: &str| validator::number(object.get(key).unwrap_or(&Value::Null), key);
        Ok(Self {
            th: field("th")?,
            thp: field("thp")?,
            t0: field("t0")?,
            d1: field("D1")?,
            mu_h: field("Mu_h")?,
            epsilon_min: field("epsilon_min")?,
        })
    }
}

/// One plotted dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    /// Points in input order.
    pub data: Vec<(f64, f64)>,
    /// Legend label.
    pub label: Option<String>,
    /// matplotlib-style format token, e.g. `"k."` or `"r--"`.
    pub style: String,
    /// Keys this schema does not know, kept verbatim.
    pub extra: Map<String, Value>,
}

impl SeriesSpec {
    /// Build a series from parallel x and y sequences.
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(GrapherError::validation_field(
                format!("x has {} values but y has {}", xs.len(), ys.len()),
                keys::DATA,
            ));
        }
        Ok(Self {
            data: xs.iter().copied().zip(ys.iter().copied()).collect(),
            ..Self::default()
        })
    }

    /// The x coordinates in input order.
    #[must_use]
    pub fn xs(&self) -> Vec<f64> {
        self.data.iter().map(|&(x, _)| x).collect()
    }

    /// The y coordinates in input order.
    #[must_use]
    pub fn ys(&self) -> Vec<f64> {
        self.data.iter().map(|&(_, y)| y).collect()
    }

    /// Decode a series object that already carries its defaults.
    pub fn from_object(mut object: Map<String, Value>) -> Result<Self> {
        let data = match object.remove(keys::DATA) {
            Some(Value::Array(points)) => points
                .iter()
                .map(|p| validator::point(p, keys::DATA))
                .collect::<Result<Vec<_>>>()?,
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                return Err(GrapherError::malformed_field(
                    format!("series data must be a list of points, got {other}"),
                    keys::DATA,
                ))
            }
        };
        let label = take(&mut object, keys::LABEL, validator::optional_text)?;
        let style = take(&mut object, keys::STYLE, validator::text)?;
        Ok(Self {
            data,
            label,
            style,
            extra: object,
        })
    }

    /// The JSON object this series is written as.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = self.extra.clone();
        let data: Vec<Value> = self.data.iter().map(|&(x, y)| json!([x, y])).collect();
        object.insert(keys::DATA.into(), Value::Array(data));
        object.insert(keys::LABEL.into(), json!(self.label));
        object.insert(keys::STYLE.into(), json!(self.style));
        Value::Object(object)
    }
}

impl Serialize for SeriesSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
}

impl Dimensions {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        let field = keys::DIMENSIONS;
        match value {
            Value::Null => Ok(None),
            Value::Array(items) if items.len() == 2 => {
                let width = validator::number(&items[0], field)?;
                let height = validator::number(&items[1], field)?;
                if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
                    Ok(Some(Self { width, height }))
                } else {
                    Err(GrapherError::malformed_field(
                        format!("dimensions must be positive, got [{width}, {height}]"),
                        field,
                    ))
                }
            }
            other => Err(GrapherError::malformed_field(
                format!("dimensions must be [width, height], got {other}"),
                field,
            )),
        }
    }
}

/// matplotlib legend locations, with their numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendLoc {
    /// Code 0: the anchor that hides the fewest points.
    #[default]
    Best,
    /// Code 1.
    UpperRight,
    /// Code 2.
    UpperLeft,
    /// Code 3.
    LowerLeft,
    /// Code 4.
    LowerRight,
    /// Code 5.
    Right,
    /// Code 6.
    CenterLeft,
    /// Code 7.
    CenterRight,
    /// Code 8.
    LowerCenter,
    /// Code 9.
    UpperCenter,
    /// Code 10.
    Center,
}

impl LegendLoc {
    const ALL: [(Self, &'static str); 11] = [
        (Self::Best, "best"),
        (Self::UpperRight, "upper right"),
        (Self::UpperLeft, "upper left"),
        (Self::LowerLeft, "lower left"),
        (Self::LowerRight, "lower right"),
        (Self::Right, "right"),
        (Self::CenterLeft, "center left"),
        (Self::CenterRight, "center right"),
        (Self::LowerCenter, "lower center"),
        (Self::UpperCenter, "upper center"),
        (Self::Center, "center"),
    ];

    /// Look a location up by its matplotlib code.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).map(|&(loc, _)| loc)
    }

    /// Look a location up by its matplotlib name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .find(|(_, n)| *n == name)
            .map(|&(loc, _)| loc)
    }

    /// The matplotlib code of this location.
    #[must_use]
    pub fn code(self) -> u8 {
        Self::ALL
            .iter()
            .position(|&(loc, _)| loc == self)
            .and_then(|i| u8::try_from(i).ok())
            .unwrap_or(0)
    }

    fn from_value(value: &Value) -> Result<Self> {
        let field = keys::LEGEND_LOC;
        let found = match value {
            Value::Null => Some(Self::Best),
            Value::String(s) => Self::from_name(s).or_else(|| {
                s.trim()
                    .parse::<u8>()
                    .ok()
                    .and_then(Self::from_code)
            }),
            Value::Number(n) => n
                .as_u64()
                .and_then(|c| u8::try_from(c).ok())
                .and_then(Self::from_code),
            _ => None,
        };
        found.ok_or_else(|| {
            GrapherError::malformed_field(format!("unknown legend location {value}"), field)
        })
    }
}

/// Relative font sizes understood by matplotlib.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedFontSize {
    /// `xx-small`
    XxSmall,
    /// `x-small`
    XSmall,
    /// `small`
    Small,
    /// `medium`
    Medium,
    /// `large`
    Large,
    /// `x-large`
    XLarge,
    /// `xx-large`
    XxLarge,
    /// `larger`
    Larger,
    /// `smaller`
    Smaller,
}

impl NamedFontSize {
    const ALL: [(Self, &'static str, f64); 9] = [
        (Self::XxSmall, "xx-small", 0.579),
        (Self::XSmall, "x-small", 0.694),
        (Self::Small, "small", 0.833),
        (Self::Medium, "medium", 1.0),
        (Self::Large, "large", 1.2),
        (Self::XLarge, "x-large", 1.44),
        (Self::XxLarge, "xx-large", 1.728),
        (Self::Larger, "larger", 1.2),
        (Self::Smaller, "smaller", 0.833),
    ];

    fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|&(size, _, _)| size)
    }

    /// The name as written in specs.
    #[must_use]
    pub fn name(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(s, _, _)| *s == self)
            .map_or("medium", |&(_, n, _)| n)
    }

    fn scale(self) -> f64 {
        Self::ALL
            .iter()
            .find(|(s, _, _)| *s == self)
            .map_or(1.0, |&(_, _, k)| k)
    }
}

/// A font size given by name or in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontSize {
    /// Relative to [`FontSize::BASE_POINTS`].
    Named(NamedFontSize),
    /// Absolute size in points.
    Points(f64),
}

impl FontSize {
    /// Size in points of `medium`.
    pub const BASE_POINTS: f64 = 10.0;

    /// Size in points.
    #[must_use]
    pub fn points(self) -> f64 {
        match self {
            Self::Named(named) => Self::BASE_POINTS * named.scale(),
            Self::Points(points) => points,
        }
    }

    fn from_value(value: &Value, field: &str) -> Result<Self> {
        if let Value::String(s) = value {
            if let Some(named) = NamedFontSize::from_name(s) {
                return Ok(Self::Named(named));
            }
        }
        let points = validator::number(value, field)?;
        if points > 0.0 && points.is_finite() {
            Ok(Self::Points(points))
        } else {
            Err(GrapherError::malformed_field(
                format!("{field} must be positive, got {points}"),
                field,
            ))
        }
    }

    fn to_json(self) -> Value {
        match self {
            Self::Named(named) => json!(named.name()),
            Self::Points(points) => json!(points),
        }
    }
}

fn take<T>(
    object: &mut Map<String, Value>,
    key: &str,
    coerce: impl FnOnce(&Value, &str) -> Result<T>,
) -> Result<T> {
    let value = object.remove(key).unwrap_or(Value::Null);
    coerce(&value, key)
}

impl GraphSpec {
    /// Decode a graph object that already carries its defaults.
    ///
    /// Known keys are consumed; everything else lands in [`GraphSpec::extra`].
    pub fn from_object(mut object: Map<String, Value>) -> Result<Self> {
        let xlabel = take(&mut object, keys::XLABEL, validator::text)?;
        let ylabel = take(&mut object, keys::YLABEL, validator::text)?;
        let dimensions = take(&mut object, keys::DIMENSIONS, |v, _| Dimensions::from_value(v))?;
        let legend_title = take(&mut object, keys::LEGEND_TITLE, validator::optional_text)?;
        let legend_loc = take(&mut object, keys::LEGEND_LOC, |v, _| LegendLoc::from_value(v))?;
        let legend_fontsize = take(&mut object, keys::LEGEND_FONTSIZE, FontSize::from_value)?;
        let axis_label_fontsize =
            take(&mut object, keys::AXIS_LABEL_FONTSIZE, FontSize::from_value)?;
        let num_ticks = take(&mut object, keys::NUM_TICKS, validator::count)?;
        let tick_formatstr = take(&mut object, keys::TICK_FORMATSTR, validator::text)?;
        let ymin = take(&mut object, keys::YMIN, validator::optional_number)?;
        let graph_filepath = take(&mut object, keys::GRAPH_FILEPATH, validator::optional_text)?
            .filter(|path| !path.is_empty());
        let plot_type = take(&mut object, keys::PLOT_TYPE, validator::text)?;

        let kind = if plot_type == PLOT_TYPE_FERMI_SURFACE {
            let params = FermiParams::from_object(&object)?;
            for key in FermiParams::KEYS {
                object.remove(key);
            }
            object.remove(keys::SERIES);
            PlotKind::FermiSurface(params)
        } else {
            if plot_type != PLOT_TYPE_SCATTER {
                tracing::warn!(plot_type = %plot_type, "unknown plot_type, rendering as scatter");
            }
            let series = match object.remove(keys::SERIES) {
                Some(Value::Array(entries)) => entries
                    .into_iter()
                    .map(|entry| match entry {
                        Value::Object(series) => SeriesSpec::from_object(series),
                        other => Err(GrapherError::malformed_field(
                            format!("series entries must be objects, got {other}"),
                            keys::SERIES,
                        )),
                    })
                    .collect::<Result<Vec<_>>>()?,
                None | Some(Value::Null) => Vec::new(),
                Some(other) => {
                    return Err(GrapherError::malformed_field(
                        format!("series must be a list, got {other}"),
                        keys::SERIES,
                    ))
                }
            };
            // Unused band parameters of scatter graphs are defaulted nulls.
            for key in FermiParams::KEYS {
                if object.get(key).is_some_and(Value::is_null) {
                    object.remove(key);
                }
            }
            PlotKind::Scatter { series }
        };

        Ok(Self {
            xlabel,
            ylabel,
            dimensions,
            legend_title,
            legend_loc,
            legend_fontsize,
            axis_label_fontsize,
            num_ticks,
            tick_formatstr,
            ymin,
            graph_filepath,
            kind,
            extra: object,
        })
    }

    /// The series of a scatter graph; empty for other kinds.
    #[must_use]
    pub fn series(&self) -> &[SeriesSpec] {
        match &self.kind {
            PlotKind::Scatter { series } => series,
            PlotKind::FermiSurface(_) => &[],
        }
    }

    /// The JSON object this spec is written as, readable by the loader.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = self.extra.clone();
        object.insert(keys::XLABEL.into(), json!(self.xlabel));
        object.insert(keys::YLABEL.into(), json!(self.ylabel));
        if let Some(dims) = self.dimensions {
            object.insert(keys::DIMENSIONS.into(), json!([dims.width, dims.height]));
        }
        object.insert(keys::LEGEND_TITLE.into(), json!(self.legend_title));
        object.insert(keys::LEGEND_LOC.into(), json!(self.legend_loc.code()));
        object.insert(keys::LEGEND_FONTSIZE.into(), self.legend_fontsize.to_json());
        object.insert(
            keys::AXIS_LABEL_FONTSIZE.into(),
            self.axis_label_fontsize.to_json(),
        );
        object.insert(keys::NUM_TICKS.into(), json!(self.num_ticks));
        object.insert(keys::TICK_FORMATSTR.into(), json!(self.tick_formatstr));
        object.insert(keys::YMIN.into(), json!(self.ymin));
        object.insert(keys::GRAPH_FILEPATH.into(), json!(self.graph_filepath));
        object.insert(keys::PLOT_TYPE.into(), json!(self.kind.plot_type()));
        match &self.kind {
            PlotKind::Scatter { series } => {
                let series: Vec<Value> = series.iter().map(SeriesSpec::to_json).collect();
                object.insert(keys::SERIES.into(), Value::Array(series));
            }
            PlotKind::FermiSurface(params) => {
                if let Ok(Value::Object(fields)) = serde_json::to_value(params) {
                    object.extend(fields);
                }
            }
        }
        Value::Object(object)
    }
}

impl Serialize for GraphSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_loc_codes_round_trip() {
        for code in 0..=10 {
            let loc = LegendLoc::from_code(code).unwrap();
            assert_eq!(loc.code(), code);
        }
        assert_eq!(LegendLoc::from_code(11), None);
        assert_eq!(LegendLoc::from_name("Upper Left"), Some(LegendLoc::UpperLeft));
    }

    #[test]
    fn test_legend_loc_from_value() {
        assert_eq!(LegendLoc::from_value(&json!(2)).unwrap(), LegendLoc::UpperLeft);
        assert_eq!(LegendLoc::from_value(&json!("4")).unwrap(), LegendLoc::LowerRight);
        assert_eq!(
            LegendLoc::from_value(&json!("lower center")).unwrap(),
            LegendLoc::LowerCenter
        );
        assert!(LegendLoc::from_value(&json!("nowhere")).is_err());
    }

    #[test]
    fn test_font_size_points() {
        assert!((FontSize::Named(NamedFontSize::Large).points() - 12.0).abs() < 1e-9);
        assert!((FontSize::Named(NamedFontSize::XLarge).points() - 14.4).abs() < 1e-9);
        assert_eq!(FontSize::from_value(&json!(16), "f").unwrap(), FontSize::Points(16.0));
        assert_eq!(
            FontSize::from_value(&json!("x-large"), "f").unwrap(),
            FontSize::Named(NamedFontSize::XLarge)
        );
        assert!(FontSize::from_value(&json!("huge"), "f").is_err());
        assert!(FontSize::from_value(&json!(0), "f").is_err());
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(Dimensions::from_value(&Value::Null).unwrap(), None);
        assert_eq!(
            Dimensions::from_value(&json!([8, 6])).unwrap(),
            Some(Dimensions { width: 8.0, height: 6.0 })
        );
        assert!(Dimensions::from_value(&json!([8])).is_err());
        assert!(Dimensions::from_value(&json!([8, -1])).is_err());
    }

    #[test]
    fn test_series_projection_preserves_order() {
        let series = SeriesSpec {
            data: vec![(1.0, 2.0), (3.0, 4.0)],
            ..SeriesSpec::default()
        };
        assert_eq!(series.xs(), vec![1.0, 3.0]);
        assert_eq!(series.ys(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_series_from_xy_requires_equal_lengths() {
        let series = SeriesSpec::from_xy(&[1.0, 2.0], &[3.0, 4.0]).unwrap();
        assert_eq!(series.data, vec![(1.0, 3.0), (2.0, 4.0)]);
        assert!(SeriesSpec::from_xy(&[1.0], &[]).is_err());
    }

    #[test]
    fn test_series_keeps_unknown_keys() {
        let object = json!({"data": [[0, 1]], "label": null, "style": "k.", "color_hint": "red"});
        let Value::Object(object) = object else { unreachable!() };
        let series = SeriesSpec::from_object(object).unwrap();
        assert_eq!(series.extra.get("color_hint"), Some(&json!("red")));
        assert_eq!(series.to_json()["color_hint"], json!("red"));
    }
}
