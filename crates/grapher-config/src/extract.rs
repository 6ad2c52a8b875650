//! Series and graph sets from computed records.
//!
//! A producer that sweeps parameters ends up with one [`Record`] per run,
//! mapping variable names to values. [`SeriesQuery`] pulls `(x, y)` curves
//! out of such records, one curve per value of a splitting variable.
//! [`multi_plot_specs`] goes one step further and builds a graph for every
//! way of choosing one parameter to vary while the others stay fixed.

use std::collections::BTreeMap;

use grapher_common::{GrapherError, Result};

use crate::builder::parameter_series;
use crate::schema::{GraphSpec, PlotKind};

/// Named values computed for one run.
pub type Record = BTreeMap<String, f64>;

/// Precision of the parameter value in multi-plot legend labels.
pub const LABEL_PRECISION: usize = 3;

/// Where a coordinate comes from.
#[derive(Debug, Clone, Copy)]
pub enum Variable<'a> {
    /// The record field with this name.
    Field(&'a str),
    /// A value computed from the whole record.
    Computed(fn(&Record) -> f64),
}

impl<'a> From<&'a str> for Variable<'a> {
    fn from(name: &'a str) -> Self {
        Self::Field(name)
    }
}

fn field(record: &Record, name: &str) -> Result<f64> {
    record
        .get(name)
        .copied()
        .ok_or_else(|| GrapherError::validation_field(format!("record has no {name}"), name))
}

/// Curves pulled out of a set of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedSeries {
    /// One curve per split value, points in ascending x.
    pub curves: Vec<Vec<(f64, f64)>>,
    /// Split value of each curve, ascending. Empty when not split.
    pub values: Vec<f64>,
}

/// Selects `(x, y)` points from records.
#[derive(Debug, Clone)]
pub struct SeriesQuery<'a> {
    x: Variable<'a>,
    y: Variable<'a>,
    split_by: Option<&'a str>,
    constraints: BTreeMap<&'a str, f64>,
    origin: bool,
}

impl<'a> SeriesQuery<'a> {
    /// A query for a single curve of `y` against `x`.
    pub fn new(x: impl Into<Variable<'a>>, y: impl Into<Variable<'a>>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            split_by: None,
            constraints: BTreeMap::new(),
            origin: false,
        }
    }

    /// One curve per distinct value of the field `name`.
    #[must_use]
    pub const fn split_by(mut self, name: &'a str) -> Self {
        self.split_by = Some(name);
        self
    }

    /// Keep only records whose field `name` equals `value` exactly.
    #[must_use]
    pub fn constrain(mut self, name: &'a str, value: f64) -> Self {
        self.constraints.insert(name, value);
        self
    }

    /// Keep only records matching every entry of `fixed`.
    #[must_use]
    pub fn constrain_all(self, fixed: &'a BTreeMap<String, f64>) -> Self {
        fixed
            .iter()
            .fold(self, |query, (name, &value)| query.constrain(name, value))
    }

    /// Start every curve at the origin.
    #[must_use]
    pub const fn with_origin(mut self) -> Self {
        self.origin = true;
        self
    }

    fn accepts(&self, record: &Record) -> Result<bool> {
        for (&name, &value) in &self.constraints {
            if field(record, name)? != value {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Extract the curves from `records`.
    ///
    /// A missing x, split or constraint field is an error. A missing or NaN
    /// y field reads as zero. When several records share an x within a
    /// curve, the last one wins.
    pub fn extract(&self, records: &[Record]) -> Result<ExtractedSeries> {
        let mut groups: Vec<(f64, Vec<(f64, f64)>)> = Vec::new();
        for record in records {
            if !self.accepts(record)? {
                continue;
            }
            let x = match self.x {
                Variable::Field(name) => field(record, name)?,
                Variable::Computed(f) => f(record),
            };
            let y = match self.y {
                Variable::Field(name) => record.get(name).copied().unwrap_or(0.0),
                Variable::Computed(f) => f(record),
            };
            let y = if y.is_nan() { 0.0 } else { y };
            let z = match self.split_by {
                Some(name) => field(record, name)?,
                None => 0.0,
            };

            let index = match groups.iter().position(|(value, _)| *value == z) {
                Some(index) => index,
                None => {
                    groups.push((z, Vec::new()));
                    groups.len() - 1
                }
            };
            let points = &mut groups[index].1;
            match points.iter_mut().find(|(px, _)| *px == x) {
                Some(point) => point.1 = y,
                None => points.push((x, y)),
            }
        }

        groups.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut extracted = ExtractedSeries::default();
        for (value, mut points) in groups {
            if self.origin && !points.iter().any(|(x, _)| *x == 0.0) {
                points.push((0.0, 0.0));
            }
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            extracted.curves.push(points);
            if self.split_by.is_some() {
                extracted.values.push(value);
            }
        }
        if self.split_by.is_none() && extracted.curves.is_empty() {
            extracted.curves.push(Vec::new());
        }
        tracing::debug!(
            records = records.len(),
            curves = extracted.curves.len(),
            "extracted series"
        );
        Ok(extracted)
    }
}

/// Axes and swept parameters of a multi-plot.
#[derive(Debug, Clone)]
pub struct GraphVars<'a> {
    /// Horizontal coordinate.
    pub x: Variable<'a>,
    /// Vertical coordinate.
    pub y: Variable<'a>,
    /// Parameter field names with their legend labels, TeX allowed.
    pub params: Vec<(&'a str, &'a str)>,
}

impl<'a> GraphVars<'a> {
    /// Plot `y` against `x` with no parameters yet.
    pub fn new(x: impl Into<Variable<'a>>, y: impl Into<Variable<'a>>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            params: Vec::new(),
        }
    }

    /// Add a swept parameter.
    #[must_use]
    pub fn param(mut self, name: &'a str, label: &'a str) -> Self {
        self.params.push((name, label));
        self
    }
}

/// Sorted distinct values of each parameter across `records`.
///
/// A parameter missing from any record is an error.
pub fn param_values(records: &[Record], params: &[&str]) -> Result<BTreeMap<String, Vec<f64>>> {
    let mut values: BTreeMap<String, Vec<f64>> = params
        .iter()
        .map(|&name| (name.to_string(), Vec::new()))
        .collect();
    for record in records {
        for &name in params {
            let value = field(record, name)?;
            let seen = values.entry(name.to_string()).or_default();
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
    }
    for seen in values.values_mut() {
        seen.sort_by(f64::total_cmp);
    }
    Ok(values)
}

/// One graph of a multi-plot: the parameter that varies across its curves
/// and the values every other parameter is held at.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamCombination {
    /// Parameter distinguishing the curves.
    pub primary: String,
    /// Legend label of the primary parameter.
    pub label: String,
    /// Values of the remaining parameters.
    pub fixed: BTreeMap<String, f64>,
}

impl ParamCombination {
    /// `base` followed by `{name}_{value}_` for each fixed parameter, in name
    /// order, with six decimals.
    #[must_use]
    pub fn stem(&self, base: &str) -> String {
        let mut stem = base.to_string();
        for (name, value) in &self.fixed {
            stem.push_str(&format!("{name}_{value:.6}_"));
        }
        stem
    }
}

fn fixed_values(values: &BTreeMap<String, Vec<f64>>, names: &[&str]) -> Vec<BTreeMap<String, f64>> {
    let Some((&first, rest)) = names.split_first() else {
        return Vec::new();
    };
    let choices = values.get(first).map_or(&[][..], Vec::as_slice);
    if rest.is_empty() {
        return choices
            .iter()
            .map(|&value| BTreeMap::from([(first.to_string(), value)]))
            .collect();
    }
    let mut combos = Vec::new();
    for base in fixed_values(values, rest) {
        for &value in choices {
            let mut combo = base.clone();
            combo.insert(first.to_string(), value);
            combos.push(combo);
        }
    }
    combos
}

/// Every graph of a multi-plot, in order.
///
/// Each parameter takes a turn as the primary; while it is primary, every
/// combination of the other parameters' values gets its own graph. A single
/// parameter gives exactly one graph and no parameters give none.
#[must_use]
pub fn param_combinations(
    values: &BTreeMap<String, Vec<f64>>,
    params: &[(&str, &str)],
) -> Vec<ParamCombination> {
    if let [(name, label)] = params {
        return vec![ParamCombination {
            primary: (*name).to_string(),
            label: (*label).to_string(),
            fixed: BTreeMap::new(),
        }];
    }
    let mut combos = Vec::new();
    for &(primary, label) in params {
        let others: Vec<&str> = params
            .iter()
            .map(|&(name, _)| name)
            .filter(|&name| name != primary)
            .collect();
        for fixed in fixed_values(values, &others) {
            combos.push(ParamCombination {
                primary: primary.to_string(),
                label: label.to_string(),
                fixed,
            });
        }
    }
    combos
}

/// Graph specs for every parameter combination of `records`.
///
/// Each spec copies `template`, takes its output stem from the template's
/// `graph_filepath` plus the fixed parameters, and holds one curve per
/// value of the primary parameter styled from `styles`.
pub fn multi_plot_specs(
    records: &[Record],
    vars: &GraphVars<'_>,
    template: &GraphSpec,
    styles: &[&str],
) -> Result<Vec<GraphSpec>> {
    let base = template.graph_filepath.as_deref().ok_or_else(|| {
        GrapherError::validation_field(
            "a multi-plot needs an output stem",
            crate::defaults::keys::GRAPH_FILEPATH,
        )
    })?;
    let names: Vec<&str> = vars.params.iter().map(|&(name, _)| name).collect();
    let values = param_values(records, &names)?;

    param_combinations(&values, &vars.params)
        .into_iter()
        .map(|combo| {
            let extracted = SeriesQuery::new(vars.x, vars.y)
                .split_by(&combo.primary)
                .constrain_all(&combo.fixed)
                .extract(records)?;
            let series = parameter_series(
                &combo.label,
                LABEL_PRECISION,
                &extracted.values,
                extracted.curves,
                styles,
            )?;
            Ok(GraphSpec {
                graph_filepath: Some(combo.stem(base)),
                kind: PlotKind::Scatter { series },
                ..template.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{COLOR_STYLES, PRINT_STYLES};

    fn record(fields: &[(&str, f64)]) -> Record {
        fields.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    /// `X = n - i`, `Y = i`, `Z = i % 2` for `i` in `0..n`.
    fn alternating(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let (i, n) = (i as f64, n as f64);
                record(&[("X", n - i), ("Y", i), ("Z", i % 2.0)])
            })
            .collect()
    }

    fn sweep() -> Vec<Record> {
        let mut records = Vec::new();
        for a in [2.0, 1.0] {
            for b in [10.0, 20.0, 30.0] {
                for x in [0.0, 1.0] {
                    records.push(record(&[("x", x), ("y", a * b * x), ("a", a), ("b", b)]));
                }
            }
        }
        records
    }

    #[test]
    fn test_single_curve_is_sorted() {
        let extracted = SeriesQuery::new("X", "Y").extract(&alternating(5)).unwrap();
        assert!(extracted.values.is_empty());
        assert_eq!(
            extracted.curves,
            vec![vec![(1.0, 4.0), (2.0, 3.0), (3.0, 2.0), (4.0, 1.0), (5.0, 0.0)]]
        );
    }

    #[test]
    fn test_split_by_groups_and_sorts() {
        let extracted = SeriesQuery::new("X", "Y")
            .split_by("Z")
            .extract(&alternating(6))
            .unwrap();
        assert_eq!(extracted.values, vec![0.0, 1.0]);
        assert_eq!(extracted.curves[0], vec![(2.0, 4.0), (4.0, 2.0), (6.0, 0.0)]);
        assert_eq!(extracted.curves[1], vec![(1.0, 5.0), (3.0, 3.0), (5.0, 1.0)]);
    }

    #[test]
    fn test_constraints_filter_records() {
        let extracted = SeriesQuery::new("X", "Y")
            .constrain("Z", 1.0)
            .extract(&alternating(6))
            .unwrap();
        assert_eq!(extracted.curves, vec![vec![(1.0, 5.0), (3.0, 3.0), (5.0, 1.0)]]);
    }

    #[test]
    fn test_y_defaults_and_last_duplicate_wins() {
        let records = vec![
            record(&[("x", 1.0), ("y", 5.0)]),
            record(&[("x", 2.0)]),
            record(&[("x", 3.0), ("y", f64::NAN)]),
            record(&[("x", 1.0), ("y", 7.0)]),
        ];
        let extracted = SeriesQuery::new("x", "y").extract(&records).unwrap();
        assert_eq!(extracted.curves, vec![vec![(1.0, 7.0), (2.0, 0.0), (3.0, 0.0)]]);
    }

    #[test]
    fn test_computed_variables_and_origin() {
        fn twice_x(r: &Record) -> f64 {
            2.0 * r["x"]
        }
        let records = vec![record(&[("x", 2.0)]), record(&[("x", 1.0)])];
        let extracted = SeriesQuery::new("x", Variable::Computed(twice_x))
            .with_origin()
            .extract(&records)
            .unwrap();
        assert_eq!(extracted.curves, vec![vec![(0.0, 0.0), (1.0, 2.0), (2.0, 4.0)]]);

        let at_zero = vec![record(&[("x", 0.0), ("y", 3.0)])];
        let extracted = SeriesQuery::new("x", "y").with_origin().extract(&at_zero).unwrap();
        assert_eq!(extracted.curves, vec![vec![(0.0, 3.0)]]);
    }

    #[test]
    fn test_missing_fields_are_errors() {
        let records = vec![record(&[("y", 1.0)])];
        let err = SeriesQuery::new("x", "y").extract(&records).unwrap_err();
        assert_eq!(err.field(), Some("x"));
        let records = vec![record(&[("x", 1.0)])];
        let err = SeriesQuery::new("x", "y")
            .split_by("z")
            .extract(&records)
            .unwrap_err();
        assert_eq!(err.field(), Some("z"));
        let err = SeriesQuery::new("x", "y")
            .constrain("c", 1.0)
            .extract(&records)
            .unwrap_err();
        assert_eq!(err.field(), Some("c"));
    }

    #[test]
    fn test_param_values_are_distinct_and_sorted() {
        let values = param_values(&sweep(), &["a", "b"]).unwrap();
        assert_eq!(values["a"], vec![1.0, 2.0]);
        assert_eq!(values["b"], vec![10.0, 20.0, 30.0]);
        let err = param_values(&sweep(), &["c"]).unwrap_err();
        assert_eq!(err.field(), Some("c"));
    }

    #[test]
    fn test_single_parameter_gives_one_graph() {
        let values = param_values(&sweep(), &["a"]).unwrap();
        let combos = param_combinations(&values, &[("a", "$a$")]);
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].primary, "a");
        assert!(combos[0].fixed.is_empty());
        assert_eq!(combos[0].stem("out/g_"), "out/g_");
        assert!(param_combinations(&values, &[]).is_empty());
    }

    #[test]
    fn test_each_parameter_takes_a_turn_as_primary() {
        let values = param_values(&sweep(), &["a", "b"]).unwrap();
        let combos = param_combinations(&values, &[("a", "$a$"), ("b", "$b$")]);
        let summary: Vec<(&str, f64)> = combos
            .iter()
            .map(|c| {
                let (_, &value) = c.fixed.iter().next().unwrap();
                (c.primary.as_str(), value)
            })
            .collect();
        assert_eq!(
            summary,
            [("a", 10.0), ("a", 20.0), ("a", 30.0), ("b", 1.0), ("b", 2.0)]
        );
        assert_eq!(combos[3].label, "$b$");
    }

    #[test]
    fn test_first_secondary_varies_fastest() {
        let values = BTreeMap::from([
            ("a".to_string(), vec![0.0]),
            ("b".to_string(), vec![1.0, 2.0]),
            ("c".to_string(), vec![5.0, 6.0]),
        ]);
        let combos = param_combinations(&values, &[("a", "a"), ("b", "b"), ("c", "c")]);
        let as_primary: Vec<Vec<f64>> = combos
            .iter()
            .filter(|c| c.primary == "a")
            .map(|c| c.fixed.values().copied().collect())
            .collect();
        assert_eq!(
            as_primary,
            [[1.0, 5.0], [2.0, 5.0], [1.0, 6.0], [2.0, 6.0]]
        );
        assert_eq!(combos.len(), 4 + 2 + 2);
    }

    #[test]
    fn test_stem_appends_fixed_parameters_in_name_order() {
        let combo = ParamCombination {
            primary: "Tz".to_string(),
            label: "$T_z$".to_string(),
            fixed: BTreeMap::from([("tz".to_string(), 0.1), ("Th".to_string(), -0.25)]),
        };
        assert_eq!(combo.stem("out/tp_"), "out/tp_Th_-0.250000_tz_0.100000_");
    }

    #[test]
    fn test_multi_plot_specs() {
        let template = GraphSpec {
            xlabel: "$x$".to_string(),
            graph_filepath: Some("out/y_".to_string()),
            ..GraphSpec::default()
        };
        let vars = GraphVars::new("x", "y").param("a", "$a$").param("b", "$b$");
        let specs = multi_plot_specs(&sweep(), &vars, &template, &PRINT_STYLES).unwrap();
        assert_eq!(specs.len(), 5);

        let first = &specs[0];
        assert_eq!(first.xlabel, "$x$");
        assert_eq!(first.graph_filepath.as_deref(), Some("out/y_b_10.000000_"));
        let series = first.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label.as_deref(), Some("$a$=1.000"));
        assert_eq!(series[1].label.as_deref(), Some("$a$=2.000"));
        assert_eq!(series[1].data, vec![(0.0, 0.0), (1.0, 20.0)]);
        assert_eq!(series[1].style, "k--");

        let last = &specs[4];
        assert_eq!(last.graph_filepath.as_deref(), Some("out/y_a_2.000000_"));
        assert_eq!(last.series().len(), 3);
    }

    #[test]
    fn test_multi_plot_needs_an_output_stem() {
        let vars = GraphVars::new("x", "y").param("a", "$a$");
        let err =
            multi_plot_specs(&sweep(), &vars, &GraphSpec::default(), &COLOR_STYLES).unwrap_err();
        assert_eq!(err.field(), Some(crate::defaults::keys::GRAPH_FILEPATH));
    }
}
