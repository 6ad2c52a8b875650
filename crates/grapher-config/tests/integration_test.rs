//! Integration tests for grapher-config crate.
//!
//! These tests exercise the JSON loader end to end, including the defaulting
//! properties every graph object goes through.

use grapher_common::test_utils::{create_temp_dir, graph_fixtures, init_test_logging};
use grapher_config::{
    fill_defaults, fermi_surface_spec, load_file, parse, write_spec_json, FermiParams,
    GraphDocument, GraphSpecBuilder, LegendLoc, PlotKind, SeriesSpec, COLOR_STYLES,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

#[test]
fn test_two_series_fixture() {
    init_test_logging();

    let spec = parse(graph_fixtures::TWO_SERIES)
        .unwrap()
        .into_specs()
        .remove(0);
    assert_eq!(spec.ymin, Some(0.5));
    assert_eq!(spec.legend_title.as_deref(), Some("runs"));
    assert_eq!(spec.legend_loc, LegendLoc::Best);
    assert_eq!(spec.num_ticks, 5);
    assert_eq!(spec.tick_formatstr, "%.2f");

    let series = spec.series();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].xs(), vec![1.0, 3.0]);
    assert_eq!(series[0].ys(), vec![2.0, 4.0]);
    assert_eq!(series[1].style, "bo--");
}

#[test]
fn test_empty_graph_gets_every_default() {
    let doc = parse(graph_fixtures::EMPTY_GRAPH).unwrap();
    assert!(matches!(doc, GraphDocument::Single(_)));
    let spec = doc.into_specs().remove(0);
    assert_eq!(spec.xlabel, "x");
    assert_eq!(spec.ylabel, "y");
    assert!(spec.series().is_empty());
    assert!(spec.graph_filepath.is_none());
    assert!(spec.dimensions.is_none());
}

#[test]
fn test_batch_keeps_document_order() {
    let specs = parse(&graph_fixtures::batch()).unwrap().into_specs();
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].kind.plot_type(), "scatter");
    assert!(matches!(specs[1].kind, PlotKind::FermiSurface(p) if p.epsilon_min == -4.0));
}

#[test]
fn test_written_spec_loads_back() {
    let dir = create_temp_dir();
    let stem = dir.path().join("nested").join("tp_vs_x");
    let series = grapher_config::parameter_series(
        "t_z",
        2,
        &[0.5, 1.0],
        vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(0.0, 3.0)]],
        &COLOR_STYLES,
    )
    .unwrap();
    let spec = GraphSpecBuilder::new()
        .labels("$x$", "$T_p$")
        .dimensions(8.0, 6.0)
        .ymin(0.0)
        .output(stem.to_string_lossy())
        .extend_series(series)
        .build();

    let path = write_spec_json(&spec).unwrap();
    assert_eq!(path.file_name().unwrap(), "tp_vs_x.json");

    let loaded = load_file(&path).unwrap().into_specs().remove(0);
    assert_eq!(loaded, spec);
    assert_eq!(loaded.series()[1].label.as_deref(), Some("t_z=1.00"));
    assert_eq!(loaded.series()[1].style, "r-");
}

#[test]
fn test_fermi_spec_written_and_loaded() {
    let dir = create_temp_dir();
    let params = FermiParams {
        th: 0.5,
        thp: 0.25,
        t0: 1.0,
        d1: 0.125,
        mu_h: -0.5,
        epsilon_min: -1.5,
    };
    let stem = dir.path().join("fs");
    let spec = fermi_surface_spec(params, stem.to_string_lossy());
    let path = write_spec_json(&spec).unwrap();

    let loaded = load_file(path).unwrap().into_specs().remove(0);
    assert_eq!(loaded.kind, PlotKind::FermiSurface(params));
    assert!(loaded.series().is_empty());
}

#[test]
fn test_series_from_xy_in_builder() {
    let spec = GraphSpecBuilder::new()
        .series(SeriesSpec::from_xy(&[0.0, 1.0, 2.0], &[4.0, 5.0, 6.0]).unwrap())
        .build();
    assert_eq!(spec.series()[0].style, "k.");
    assert_eq!(spec.series()[0].data.len(), 3);
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(|n| json!(n)),
        "[a-z$_ ]{0,8}".prop_map(Value::String),
    ]
}

fn graph_object() -> impl Strategy<Value = Map<String, Value>> {
    let key = prop_oneof![
        Just("xlabel".to_string()),
        Just("ylabel".to_string()),
        Just("ymin".to_string()),
        Just("legend_loc".to_string()),
        Just("graph_filepath".to_string()),
        Just("th".to_string()),
        "[a-z]{1,6}",
    ];
    let series = prop::collection::vec(
        prop::collection::btree_map("[a-z]{1,5}", scalar(), 0..4),
        0..3,
    );
    (prop::collection::btree_map(key, scalar(), 0..6), series).prop_map(|(fields, series)| {
        let mut object: Map<String, Value> = fields.into_iter().collect();
        let series: Vec<Value> = series
            .into_iter()
            .map(|s| Value::Object(s.into_iter().collect()))
            .collect();
        object.insert("series".into(), Value::Array(series));
        object
    })
}

proptest! {
    #[test]
    fn prop_defaulting_is_idempotent(object in graph_object()) {
        let mut once = object;
        fill_defaults(&mut once);
        let mut twice = once.clone();
        fill_defaults(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_defaulting_never_changes_provided_values(object in graph_object()) {
        let mut filled = object.clone();
        fill_defaults(&mut filled);
        for (key, value) in &object {
            if key == "series" {
                continue;
            }
            prop_assert_eq!(filled.get(key), Some(value));
        }
        let before = object["series"].as_array().cloned().unwrap_or_default();
        let after = filled["series"].as_array().cloned().unwrap_or_default();
        prop_assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(&after) {
            for (key, value) in old.as_object().into_iter().flatten() {
                prop_assert_eq!(new.get(key), Some(value));
            }
        }
    }
}
