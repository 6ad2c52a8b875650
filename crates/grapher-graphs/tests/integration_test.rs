//! Integration tests for grapher-graphs crate.
//!
//! These tests run graph documents through the assembler and the symmetry
//! factor renderers and inspect what lands on disk.

use std::f64::consts::FRAC_PI_2;
use std::fs;

use grapher_common::test_utils::{create_temp_dir, graph_fixtures, init_test_logging};
use grapher_config::{parse, GraphSpec, PlotKind};
use grapher_graphs::eps::render_eps_string;
use grapher_graphs::fermi::occupation;
use grapher_graphs::{
    render_contour, render_surface, symmetry_factor, FigureKind, GraphAssembler, RenderedFigure,
};
use serde_json::json;

fn specs(text: &str) -> Vec<GraphSpec> {
    parse(text).unwrap().into_specs()
}

fn render(text: &str) -> RenderedFigure {
    GraphAssembler::new().render(specs(text).remove(0)).unwrap()
}

#[test]
fn test_empty_graph_renders_empty_axes() {
    init_test_logging();
    let figure = render(graph_fixtures::EMPTY_GRAPH);
    assert_eq!(figure.points(), 0);
    assert_eq!(
        figure.kind,
        FigureKind::Scatter {
            series: 0,
            points: 0,
            legend: false
        }
    );
    assert_eq!((figure.x_range.min, figure.x_range.max), (0.0, 1.0));
    assert_eq!(figure.size.pixels(), (640, 480));
    assert!(figure.files.is_empty());
}

#[test]
fn test_ymin_string_clamps_lower_bound() {
    init_test_logging();
    let figure = render(graph_fixtures::TWO_SERIES);
    assert_eq!(figure.y_range.min, 0.5);
    assert!(figure.y_range.max > 5.0);
    assert_eq!(figure.points(), 5);
}

#[test]
fn test_filepath_writes_png_and_eps() {
    init_test_logging();
    let dir = create_temp_dir();
    let stem = dir.path().join("out").join("plot");
    let doc = json!({
        "graph_filepath": stem.to_string_lossy(),
        "dimensions": [4.0, 3.0],
        "legend_title": "runs",
        "series": [
            {"data": [[0, 0], [1, 1], [2, 4]], "label": "$x^2$", "style": "k--"},
            {"data": [[0, 1], [2, 1]], "label": "flat", "style": "s"}
        ]
    });
    let figure = render(&doc.to_string());

    let mut written: Vec<String> = fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(written, vec!["plot.eps", "plot.png"]);
    assert_eq!(figure.files.len(), 2);

    let png = image::open(dir.path().join("out/plot.png")).unwrap();
    assert_eq!((png.width(), png.height()), (400, 300));
    let eps = fs::read_to_string(dir.path().join("out/plot.eps")).unwrap();
    assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0"));
    assert!(eps.contains("%%BoundingBox: 0 0 288 216"));
}

#[test]
fn test_stem_with_dots_keeps_them() {
    let dir = create_temp_dir();
    let stem = dir.path().join("run.v2");
    let doc = json!({"graph_filepath": stem.to_string_lossy(), "series": []});
    let figure = render(&doc.to_string());
    assert!(dir.path().join("run.v2.png").is_file());
    assert!(dir.path().join("run.v2.eps").is_file());
    assert_eq!(figure.files[0], dir.path().join("run.v2.png"));
}

#[test]
fn test_fermi_surface_batch() {
    init_test_logging();
    let results = GraphAssembler::new().render_all(specs(&graph_fixtures::batch()));
    assert_eq!(results.len(), 2);
    let fermi = results[1].as_ref().unwrap();
    assert!(matches!(fermi.kind, FigureKind::FermiSurface { segments } if segments > 0));
    assert_eq!(fermi.points(), 0);
    assert!((fermi.x_range.max - std::f64::consts::PI).abs() < 1e-12);
}

#[test]
fn test_fermi_origin_is_empty() {
    let spec = specs(graph_fixtures::FERMI_SURFACE).remove(0);
    let PlotKind::FermiSurface(params) = spec.kind else {
        panic!("expected a Fermi surface spec");
    };
    assert_eq!(occupation(&params, 0.0, 0.0), 0.0);
}

#[test]
fn test_eps_document_for_laid_out_graph() {
    let spec = specs(graph_fixtures::TWO_SERIES).remove(0);
    let (plot, _) = GraphAssembler::new().layout(&spec).unwrap();
    let eps = render_eps_string(&plot).unwrap();
    assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0"));
    assert!(eps.contains("(runs)"));
    assert!(eps.contains("(T_p)"));
    assert!(eps.trim_end().ends_with("%%EOF"));
}

#[test]
fn test_bad_style_is_reported_per_graph() {
    let results = GraphAssembler::new().render_all(specs(
        r#"[{"series": [{"data": [[1, 2]], "style": "q"}]}, {}]"#,
    ));
    assert!(results[0].is_err());
    assert!(results[1].is_ok());
}

#[test]
fn test_symmetry_factor_vanishes_for_opposite_alpha() {
    assert_eq!(symmetry_factor(-1.0, FRAC_PI_2, FRAC_PI_2), 0.0);
}

#[test]
fn test_render_contour_writes_cropped_png() {
    init_test_logging();
    let dir = create_temp_dir();
    let stem = dir.path().join("sym_alpha_m1");
    let path = render_contour(-1.0, &stem.to_string_lossy(), false).unwrap();
    assert_eq!(path, dir.path().join("sym_alpha_m1.png"));
    assert!(!dir.path().join("sym_alpha_m1.eps").exists());

    let png = image::open(&path).unwrap();
    assert!(png.width() <= 1280 && png.height() <= 960);
    assert!(png.width() > 100 && png.height() > 100);
}

#[test]
fn test_render_surface_stays_in_memory() {
    let dir = create_temp_dir();
    let view = render_surface(1.0).unwrap();
    assert_eq!(view.nodes, 63);
    assert_eq!(view.image.dimensions(), (640, 480));

    let preview = dir.path().join("preview/surface.png");
    view.save(&preview).unwrap();
    assert!(preview.is_file());
}
