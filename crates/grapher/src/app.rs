//! What the binaries do once their arguments are parsed.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use grapher_common::GrapherError;
use grapher_config::load_file_each;
use grapher_graphs::{render_contour, render_surface, GraphAssembler, RenderedFigure};
use tracing::info;

use crate::cli::{LogArgs, SymmetryCommand};

/// Contours drawn by `symmetry-factor` without a subcommand.
pub const DEFAULT_CONTOURS: [(f64, &str); 2] = [(-1.0, "sym_alpha_m1"), (1.0, "sym_alpha_p1")];

/// Outcome of rendering one graph document.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Figures that rendered, in document order.
    pub rendered: Vec<RenderedFigure>,
    /// Position in the document and error of every graph that failed.
    pub failures: Vec<(usize, GrapherError)>,
}

impl BatchReport {
    /// Whether every graph rendered.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Paths of every file written by the batch.
    #[must_use]
    pub fn files(&self) -> Vec<&Path> {
        self.rendered
            .iter()
            .flat_map(|figure| figure.files.iter().map(PathBuf::as_path))
            .collect()
    }
}

/// Install the subscriber described by a binary's logging options.
pub fn init_logging(args: &LogArgs) -> anyhow::Result<()> {
    grapher_common::init_logging(args.config())
        .map_err(|err| anyhow!(err).context("cannot initialise logging"))
}

/// Load the graph document at `input` and render each graph in it.
///
/// Only an unusable document is an error: unreadable, not JSON, or with a
/// top level that is neither an object nor an array. Graphs that fail to
/// decode or render are collected in the report at their position.
pub fn run_graphs(input: &Path) -> anyhow::Result<BatchReport> {
    let graphs = load_file_each(input)
        .with_context(|| format!("loading graphs from {}", input.display()))?;
    info!(path = %input.display(), graphs = graphs.len(), "Loaded graph document");

    let mut report = BatchReport::default();
    let results = GraphAssembler::new().render_each(graphs);
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(figure) => report.rendered.push(figure),
            Err(err) => report.failures.push((index, err)),
        }
    }
    Ok(report)
}

/// Run one `symmetry-factor` invocation and return the files it wrote.
pub fn run_symmetry(command: Option<SymmetryCommand>) -> anyhow::Result<Vec<PathBuf>> {
    match command {
        None => DEFAULT_CONTOURS
            .iter()
            .map(|&(alpha, stem)| {
                render_contour(alpha, stem, false)
                    .with_context(|| format!("rendering contour for alpha = {alpha}"))
            })
            .collect(),
        Some(SymmetryCommand::Contour {
            alpha,
            out,
            large_font,
        }) => {
            let path = render_contour(alpha, &out, large_font)
                .with_context(|| format!("rendering contour for alpha = {alpha}"))?;
            Ok(vec![path])
        }
        Some(SymmetryCommand::Surface { alpha, preview }) => {
            let view = render_surface(alpha)
                .with_context(|| format!("rendering surface for alpha = {alpha}"))?;
            match preview {
                Some(path) => {
                    view.save(&path)
                        .with_context(|| format!("saving preview to {}", path.display()))?;
                    Ok(vec![path])
                }
                None => Ok(Vec::new()),
            }
        }
    }
}
