//! Writers that persist a [`Plot`] under an output stem.

use std::fs;
use std::path::{Path, PathBuf};

use grapher_common::Result;
use tracing::{debug, info};

use crate::eps::render_eps;
use crate::painter::Plot;
use crate::raster::{render_image, save_png};

/// A file format a figure is written in.
pub trait FigureWriter {
    /// Extension appended to the output stem, without the dot.
    fn extension(&self) -> &'static str;

    /// Writes `plot` to `path`.
    fn write(&self, plot: &Plot, path: &Path) -> Result<()>;
}

/// Raster output through the bitmap backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngWriter;

impl FigureWriter for PngWriter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn write(&self, plot: &Plot, path: &Path) -> Result<()> {
        save_png(&render_image(plot)?, path)
    }
}

/// Vector output through the PostScript backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct EpsWriter;

impl FigureWriter for EpsWriter {
    fn extension(&self) -> &'static str {
        "eps"
    }

    fn write(&self, plot: &Plot, path: &Path) -> Result<()> {
        render_eps(plot, path)
    }
}

/// The writers every spec-driven figure goes through, in order.
#[must_use]
pub fn default_writers() -> Vec<Box<dyn FigureWriter>> {
    vec![Box::new(PngWriter), Box::new(EpsWriter)]
}

/// `stem` with `.extension` appended as text, so dots already in the stem
/// are kept.
#[must_use]
pub fn output_path(stem: &str, extension: &str) -> PathBuf {
    PathBuf::from(format!("{stem}.{extension}"))
}

/// Creates the directory `path` will be written into.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Writes `plot` once per writer under `stem` and returns the paths.
pub fn write_all(
    plot: &Plot,
    stem: &str,
    writers: &[Box<dyn FigureWriter>],
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::with_capacity(writers.len());
    for writer in writers {
        let path = output_path(stem, writer.extension());
        ensure_parent(&path)?;
        debug!(path = %path.display(), format = writer.extension(), "Writing figure");
        writer.write(plot, &path)?;
        files.push(path);
    }
    info!(graph = plot.name, stem, files = files.len(), "Saved figure");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_appends_extension() {
        assert_eq!(output_path("out/plot", "png"), PathBuf::from("out/plot.png"));
        assert_eq!(
            output_path("out/run.v2", "eps"),
            PathBuf::from("out/run.v2.eps")
        );
    }

    #[test]
    fn test_default_writers_order() {
        let extensions: Vec<_> = default_writers().iter().map(|w| w.extension()).collect();
        assert_eq!(extensions, vec!["png", "eps"]);
    }

    #[test]
    fn test_ensure_parent_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/plot.png");
        ensure_parent(&path).unwrap();
        assert!(dir.path().join("a/b").is_dir());
        ensure_parent(Path::new("plot.png")).unwrap();
    }
}
