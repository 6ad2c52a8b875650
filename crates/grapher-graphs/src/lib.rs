//! # Grapher Graphs
//!
//! Rendering of graph specs with plotters.
//!
//! Scatter and Fermi surface graphs are assembled into a [`Plot`] and written
//! through the [`FigureWriter`] set (PNG and EPS). Producers of computed data
//! go through [`GraphAssembler::plot_spec`] and [`GraphAssembler::multi_plot`],
//! which also keep the `GraphSpec` as JSON. The symmetry factor renderers stand
//! apart from the `GraphSpec` pipeline.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod assembler;
pub mod contour;
pub mod eps;
pub mod fermi;
pub mod figure;
pub mod geometry;
pub mod legend;
pub mod output;
pub mod painter;
pub mod producer;
pub mod raster;
pub mod series;
pub mod style;
pub mod surface;
pub mod symmetry;
pub mod text;
pub mod ticks;
pub mod traits;

pub use assembler::*;
pub use figure::*;
pub use output::*;
pub use painter::{Layer, Plot};
pub use producer::PlottedGraph;
pub use surface::{render_surface, SurfaceView};
pub use symmetry::*;
pub use traits::*;
