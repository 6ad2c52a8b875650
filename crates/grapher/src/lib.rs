//! # Grapher
//!
//! Command line front ends for the Grapher workspace.
//!
//! `grapher` renders every graph described by a JSON document, and
//! `symmetry-factor` draws the symmetry factor contours and surface.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;

pub use app::*;
pub use cli::*;
