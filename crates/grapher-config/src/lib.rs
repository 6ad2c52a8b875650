//! # Grapher Config
//!
//! Graph specification schema, defaults and JSON loading for Grapher.
//!
//! A JSON document holds one graph object or a list of them. Each object is
//! filled with defaults for the keys it lacks and then decoded into a typed
//! [`GraphSpec`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod defaults;
pub mod extract;
pub mod loader;
pub mod schema;
pub mod validator;

pub use builder::*;
pub use defaults::*;
pub use extract::*;
pub use loader::*;
pub use schema::*;
