//! Loading graph documents from JSON text or files.

use std::path::{Path, PathBuf};

use grapher_common::{GrapherError, Result};
use serde_json::Value;

use crate::defaults::fill_defaults;
use crate::schema::GraphSpec;

/// A parsed document: one graph object or a list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphDocument {
    /// The document was a single object.
    Single(GraphSpec),
    /// The document was an array; order is preserved.
    Many(Vec<GraphSpec>),
}

impl GraphDocument {
    /// All specs in document order.
    #[must_use]
    pub fn into_specs(self) -> Vec<GraphSpec> {
        match self {
            Self::Single(spec) => vec![spec],
            Self::Many(specs) => specs,
        }
    }

    /// Number of graphs in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(specs) => specs.len(),
        }
    }

    /// Whether the document is an empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn decode_graph(value: Value, index: Option<usize>) -> Result<GraphSpec> {
    match value {
        Value::Object(mut object) => {
            fill_defaults(&mut object);
            GraphSpec::from_object(object)
        }
        other => Err(GrapherError::malformed(match index {
            Some(i) => format!("graph #{i} must be an object, got {other}"),
            None => format!("document must be an object or a list of objects, got {other}"),
        })),
    }
}

/// Parse an already decoded JSON value.
pub fn parse_value(value: Value) -> Result<GraphDocument> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| decode_graph(item, Some(i)))
            .collect::<Result<Vec<_>>>()
            .map(GraphDocument::Many),
        other => decode_graph(other, None).map(GraphDocument::Single),
    }
}

/// Parse JSON text holding one graph object or a list of them.
///
/// Every object is defaulted and decoded; the first failure aborts the parse.
pub fn parse(text: &str) -> Result<GraphDocument> {
    let value: Value = serde_json::from_str(text)?;
    let document = parse_value(value)?;
    tracing::debug!(graphs = document.len(), "parsed graph document");
    Ok(document)
}

/// Parse JSON text, decoding each graph on its own.
///
/// Only invalid JSON or a top level that is neither an object nor an array
/// fails the whole parse. A graph that cannot be decoded takes its slot as
/// an error and the others are still returned.
pub fn parse_each(text: &str) -> Result<Vec<Result<GraphSpec>>> {
    let value: Value = serde_json::from_str(text)?;
    let graphs: Vec<_> = match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| decode_graph(item, Some(i)))
            .collect(),
        object @ Value::Object(_) => vec![decode_graph(object, None)],
        other => return decode_graph(other, None).map(|spec| vec![Ok(spec)]),
    };
    let failed = graphs.iter().filter(|g| g.is_err()).count();
    tracing::debug!(graphs = graphs.len(), failed, "parsed graph document");
    Ok(graphs)
}

/// Loads graph documents from a file.
pub struct SpecLoader {
    path: PathBuf,
}

impl SpecLoader {
    /// Creates a new loader for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this loader reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|err| {
            GrapherError::malformed_with_source(
                format!("cannot read {}", self.path.display()),
                err,
            )
        })
    }

    /// Reads the whole file, then parses it.
    pub fn load(&self) -> Result<GraphDocument> {
        parse(&self.read()?)
    }

    /// Reads the whole file, then decodes each graph on its own.
    pub fn load_each(&self) -> Result<Vec<Result<GraphSpec>>> {
        parse_each(&self.read()?)
    }
}

/// Read and parse the graph document at `path`.
pub fn load_file(path: impl Into<PathBuf>) -> Result<GraphDocument> {
    SpecLoader::new(path).load()
}

/// Read the graph document at `path`, decoding each graph on its own.
pub fn load_file_each(path: impl Into<PathBuf>) -> Result<Vec<Result<GraphSpec>>> {
    SpecLoader::new(path).load_each()
}
