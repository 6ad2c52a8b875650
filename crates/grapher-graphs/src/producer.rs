//! Graphs produced from computed data. The `GraphSpec` is kept as
//! `<stem>.json` beside the rendered files, so a figure can be re-rendered.

use std::path::PathBuf;

use grapher_common::Result;
use grapher_config::{multi_plot_specs, write_spec_json, GraphSpec, GraphVars, Record};
use tracing::info;

use crate::assembler::GraphAssembler;
use crate::figure::RenderedFigure;

/// A rendered graph and the JSON spec written for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedGraph {
    /// The `<stem>.json` file.
    pub spec_path: PathBuf,
    /// What the renderer produced.
    pub figure: RenderedFigure,
}

impl GraphAssembler {
    /// Writes `spec` as `<graph_filepath>.json`, then renders it.
    pub fn plot_spec(&self, spec: GraphSpec) -> Result<PlottedGraph> {
        let spec_path = write_spec_json(&spec)?;
        let figure = self.render(spec)?;
        Ok(PlottedGraph { spec_path, figure })
    }

    /// Plots every parameter combination of `records`. Stops at the first
    /// graph that cannot be built or rendered.
    pub fn multi_plot(
        &self,
        records: &[Record],
        vars: &GraphVars<'_>,
        template: &GraphSpec,
        styles: &[&str],
    ) -> Result<Vec<PlottedGraph>> {
        let specs = multi_plot_specs(records, vars, template, styles)?;
        let graphs = specs
            .into_iter()
            .map(|spec| self.plot_spec(spec))
            .collect::<Result<Vec<_>>>()?;
        info!(graphs = graphs.len(), records = records.len(), "Multi-plot written");
        Ok(graphs)
    }
}
