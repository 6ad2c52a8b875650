//! Main entry point for `grapher`.

use std::process::ExitCode;

use clap::Parser;
use grapher::{init_logging, run_graphs, GrapherArgs};
use tracing::{error, info};

fn main() -> anyhow::Result<ExitCode> {
    let args = GrapherArgs::parse();
    init_logging(&args.logging)?;

    let report = run_graphs(&args.input)?;
    info!(
        rendered = report.rendered.len(),
        failed = report.failures.len(),
        files = report.files().len(),
        "Done"
    );

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        error!(failed = report.failures.len(), "Some graphs failed to render");
        Ok(ExitCode::FAILURE)
    }
}
