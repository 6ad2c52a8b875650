//! Entry point for `symmetry-factor`.

use clap::Parser;
use grapher::{init_logging, run_symmetry, SymmetryArgs};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args = SymmetryArgs::parse();
    init_logging(&args.logging)?;

    for path in run_symmetry(args.command)? {
        info!(path = %path.display(), "Wrote");
    }
    Ok(())
}
