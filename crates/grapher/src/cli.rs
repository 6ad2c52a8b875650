//! Command line arguments of both binaries.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use grapher_common::{LogFormat, LoggingConfig};

/// Default log filter when neither `-l` nor `GRAPHER_LOG` is given.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Log line format as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogStyle {
    /// One line per event
    Compact,
    /// Multi-line, coloured on a terminal
    Pretty,
    /// Newline-delimited JSON
    Json,
}

impl From<LogStyle> for LogFormat {
    fn from(style: LogStyle) -> Self {
        match style {
            LogStyle::Compact => Self::Compact,
            LogStyle::Pretty => Self::Pretty,
            LogStyle::Json => Self::Json,
        }
    }
}

/// Logging options shared by both binaries.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct LogArgs {
    /// Log filter, e.g. `info` or `grapher_graphs=debug`
    #[arg(short = 'l', long = "log", default_value = DEFAULT_LOG_FILTER, global = true)]
    pub log: String,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogStyle::Compact, global = true)]
    pub log_format: LogStyle,

    /// Also log when each graph starts and finishes
    #[arg(long, global = true)]
    pub log_spans: bool,

    /// Append log lines to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl LogArgs {
    /// The subscriber configuration these options describe.
    #[must_use]
    pub fn config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log.clone(),
            format: self.log_format.into(),
            file_path: self
                .log_file
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
            include_spans: self.log_spans,
            ..LoggingConfig::default()
        }
    }
}

/// Render every graph described by a JSON file.
#[derive(Debug, Parser)]
#[command(name = "grapher", version, about)]
pub struct GrapherArgs {
    /// JSON file holding one graph object or an array of them
    pub input: PathBuf,

    /// Logging options
    #[command(flatten)]
    pub logging: LogArgs,
}

/// Plot the symmetry factor `|sin x + alpha sin y|`.
///
/// Without a subcommand the contours for `alpha = -1` and `alpha = 1` are
/// written to `sym_alpha_m1.png` and `sym_alpha_p1.png`.
#[derive(Debug, Parser)]
#[command(name = "symmetry-factor", version)]
pub struct SymmetryArgs {
    /// Logging options
    #[command(flatten)]
    pub logging: LogArgs,

    /// Drawing to produce; both default contours when absent
    #[command(subcommand)]
    pub command: Option<SymmetryCommand>,
}

/// What `symmetry-factor` draws.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum SymmetryCommand {
    /// Filled contour with a colour bar, saved as `<OUT>.png`
    Contour {
        /// Mixing coefficient of the second sine
        #[arg(long, allow_negative_numbers = true)]
        alpha: f64,
        /// Output stem; `.png` is appended
        #[arg(long)]
        out: String,
        /// Larger tick labels
        #[arg(long)]
        large_font: bool,
    },
    /// 3-D surface rendered in memory
    Surface {
        /// Mixing coefficient of the second sine
        #[arg(long, allow_negative_numbers = true)]
        alpha: f64,
        /// Also save the rendered frame to this PNG file
        #[arg(long)]
        preview: Option<PathBuf>,
    },
}
