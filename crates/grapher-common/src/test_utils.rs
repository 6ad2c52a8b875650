//! Test utilities and shared test helpers for Grapher.
//!
//! Fixtures and helper functions used by the unit and integration tests of
//! every crate in the workspace.

use std::io;
use std::sync::{Arc, Mutex, Once};

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

#[derive(Clone, Default)]
struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log capture buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` on this thread with a subscriber that records every event at
/// `debug` and above, returning its result and the captured log text.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let writer = CaptureWriter::default();
    let buffer = Arc::clone(&writer.0);
    let subscriber = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.lock().expect("log capture buffer poisoned").clone();
    (result, String::from_utf8_lossy(&bytes).into_owned())
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(any(test, feature = "tempfile"))]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// JSON documents shared by the loader and renderer tests.
pub mod graph_fixtures {
    /// A scatter graph with two labelled series and a clamped y axis.
    pub const TWO_SERIES: &str = r#"{
        "xlabel": "$x$",
        "ylabel": "$T_p$",
        "ymin": "0.5",
        "legend_title": "runs",
        "series": [
            {"data": [[1, 2], [3, 4]], "label": "first", "style": "r-"},
            {"data": [[1, 1], [2, 5], [4, 3]], "label": "second", "style": "bo--"}
        ]
    }"#;

    /// A graph with no keys at all.
    pub const EMPTY_GRAPH: &str = "{}";

    /// A Fermi surface job written the way the producer writes it (strings).
    pub const FERMI_SURFACE: &str = r#"{
        "plot_type": "Fermi_surface",
        "xlabel": "$k_x$",
        "ylabel": "$k_y$",
        "th": "1.000000",
        "thp": "1.000000",
        "t0": "1.000000",
        "D1": "1.000000",
        "Mu_h": "0.000000",
        "epsilon_min": "-4.000000"
    }"#;

    /// A list holding one scatter graph and one Fermi surface graph.
    pub fn batch() -> String {
        format!("[{TWO_SERIES}, {FERMI_SURFACE}]")
    }
}
