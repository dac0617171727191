//! Log setup.
//!
//! The browser owns the terminal, so logs go to a file instead of stderr.
//! The level comes from `CINESCOPE_LOG_LEVEL` and defaults to `warn`.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{time::ChronoLocal, writer::BoxMakeWriter};
use tracing_subscriber::EnvFilter;

pub const LOG_LEVEL_ENV_VAR: &str = "CINESCOPE_LOG_LEVEL";

pub const DEFAULT_LOG_FILE: &str = "~/.cinescope/cinescope.log";

/// Dependencies that are too chatty below `warn`
const NOISY_TARGETS: &[&str] = &[
    "reqwest",
    "hyper",
    "hyper_util",
    "h2",
    "tokio",
    "tokio_util",
    "tokio_rustls",
    "rustls",
    "tower",
    "mio",
];

pub fn build_env_filter() -> EnvFilter {
    NOISY_TARGETS.iter().fold(
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .with_env_var(LOG_LEVEL_ENV_VAR)
            .from_env_lossy(),
        |filter, target| match format!("{target}=warn").parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        },
    )
}

fn log_writer(path: &str) -> BoxMakeWriter {
    let expanded = shellexpand::tilde(path).to_string();
    let path = Path::new(&expanded);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(std::io::sink),
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init_tracing_subscriber(log_file: Option<&str>) {
    let writer = log_writer(log_file.unwrap_or(DEFAULT_LOG_FILE));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init();
}
