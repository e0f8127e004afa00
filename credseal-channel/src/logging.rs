//! Process-wide log setup for hosts embedding the channel.

use crate::redact::RedactingMakeWriter;
use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber writing redacted lines to stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (e.g. `"info"` or
/// `"credseal_channel=debug"`) is used. Safe to call more than once: later
/// calls are ignored.
pub fn init_logging(default_directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        // Colour codes would split field names from their values.
        .with_ansi(false)
        .with_writer(RedactingMakeWriter::new(std::io::stderr))
        .try_init();
}
