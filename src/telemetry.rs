//! Tracing setup for the CLI commands.
//!
//! `RUST_LOG` wins when set; otherwise `warn`, or `info` with `--verbose`.
//! Logs go to stderr so stdout stays clean for tables and plots. The TUI
//! never calls this.

use tracing_subscriber::EnvFilter;

pub fn init_tracing(verbose: bool) {
    let default = if verbose { "gridload_synth=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
