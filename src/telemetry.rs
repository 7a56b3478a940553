//! Tracing setup for the binaries.
//!
//! Logs go to stderr so `--format json` output on stdout stays parseable.
//! Without the `telemetry` feature everything here compiles to no-ops.

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "ts_clippy=info";

/// Install the global subscriber. Later calls are ignored.
#[cfg(feature = "telemetry")]
pub fn init_tracing() {
    use std::sync::OnceLock;
    use tracing_subscriber::{EnvFilter, fmt};

    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(not(feature = "telemetry"))]
pub fn init_tracing() {}

/// Run a block inside a `ts_clippy` span tagged with `phase`.
#[macro_export]
macro_rules! instrument_block {
    ($phase:expr, $block:block) => {{
        #[cfg(feature = "telemetry")]
        let _guard = tracing::debug_span!("ts_clippy", phase = $phase).entered();
        $block
    }};
}
