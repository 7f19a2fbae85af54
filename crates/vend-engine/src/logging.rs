//! # Logging
//!
//! Tracing subscriber setup for binaries. The library only emits events;
//! nothing in it installs a subscriber.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show every reserve, slot and ledger change
//! - `RUST_LOG=vend_engine=trace` - Trace for the engine only
//! - Default: INFO for the engine (committed sales, collections), WARN elsewhere

use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered by `RUST_LOG`.
///
/// `verbose` lowers the default engine level to DEBUG when `RUST_LOG` is
/// unset. Calling it a second time is a no-op.
pub fn init(verbose: bool) {
    let default = if verbose {
        "warn,vend_engine=debug"
    } else {
        "warn,vend_engine=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
