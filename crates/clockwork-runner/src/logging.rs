//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g.
/// `CLOCKWORK_LOG=clockwork_core=debug`.
pub const LOG_ENV: &str = "CLOCKWORK_LOG";

/// Filter used when `CLOCKWORK_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "clockwork_core=info,clockwork_runner=info";

/// Initialize logging to stderr. Falls back to info level for the clockwork
/// crates when `CLOCKWORK_LOG` is unset or invalid. Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by the host.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init();
    });
}
