pub mod persistence;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber. `RUST_LOG` directives take precedence
/// over `default_filter`; later calls are no-ops.
pub fn init_tracing_with(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        let _ = fmt().with_env_filter(env_filter(default_filter)).try_init();
    });
}

/// `RUST_LOG` when set and valid, otherwise `default_filter`.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}
