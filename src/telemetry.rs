//! Logging setup.
//!
//! Structured logs go through `tracing`; the subscriber is installed once
//! at startup and filtered per `RUST_LOG` or the configured level.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Safe to call more than once; only the first call installs anything.
/// When `RUST_LOG` is set it takes precedence entirely. Otherwise the
/// configured level applies to this crate and `tower_http` stays at debug
/// so request spans remain visible.
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(default_level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}

/// Filter directives used when `RUST_LOG` is absent or unparseable.
fn default_directives(level: &str) -> String {
    format!("reviewlens={level},tower_http=debug")
}
