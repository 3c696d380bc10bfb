//! Structured logging.
//!
//! One tracing-subscriber registry for the whole process. The default
//! filter follows the debug flag; an explicit `RUST_LOG` always wins.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber. Call once, at startup.
pub fn init(debug: bool) {
    let default_directive = if debug {
        "gateway_proxy=debug,tower_http=debug"
    } else {
        "gateway_proxy=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
