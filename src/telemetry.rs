//! Logging setup and span constructors.

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log output format (`json` or `text`).
pub const LOG_FORMAT_ENV: &str = "SLIRCD_LOG_FORMAT";

/// Initialize the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, debug_span, info_span};

    /// Span covering one full rebuild.
    pub fn rebuild(contributors: usize) -> Span {
        info_span!("isupport_rebuild", contributors = contributors)
    }

    /// Span covering one contributor's `collect_tokens` call.
    pub fn contributor(name: &str) -> Span {
        debug_span!("contributor", name = %name)
    }
}
