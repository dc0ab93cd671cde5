//! Subscriber initialization per runtime profile

use std::sync::Once;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INIT_ONCE: Once = Once::new();

/// Runtime profile selecting the subscriber configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, debug level for synthpop crates
    Development,
    /// JSON output, info level for synthpop crates
    Production,
    /// Quiet subscriber; tests assert on store state instead of log output
    Test,
}

/// Initialize the global subscriber for the given profile.
///
/// Safe to call more than once; only the first call installs a subscriber.
/// `RUST_LOG` overrides the profile's default filter when set.
///
/// # Examples
///
/// ```
/// use synthpop_core::logging::{init, Profile};
///
/// init(Profile::Test);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("synthpop=debug")),
                )
                .init();
        }
        Profile::Production => {
            fmt()
                .json()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("synthpop=info")),
                )
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
