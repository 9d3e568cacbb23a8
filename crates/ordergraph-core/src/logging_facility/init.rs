use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use crate::errors::OrderGraphError;

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, `ordergraph=debug`
    Development,
    /// JSON lines, `ordergraph=info`
    Production,
    /// Bare registry; tests attach a capture layer instead
    Test,
}

impl FromStr for Profile {
    type Err = OrderGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" | "development" => Ok(Profile::Development),
            "json" | "production" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(OrderGraphError::Internal {
                message: format!("unknown log profile '{}'", other),
            }),
        }
    }
}

static INIT_ONCE: Once = Once::new();

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber for `profile`
///
/// Later calls are ignored. `RUST_LOG` overrides the profile's default
/// filter. Output goes to stderr so that command output on stdout stays
/// machine-readable.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter("ordergraph=debug"))
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter("ordergraph=info"))
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
