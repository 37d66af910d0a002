//! Structured logging setup
//!
//! Logs go to stderr so announced command lines on stdout stay clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter per `-v` count when `RUST_LOG` is not set
fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "ccs_core=info,ccs_infra_system=info,ccs_cli=info,warn",
        _ => "ccs_core=debug,ccs_infra_system=debug,ccs_cli=debug,info",
    }
}

/// Initialize tracing
///
/// # Environment Variables
///
/// - `RUST_LOG`: overrides the verbosity-derived filter
/// - `CCS_LOG_FORMAT`: `json` for structured output, anything else for pretty
pub fn init_logging(verbosity: u8) {
    let log_format = std::env::var("CCS_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
