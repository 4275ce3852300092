//! Structured logging setup for the binaries. `RUST_LOG` wins when set;
//! otherwise the configured level seeds the filter.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("'{value}' is not a valid log filter")]
    Filter {
        value: String,
        source: ParseError,
    },
    #[error("failed to install tracing subscriber: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

fn parse_filter(configured: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(configured).map_err(|source| TelemetryError::Filter {
        value: configured.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_level_names() {
        assert!(parse_filter("debug").is_ok());
        assert!(parse_filter("verdia=trace,info").is_ok());
    }

    #[test]
    fn rejects_malformed_filter_directives() {
        let result = parse_filter("this is not a filter");
        assert!(matches!(result, Err(TelemetryError::Filter { .. })));
    }
}
