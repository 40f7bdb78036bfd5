//! Structured logging for the Quill API.
//!
//! Request spans come from `tracing-actix-web`; this module only installs the
//! global subscriber that renders them.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directives used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,api_server=debug,blog_core=debug,blog_infra=debug";

/// Log output settings.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// One JSON object per line instead of human-readable output.
    pub json_logs: bool,
    /// Recorded on the startup event so aggregated logs can be told apart.
    pub service_name: String,
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// `LOG_FORMAT` picks the renderer; production defaults to JSON.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = lookup("RUST_ENV").as_deref() == Some("production");
        let json_logs = match lookup("LOG_FORMAT") {
            Some(format) => format.eq_ignore_ascii_case("json"),
            None => production,
        };

        Self {
            json_logs,
            service_name: lookup("OTEL_SERVICE_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "quill-api".to_string()),
        }
    }
}

/// Install the global subscriber. Fails if one is already set.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(config.json_logs.then(|| fmt::layer().json()))
        .with((!config.json_logs).then(|| fmt::layer().pretty()))
        .try_init()?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> TelemetryConfig {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        TelemetryConfig::from_lookup(|name| map.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn test_pretty_by_default() {
        let config = load(&[]);
        assert!(!config.json_logs);
        assert_eq!(config.service_name, "quill-api");
    }

    #[test]
    fn test_production_defaults_to_json_unless_overridden() {
        assert!(load(&[("RUST_ENV", "production")]).json_logs);
        assert!(!load(&[("RUST_ENV", "production"), ("LOG_FORMAT", "pretty")]).json_logs);
        assert!(load(&[("LOG_FORMAT", "JSON")]).json_logs);
    }
}
