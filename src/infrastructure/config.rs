use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/submit-form";
const DEFAULT_LATENCY_MS: u64 = 1000;
const DEFAULT_LOG_FILE: &str = "jobapply.log";

/// Which `SubmissionTransport` the form hands applications to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// POST the draft as JSON to `APPLY_ENDPOINT`.
    Http,
    /// Log a text summary and simulate latency.
    Console,
}

impl TransportKind {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "console" => Ok(Self::Console),
            other => Err(ConfigError::UnknownTransport(other.to_string())),
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub submission: SubmissionConfig,
    pub telemetry: TelemetryConfig,
}

/// Settings for delivering finished applications.
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    /// `APPLY_TRANSPORT`, console by default
    pub transport: TransportKind,
    /// Target of the HTTP transport
    pub endpoint: Url,
    /// Simulated round-trip of the console transport
    pub console_latency: Duration,
}

/// Tracing controls. Logs go to a file because the terminal belongs to the UI.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Fallback filter when `RUST_LOG` is unset
    pub log_level: String,
    /// File the subscriber appends to
    pub log_file: PathBuf,
}

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, applying defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let transport = match lookup("APPLY_TRANSPORT") {
            Some(value) => TransportKind::parse(&value)?,
            None => TransportKind::Console,
        };

        let endpoint_raw = lookup("APPLY_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint_raw).map_err(|source| ConfigError::InvalidEndpoint {
            value: endpoint_raw.clone(),
            source,
        })?;

        let console_latency = match lookup("APPLY_CONSOLE_LATENCY_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidLatency(value))?,
            None => Duration::from_millis(DEFAULT_LATENCY_MS),
        };

        let log_level = lookup("APPLY_LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_file = lookup("APPLY_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self {
            submission: SubmissionConfig {
                transport,
                endpoint,
                console_latency,
            },
            telemetry: TelemetryConfig {
                log_level,
                log_file,
            },
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("APPLY_TRANSPORT must be `http` or `console`, got `{0}`")]
    UnknownTransport(String),
    #[error("APPLY_ENDPOINT `{value}` is not a valid URL")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("APPLY_CONSOLE_LATENCY_MS must be a whole number of milliseconds, got `{0}`")]
    InvalidLatency(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_env_missing() {
        let config = load_with(&[]).expect("config loads with defaults");
        assert_eq!(config.submission.transport, TransportKind::Console);
        assert_eq!(config.submission.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.submission.console_latency, Duration::from_millis(1000));
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.log_file, PathBuf::from("jobapply.log"));
    }

    #[test]
    fn test_http_transport_with_custom_endpoint() {
        let config = load_with(&[
            ("APPLY_TRANSPORT", "HTTP"),
            ("APPLY_ENDPOINT", "https://jobs.example.com/entry"),
            ("APPLY_CONSOLE_LATENCY_MS", "0"),
        ])
        .expect("config loads");
        assert_eq!(config.submission.transport, TransportKind::Http);
        assert_eq!(config.submission.endpoint.host_str(), Some("jobs.example.com"));
        assert!(config.submission.console_latency.is_zero());
    }

    #[test]
    fn test_rejects_unknown_transport() {
        let err = load_with(&[("APPLY_TRANSPORT", "carrier-pigeon")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTransport(ref value) if value == "carrier-pigeon"));
    }

    #[test]
    fn test_rejects_relative_endpoint() {
        let err = load_with(&[("APPLY_ENDPOINT", "/api/submit-form")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_rejects_bad_latency() {
        let err = load_with(&[("APPLY_CONSOLE_LATENCY_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLatency(_)));
    }
}
