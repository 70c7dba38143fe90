//! Configuration loading from environment.

use std::env;
use std::str::FromStr;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("unknown LOG_FORMAT {other:?} (expected pretty or json)"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub log_format: LogFormat,
    /// OTLP collector endpoint; tracing export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// `DATABASE_URL` wins; otherwise the URL is assembled from
    /// `DATABASE_HOST`, `DATABASE_PORT`, `DATABASE_USER`, `DATABASE_PASSWORD`
    /// and `DATABASE_NAME`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {e}"))?;

        let database_url = match var("DATABASE_URL") {
            Some(url) => url,
            None => {
                let required = |key: &str| {
                    var(key).ok_or_else(|| {
                        anyhow::anyhow!("{key} is required when DATABASE_URL is not set")
                    })
                };
                let host = required("DATABASE_HOST")?;
                let db_port: u16 = var("DATABASE_PORT")
                    .unwrap_or_else(|| "5432".to_string())
                    .parse()
                    .map_err(|e| anyhow::anyhow!("invalid DATABASE_PORT: {e}"))?;
                let user = required("DATABASE_USER")?;
                let password = var("DATABASE_PASSWORD").unwrap_or_default();
                let name = required("DATABASE_NAME")?;

                format!("postgres://{user}:{password}@{host}:{db_port}/{name}")
            }
        };

        let log_format = match var("LOG_FORMAT") {
            Some(v) => v.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            port,
            database_url,
            log_format,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}
