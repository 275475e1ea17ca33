use anyhow::{bail, Context, Result};
use std::env;

/// How the "now" used to split shows into past and upcoming is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceTimeMode {
    /// Read the clock on every request.
    PerRequest,
    /// Capture one instant at boot and reuse it for the life of the process.
    ProcessStart,
}

impl ReferenceTimeMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "per_request" => Some(Self::PerRequest),
            "process_start" => Some(Self::ProcessStart),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub reference_time: ReferenceTimeMode,
    pub log_format: LogFormat,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let reference_time = match env::var("REFERENCE_TIME") {
            Ok(value) => ReferenceTimeMode::from_str(&value).with_context(|| {
                format!("REFERENCE_TIME must be per_request or process_start, got {value:?}")
            })?,
            Err(_) => ReferenceTimeMode::PerRequest,
        };

        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") | Err(_) => LogFormat::Pretty,
            Ok(other) => bail!("LOG_FORMAT must be pretty or json, got {other:?}"),
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            reference_time,
            log_format,
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| !matches!(v.as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_time_modes() {
        assert_eq!(
            ReferenceTimeMode::from_str("per_request"),
            Some(ReferenceTimeMode::PerRequest)
        );
        assert_eq!(
            ReferenceTimeMode::from_str("process_start"),
            Some(ReferenceTimeMode::ProcessStart)
        );
        assert_eq!(ReferenceTimeMode::from_str("startup"), None);
    }
}
