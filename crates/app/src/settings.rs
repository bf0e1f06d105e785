//! Handles settings for the application. Configuration is written in
//! `settings.toml` and can be overridden with `LEDGER__` prefixed environment
//! variables (e.g. `LEDGER__SERVER__PORT=8080`).
//!
//! See `settings.toml` for the configuration.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
}

/// Daily recurring run, in UTC.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Scheduler {
    pub hour: u32,
    pub minute: u32,
    pub tick_timeout_secs: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            hour: 1,
            minute: 0,
            tick_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub database: Database,
    pub server: Option<Server>,
    pub scheduler: Option<Scheduler>,
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("LEDGER").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
