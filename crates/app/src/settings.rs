//! Application settings, loaded once at process start.
//!
//! Sources, in override order: an optional `extratos` file (TOML/YAML/JSON)
//! in the working directory, then `EXTRATOS_`-prefixed environment
//! variables (`__` as section separator).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
    /// Localized response messages; the defaults ship in the server crate.
    #[serde(default)]
    pub messages: server::Messages,
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

/// Backing database selection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.level", "info")?
            .add_source(File::with_name("extratos").required(false))
            .add_source(Environment::with_prefix("EXTRATOS").separator("__"))
            .build()?
            .try_deserialize()
    }
}
