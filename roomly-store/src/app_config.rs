use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub flipt: FliptConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FliptConfig {
    pub url: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Upper bound on any single flag evaluation request.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_timeout_ms() -> u64 {
    1500
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Then the current environment file, which is optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Then a local file that shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Finally settings from the environment (with a prefix of ROOMLY)
            // E.g. `ROOMLY__SERVER__PORT=9000` would set `server.port`
            .add_source(config::Environment::with_prefix("ROOMLY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
