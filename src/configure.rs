use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub log_level: String,
    pub log_to_file: bool,
    pub log_file: String,
    /// Base URL of the transfer backend
    pub api_base_url: String,
    /// Per-request timeout for fee and submission calls (ms)
    pub request_timeout_ms: u64,
    /// Currency shown when the fee service omits one
    pub default_currency: String,
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let s = Config::builder()
        // Set defaults
        .set_default("log_level", "info")?
        .set_default("log_to_file", false)?
        .set_default("log_file", "log/confirmer.log")?
        .set_default("api_base_url", "http://localhost:8080")?
        .set_default("request_timeout_ms", 10_000i64)?
        .set_default("default_currency", "CVE")?
        // Add configuration from a file
        .add_source(File::with_name("config/config.yaml").required(false))
        // Add configuration from environment variables
        .add_source(config::Environment::with_prefix("CONFIRM"))
        .build()?;

    s.try_deserialize()
}
