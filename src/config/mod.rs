mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::{debug, warn};

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let mut config = load_from(&config_path).await?;

    if let Ok(host) = env::var("HOST") {
        config.server.host = host;
    }
    if let Ok(port) = env::var("PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    config.validate()?;
    Ok(config)
}

/// Reads a YAML config file, falling back to defaults when it does not exist.
pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = match tokio::fs::read_to_string(config_path).await {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "Configuration file {} not found, using defaults",
                config_path
            );
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    let config: Config = serde_yaml::from_str(&config_str)?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let summarizer = &self.summarizer;
        if summarizer.max_length == 0 {
            return Err(Error::config("summarizer.max_length must be positive"));
        }
        if summarizer.min_length > summarizer.max_length {
            return Err(Error::config(format!(
                "summarizer.min_length ({}) exceeds summarizer.max_length ({})",
                summarizer.min_length, summarizer.max_length
            )));
        }
        if self.similarity.max_features == 0 {
            return Err(Error::config("similarity.max_features must be positive"));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(Error::config("chart dimensions must be positive"));
        }
        Ok(())
    }
}
