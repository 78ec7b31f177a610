use crate::explorer::{DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TX_URL};
use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub explorer_api_url: String,
    pub explorer_tx_url: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            explorer_api_url: DEFAULT_API_URL.to_string(),
            explorer_tx_url: DEFAULT_TX_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let explorer_api_url = lookup("EXPLORER_API_URL").unwrap_or(defaults.explorer_api_url);
        let explorer_tx_url = lookup("EXPLORER_TX_URL").unwrap_or(defaults.explorer_tx_url);

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .context("Invalid REQUEST_TIMEOUT_SECS, expected whole seconds")?;
                if secs == 0 {
                    anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        Ok(Config {
            explorer_api_url,
            explorer_tx_url,
            request_timeout,
        })
    }
}
