use std::{env, time::Duration};

use anyhow::{Result, anyhow};
use tracing::info;

pub struct Config {
    pub api_url: String,
    /// Upper bound on every HTTP call.
    pub timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        let api_url = var_or("VISITOR_BOOK_API_URL", "http://localhost:3001");
        let timeout_secs = var_or("VISITOR_BOOK_TIMEOUT_SECS", "10");
        let timeout_secs: u64 = timeout_secs
            .parse()
            .map_err(|e| anyhow!("Invalid VISITOR_BOOK_TIMEOUT_SECS value '{timeout_secs}': {e}"))?;

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
