use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{Result, anyhow};
use tracing::info;

pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite file, or `:memory:` for a throwaway store.
    pub db_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            host: try_load("VISITOR_BOOK_HOST", "0.0.0.0")?,
            port: try_load("PORT", "3001")?,
            db_path: try_load("VISITOR_BOOK_DB_PATH", "visitor-book.db")?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| anyhow!("Invalid {key} value '{raw}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_key_uses_default() {
        let port: u16 = try_load("VISITOR_BOOK_TEST_UNSET_PORT", "3001").unwrap();
        assert_eq!(port, 3001);
    }

    #[test]
    fn unparsable_default_is_an_error() {
        let result: Result<u16> = try_load("VISITOR_BOOK_TEST_UNSET_PORT", "not-a-port");
        assert!(result.is_err());
    }
}
