use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_keys: String,
    /// Path to the season reference data file; the bundled season is used
    /// when unset.
    pub season_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            season_file: std::env::var("SEASON_FILE").ok(),
        })
    }
}
