use std::{env, fmt::Display, fs::read_to_string, str::FromStr, time::Duration};

use anyhow::anyhow;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Apps Script deployment. `None` runs on the in-process workbook.
    pub sheet_url: Option<String>,
    pub sheet_timeout: Duration,
    pub seed_sample: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 1111,
            sheet_url: None,
            sheet_timeout: Duration::from_secs(10),
            seed_sample: true,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self {
            port: try_load("RUST_PORT", "1111")?,
            sheet_url: var("SHEET_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .or_else(|| read_secret("SHEET_URL")),
            sheet_timeout: Duration::from_secs(try_load("SHEET_TIMEOUT_SECS", "10")?),
            seed_sample: try_load("SEED_SAMPLE", "true")?,
        })
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow!("Environment misconfigured: {key}: {e}")
        })
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            info!("No {secret_name} secret ({e}), using local workbook");
        })
        .ok()
        .filter(|s| !s.is_empty())
}
