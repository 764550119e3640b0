use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::source::{DatasetSource, DEFAULT_GBIF_API_URL};
use crate::stats::DEFAULT_TOP_N;

const DEFAULT_DATASET: &str = "data/plantas-brasil.json";
const DEFAULT_LIMIT: usize = 300;
const DEFAULT_REGION_LIMIT: usize = 300;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Runtime settings resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub dataset: DatasetSource,
    /// `None` keeps every record in the dataset
    pub limit: Option<usize>,
    pub top_n: usize,
    pub gbif_api_url: String,
    pub region_limit: usize,
    pub http_timeout: Duration,
    pub debug: bool,
}

impl AppConfig {
    /// Builds the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let dataset = var("FLORA_DATASET")
            .map_or_else(|| DatasetSource::parse(DEFAULT_DATASET), |v| DatasetSource::parse(&v));

        let limit = parse_or(var("FLORA_LIMIT"), "FLORA_LIMIT", DEFAULT_LIMIT)?;
        let top_n = parse_or(var("FLORA_TOP_N"), "FLORA_TOP_N", DEFAULT_TOP_N)?;
        let region_limit = parse_or(
            var("FLORA_REGION_LIMIT"),
            "FLORA_REGION_LIMIT",
            DEFAULT_REGION_LIMIT,
        )?;
        let timeout_secs = parse_or(
            var("FLORA_HTTP_TIMEOUT_SECS"),
            "FLORA_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;

        if top_n == 0 {
            return Err(eyre!("FLORA_TOP_N must be at least 1"));
        }
        if timeout_secs == 0 {
            return Err(eyre!("FLORA_HTTP_TIMEOUT_SECS must be at least 1"));
        }

        Ok(Self {
            dataset,
            limit: (limit > 0).then_some(limit),
            top_n,
            gbif_api_url: var("GBIF_API_URL").unwrap_or_else(|| DEFAULT_GBIF_API_URL.to_string()),
            region_limit,
            http_timeout: Duration::from_secs(timeout_secs),
            debug: var("FLORA_DEBUG").is_some_and(|value| value != "0"),
        })
    }
}

/// Initializes the application configuration from `.env` and the process
/// environment
pub fn init_app_config() -> Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    AppConfig::from_lookup(|name| env::var(name).ok())
}

fn parse_or<T>(value: Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| eyre!("{name} must be a non-negative integer, got {raw:?}")),
    }
}
