use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

use super::error::FetchError;
use crate::domain::Region;
use crate::records::RawRecord;

pub const DEFAULT_GBIF_API_URL: &str = "https://api.gbif.org/v1";

/// Client for the GBIF occurrence search endpoint
#[derive(Debug, Clone)]
pub struct GbifClient {
    http: Client,
    base_url: String,
}

impl GbifClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn search_url(&self) -> String {
        format!("{}/occurrence/search", self.base_url.trim_end_matches('/'))
    }

    /// Fetches up to `limit` georeferenced plant occurrences inside `region`.
    pub async fn fetch_region(
        &self,
        region: Region,
        limit: usize,
    ) -> Result<Vec<RawRecord>, FetchError> {
        let url = self.search_url();
        let start = Instant::now();

        debug!(region = region.as_str(), limit, "Fetching GBIF occurrences");

        let resp = self
            .http
            .get(&url)
            .query(&region_query(region, limit))
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body: Value = resp.json().await.map_err(|error| FetchError::Decode {
            origin: url.clone(),
            reason: error.to_string(),
        })?;
        let records = parse_search_page(body, &url)?;

        info!(
            region = region.as_str(),
            records = records.len(),
            duration_secs = start.elapsed().as_secs_f32(),
            "GBIF fetch completed"
        );

        Ok(records)
    }
}

/// Query parameters restricting a search to Brazilian plants inside the
/// region's bounding box.
pub fn region_query(region: Region, limit: usize) -> Vec<(&'static str, String)> {
    let bounds = region.bounds();
    vec![
        ("country", "BR".to_string()),
        ("kingdom", "Plantae".to_string()),
        ("hasCoordinate", "true".to_string()),
        (
            "decimalLatitude",
            format!("{},{}", bounds.lat_min, bounds.lat_max),
        ),
        (
            "decimalLongitude",
            format!("{},{}", bounds.lon_min, bounds.lon_max),
        ),
        ("limit", limit.to_string()),
    ]
}

/// Extracts the `results` array from one search response page.
pub fn parse_search_page(body: Value, origin: &str) -> Result<Vec<RawRecord>, FetchError> {
    match body {
        Value::Object(mut page) => match page.remove("results") {
            Some(Value::Array(results)) => Ok(results),
            _ => Err(FetchError::Decode {
                origin: origin.to_string(),
                reason: "response has no `results` array".to_string(),
            }),
        },
        _ => Err(FetchError::Decode {
            origin: origin.to_string(),
            reason: "response is not a JSON object".to_string(),
        }),
    }
}
