use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::error::FetchError;
use crate::records::RawRecord;

/// Where the static occurrence dataset lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Url(String),
}

impl DatasetSource {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Reads the dataset and keeps at most `limit` records.
pub async fn load_dataset(
    source: &DatasetSource,
    http: &Client,
    limit: Option<usize>,
) -> Result<Vec<RawRecord>, FetchError> {
    debug!(%source, ?limit, "Loading dataset");

    let body = match source {
        DatasetSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        DatasetSource::Url(url) => {
            let resp = http
                .get(url)
                .send()
                .await
                .map_err(|source| FetchError::Transport {
                    url: url.clone(),
                    source,
                })?;
            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.clone(),
                    status,
                });
            }
            resp.text().await.map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?
        }
    };

    parse_dataset(&body, &source.to_string(), limit)
}

/// Same as [`load_dataset`], but an unavailable source yields no records.
pub async fn load_or_empty(
    source: &DatasetSource,
    http: &Client,
    limit: Option<usize>,
) -> Vec<RawRecord> {
    match load_dataset(source, http, limit).await {
        Ok(records) => records,
        Err(error) => {
            warn!(%source, %error, "Dataset unavailable, continuing with no records");
            Vec::new()
        }
    }
}

/// Parses a dataset document: either a bare array of records or a search
/// page with a `results` array.
pub fn parse_dataset(
    body: &str,
    origin: &str,
    limit: Option<usize>,
) -> Result<Vec<RawRecord>, FetchError> {
    let decode_error = |reason: String| FetchError::Decode {
        origin: origin.to_string(),
        reason,
    };

    let mut records = match serde_json::from_str::<Value>(body)
        .map_err(|error| decode_error(error.to_string()))?
    {
        Value::Array(records) => records,
        Value::Object(mut page) => match page.remove("results") {
            Some(Value::Array(records)) => records,
            _ => return Err(decode_error("object has no `results` array".to_string())),
        },
        _ => return Err(decode_error("expected a JSON array of records".to_string())),
    };

    if let Some(limit) = limit.filter(|limit| *limit > 0) {
        records.truncate(limit);
    }

    Ok(records)
}
