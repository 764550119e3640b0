use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why an upstream source produced no records.
///
/// Callers of the dashboard views never see this: every fetch path degrades
/// it to an empty record list after logging it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode records from {origin}: {reason}")]
    Decode { origin: String, reason: String },
    #[error("could not read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
