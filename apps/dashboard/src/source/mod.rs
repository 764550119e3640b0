pub mod dataset;
pub mod error;
pub mod gbif;
pub mod regions;

pub use dataset::{load_dataset, load_or_empty, parse_dataset, DatasetSource};
pub use error::FetchError;
pub use gbif::{GbifClient, DEFAULT_GBIF_API_URL};
pub use regions::{fetch_all_regions, fetch_brazil_regions, region_display_point};

use std::time::Duration;

/// Builds the shared HTTP client used by every upstream source
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|source| FetchError::Transport {
            url: String::from("(client setup)"),
            source,
        })
}
