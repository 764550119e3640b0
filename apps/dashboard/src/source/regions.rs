use futures::future::join_all;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::future::Future;
use tracing::{debug, warn};

use super::error::FetchError;
use super::gbif::GbifClient;
use crate::domain::{Field, Region};
use crate::records::{normalize_batch, DisplayPoint, RawRecord};
use crate::stats::select_dominant;

/// Dominant-species marker for one region's raw records.
pub fn region_display_point(raws: &[RawRecord]) -> Option<DisplayPoint> {
    let records = normalize_batch(raws);
    let dominant = select_dominant(&records, Field::Species)?;
    dominant.display_point()
}

/// Fetches every region concurrently and reduces each to at most one marker.
///
/// All fetches are polled together on the calling task and the map is built
/// only after each one has settled. A failed fetch is logged and counts as a
/// region with no records; it never affects the other regions. Duplicate
/// region keys are fetched once.
pub async fn fetch_all_regions<K, I, F, Fut>(
    regions: I,
    fetch: F,
) -> BTreeMap<K, Option<DisplayPoint>>
where
    K: Ord + Clone + Display,
    I: IntoIterator<Item = K>,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<Vec<RawRecord>, FetchError>>,
{
    let regions: BTreeSet<K> = regions.into_iter().collect();
    let fetch = &fetch;

    let tasks = regions.into_iter().map(|region| async move {
        let raws = match fetch(region.clone()).await {
            Ok(raws) => raws,
            Err(error) => {
                warn!(%region, %error, "Region fetch failed, treating it as empty");
                Vec::new()
            }
        };

        let point = region_display_point(&raws);
        debug!(
            %region,
            records = raws.len(),
            label = point.as_ref().map_or("(none)", |p| p.label.as_str()),
            "Region settled"
        );
        (region, point)
    });

    join_all(tasks).await.into_iter().collect()
}

/// Fans out over the Brazilian macro-regions using the GBIF search API.
pub async fn fetch_brazil_regions(
    client: &GbifClient,
    limit: usize,
) -> BTreeMap<Region, Option<DisplayPoint>> {
    fetch_all_regions(Region::ALL, |region| client.fetch_region(region, limit)).await
}
