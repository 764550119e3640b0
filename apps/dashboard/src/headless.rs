use chrono::{SecondsFormat, Utc};
use color_eyre::Result;
use std::fmt;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::Region;
use crate::records::{normalize_batch, CanonicalRecord, DisplayPoint};
use crate::source::{self, fetch_brazil_regions, load_or_empty, GbifClient};
use crate::stats::{map_points, FilterOptions, RecordFilter, StatsView};

/// Everything the dashboard would render, as one serializable snapshot
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HeadlessReport {
    pub source: String,
    /// RFC 3339 UTC timestamp of when the report was built
    pub generated_at: String,
    pub filter: RecordFilter,
    pub options: FilterOptions,
    pub stats: StatsView,
    pub map_points: Vec<DisplayPoint>,
    pub regions: Option<Vec<RegionMarker>>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RegionMarker {
    pub region: String,
    pub marker: Option<DisplayPoint>,
}

/// Derives the report for one record set. Filter options are taken from
/// every geolocated record, ignoring the filter, so each choice stays
/// selectable.
pub fn build_report(
    source: &str,
    records: &[CanonicalRecord],
    filter: &RecordFilter,
    top_n: usize,
) -> HeadlessReport {
    let selected: Vec<CanonicalRecord> = filter.apply(records).into_iter().cloned().collect();

    HeadlessReport {
        source: source.to_string(),
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        filter: filter.clone(),
        options: FilterOptions::from_records(records),
        stats: StatsView::build(&selected, top_n),
        map_points: map_points(&selected),
        regions: None,
    }
}

/// Run the dashboard once without a UI and print the report
pub async fn run_headless(
    config: &AppConfig,
    filter: &RecordFilter,
    json: bool,
    with_regions: bool,
) -> Result<()> {
    let http = source::http_client(config.http_timeout)?;

    let raws = load_or_empty(&config.dataset, &http, config.limit).await;
    let records = normalize_batch(&raws);
    info!(source = %config.dataset, records = records.len(), "Dataset normalized");
    if !filter.is_empty() {
        info!(?filter, "Applying record filter");
    }

    let mut report = build_report(&config.dataset.to_string(), &records, filter, config.top_n);

    if with_regions {
        let client = GbifClient::new(http, config.gbif_api_url.clone());
        let markers = fetch_brazil_regions(&client, config.region_limit).await;
        report.regions = Some(region_markers(markers));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    Ok(())
}

fn region_markers(
    markers: impl IntoIterator<Item = (Region, Option<DisplayPoint>)>,
) -> Vec<RegionMarker> {
    markers
        .into_iter()
        .map(|(region, marker)| RegionMarker {
            region: region.label().to_string(),
            marker,
        })
        .collect()
}

// Plain-text rendering, used when --json is not given
impl fmt::Display for HeadlessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.stats.summary;

        writeln!(f, "\nFlora Statistics ({})", self.source)?;
        writeln!(f, "=================")?;
        writeln!(f, "Generated at: {}", self.generated_at)?;
        writeln!(f, "Total records: {}", summary.total_records)?;
        writeln!(f, "Countries: {}", summary.countries)?;
        writeln!(f, "Families: {}", summary.families)?;
        writeln!(f, "Genera: {}", summary.genera)?;
        writeln!(f, "Map points: {}", self.map_points.len())?;
        writeln!(f, "With image: {}", summary.with_image)?;

        let sections = [
            ("Records by Country", &self.stats.by_country),
            ("Most common Families", &self.stats.by_family),
            ("Most common Genera", &self.stats.by_genus),
            ("Records over time", &self.stats.by_month),
        ];
        for (title, rows) in sections {
            writeln!(f, "\n{title}:")?;
            if rows.is_empty() {
                writeln!(f, "- (no data)")?;
            }
            for (label, count) in rows {
                let label = if label.is_empty() { "(none)" } else { label.as_str() };
                writeln!(f, "- {label}: {count}")?;
            }
        }

        if let Some(regions) = &self.regions {
            writeln!(f, "\nDominant species by Region:")?;
            for entry in regions {
                match &entry.marker {
                    Some(point) => writeln!(
                        f,
                        "- {}: {} ({:.3}, {:.3})",
                        entry.region, point.label, point.position.latitude, point.position.longitude
                    )?,
                    None => writeln!(f, "- {}: (no result)", entry.region)?,
                }
            }
        }

        Ok(())
    }
}
