use clap::Parser;

use flora_dashboard::stats::RecordFilter;

#[derive(Debug, Parser)]
#[command(name = "flora_dashboard", version, about = "Plant occurrence dashboard (headless)")]
pub struct CliArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Dataset file path or http(s) URL
    #[arg(long, value_name = "PATH|URL")]
    pub dataset: Option<String>,

    /// Keep at most this many dataset records (0 keeps all)
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Entries per ranked category
    #[arg(long = "top", value_name = "N")]
    pub top_n: Option<usize>,

    /// Also fetch one dominant-species marker per region from GBIF
    #[arg(long)]
    pub regions: bool,

    /// Override the GBIF API base URL
    #[arg(long = "gbif-url", value_name = "URL")]
    pub gbif_url: Option<String>,

    /// Only keep records of this family
    #[arg(long)]
    pub family: Option<String>,

    /// Only keep records of this genus
    #[arg(long)]
    pub genus: Option<String>,

    /// Only keep records from this country
    #[arg(long)]
    pub country: Option<String>,

    /// Only keep records that have an image
    #[arg(long = "with-image")]
    pub with_image: bool,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(dataset) = &self.dataset {
            std::env::set_var("FLORA_DATASET", dataset);
        }
        if let Some(limit) = self.limit {
            std::env::set_var("FLORA_LIMIT", limit.to_string());
        }
        if let Some(top_n) = self.top_n {
            std::env::set_var("FLORA_TOP_N", top_n.to_string());
        }
        if let Some(url) = &self.gbif_url {
            std::env::set_var("GBIF_API_URL", url);
        }
        if self.debug {
            std::env::set_var("FLORA_DEBUG", "1");
        }
    }

    pub fn record_filter(&self) -> RecordFilter {
        RecordFilter {
            family: self.family.clone(),
            genus: self.genus.clone(),
            country: self.country.clone(),
            only_with_image: self.with_image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_flags_build_record_filter() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "flora_dashboard",
            "--family",
            "Fabaceae",
            "--with-image",
            "--top",
            "3",
        ])?;

        assert_eq!(args.top_n, Some(3));
        assert_eq!(
            args.record_filter(),
            RecordFilter {
                family: Some("Fabaceae".to_string()),
                only_with_image: true,
                ..RecordFilter::default()
            }
        );
        Ok(())
    }

    #[test]
    fn help_mentions_regions_flag() {
        use clap::CommandFactory;

        let help = CliArgs::command().render_help().to_string();
        assert!(help.contains("--regions"));
    }
}
