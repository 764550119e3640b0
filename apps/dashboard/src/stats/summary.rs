use serde::Serialize;
use std::collections::HashSet;

use super::aggregate::aggregate_by_field;
use super::timeline::bucket_by_month;
use crate::domain::Field;
use crate::records::CanonicalRecord;

/// Number of bars shown per category chart
pub const DEFAULT_TOP_N: usize = 6;

/// Headline numbers for the statistics cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_records: usize,
    pub countries: usize,
    pub families: usize,
    pub genera: usize,
    pub with_coordinates: usize,
    pub with_image: usize,
}

impl Summary {
    pub fn from_records(records: &[CanonicalRecord]) -> Self {
        let distinct = |field: Field| {
            records
                .iter()
                .map(|record| field.select(record))
                .collect::<HashSet<_>>()
                .len()
        };

        Self {
            total_records: records.len(),
            countries: distinct(Field::Country),
            families: distinct(Field::Family),
            genera: distinct(Field::Genus),
            with_coordinates: records.iter().filter(|r| r.has_coordinates()).count(),
            with_image: records.iter().filter(|r| r.has_image()).count(),
        }
    }
}

/// Everything the statistics panel renders, derived in one pass over a
/// record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsView {
    pub summary: Summary,
    pub by_country: Vec<(String, usize)>,
    pub by_family: Vec<(String, usize)>,
    pub by_genus: Vec<(String, usize)>,
    pub by_month: Vec<(String, usize)>,
}

impl StatsView {
    pub fn build(records: &[CanonicalRecord], top_n: usize) -> Self {
        Self {
            summary: Summary::from_records(records),
            by_country: aggregate_by_field(records, Field::Country, top_n),
            by_family: aggregate_by_field(records, Field::Family, top_n),
            by_genus: aggregate_by_field(records, Field::Genus, top_n),
            by_month: bucket_by_month(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::normalize;
    use serde_json::json;

    #[test]
    fn empty_records_give_zeroed_view() {
        let view = StatsView::build(&[], DEFAULT_TOP_N);

        assert_eq!(view.summary, Summary::default());
        assert!(view.by_country.is_empty());
        assert!(view.by_month.is_empty());
    }

    #[test]
    fn summary_counts_distinct_values() {
        let records: Vec<_> = [
            json!({ "pais": "Brasil", "familia": "Fabaceae", "genero": "Bauhinia",
                    "lat": -1.0, "lon": -50.0 }),
            json!({ "pais": "Brasil", "familia": "Fabaceae", "genero": "Mimosa" }),
            json!({ "pais": "Argentina", "familia": "Orchidaceae", "genero": "Cattleya",
                    "imagem": "https://example.org/c.jpg" }),
        ]
        .iter()
        .map(normalize)
        .collect();

        let view = StatsView::build(&records, 1);

        assert_eq!(
            view.summary,
            Summary {
                total_records: 3,
                countries: 2,
                families: 2,
                genera: 3,
                with_coordinates: 1,
                with_image: 1,
            }
        );
        assert_eq!(view.by_country, vec![("Brasil".to_string(), 2)]);
        assert_eq!(view.by_family, vec![("Fabaceae".to_string(), 2)]);
        assert_eq!(view.by_genus, vec![("Bauhinia".to_string(), 1)]);
        assert_eq!(view.by_month, vec![("unknown".to_string(), 3)]);
    }
}
