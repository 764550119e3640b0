use serde::Serialize;

use super::aggregate::distinct_values;
use crate::domain::Field;
use crate::records::{CanonicalRecord, DisplayPoint};

/// Choices offered by the map's family, genus and country dropdowns. Only
/// geolocated records contribute values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub families: Vec<String>,
    pub genera: Vec<String>,
    pub countries: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[CanonicalRecord]) -> Self {
        let geolocated = || records.iter().filter(|record| record.has_coordinates());

        Self {
            families: distinct_values(geolocated(), Field::Family),
            genera: distinct_values(geolocated(), Field::Genus),
            countries: distinct_values(geolocated(), Field::Country),
        }
    }
}

/// Dashboard filter selection. An unset criterion matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordFilter {
    pub family: Option<String>,
    pub genus: Option<String>,
    pub country: Option<String>,
    pub only_with_image: bool,
}

impl RecordFilter {
    pub const fn is_empty(&self) -> bool {
        self.family.is_none()
            && self.genus.is_none()
            && self.country.is_none()
            && !self.only_with_image
    }

    pub fn matches(&self, record: &CanonicalRecord) -> bool {
        let criterion = |wanted: &Option<String>, field: Field| {
            wanted
                .as_deref()
                .filter(|wanted| !wanted.is_empty())
                .map_or(true, |wanted| field.select(record) == wanted)
        };

        criterion(&self.family, Field::Family)
            && criterion(&self.genus, Field::Genus)
            && criterion(&self.country, Field::Country)
            && (!self.only_with_image || record.has_image())
    }

    pub fn apply<'a>(&self, records: &'a [CanonicalRecord]) -> Vec<&'a CanonicalRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// One marker per geolocated record, labelled with its species.
pub fn map_points<'a, I>(records: I) -> Vec<DisplayPoint>
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
{
    records
        .into_iter()
        .filter_map(|record| {
            Some(DisplayPoint {
                position: record.position()?,
                label: record.species.clone(),
            })
        })
        .collect()
}
