use crate::records::CanonicalRecord;

/// Sentinel for a missing species name.
pub const UNKNOWN: &str = "unknown";
/// Sentinel for missing classification or habitat text.
pub const UNSPECIFIED: &str = "unspecified";

/// Categorical record field that views can group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Species,
    Family,
    Genus,
    Country,
    Locality,
    Habitat,
}

impl Field {
    /// Value the normalizer substitutes when the upstream field is absent.
    pub const fn sentinel(self) -> &'static str {
        match self {
            Self::Species | Self::Country | Self::Locality => UNKNOWN,
            Self::Family | Self::Habitat => UNSPECIFIED,
            Self::Genus => "",
        }
    }

    pub fn select(self, record: &CanonicalRecord) -> &str {
        match self {
            Self::Species => &record.species,
            Self::Family => &record.family,
            Self::Genus => &record.genus,
            Self::Country => &record.country,
            Self::Locality => &record.locality,
            Self::Habitat => &record.habitat,
        }
    }

    pub fn is_sentinel(self, value: &str) -> bool {
        value == self.sentinel()
    }
}

/// Inclusive latitude/longitude rectangle used for regional searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

/// Brazilian macro-region, the fixed partition the map fans out over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Norte,
    Nordeste,
    CentroOeste,
    Sudeste,
    Sul,
}

impl Region {
    pub const ALL: [Self; 5] = [
        Self::Norte,
        Self::Nordeste,
        Self::CentroOeste,
        Self::Sudeste,
        Self::Sul,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Norte => "norte",
            Self::Nordeste => "nordeste",
            Self::CentroOeste => "centro-oeste",
            Self::Sudeste => "sudeste",
            Self::Sul => "sul",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Norte => "Norte",
            Self::Nordeste => "Nordeste",
            Self::CentroOeste => "Centro-Oeste",
            Self::Sudeste => "Sudeste",
            Self::Sul => "Sul",
        }
    }

    // Approximate envelopes of the IBGE macro-regions.
    pub const fn bounds(self) -> BoundingBox {
        match self {
            Self::Norte => BoundingBox {
                lat_min: -13.7,
                lat_max: 5.3,
                lon_min: -74.0,
                lon_max: -46.0,
            },
            Self::Nordeste => BoundingBox {
                lat_min: -18.4,
                lat_max: -1.0,
                lon_min: -48.8,
                lon_max: -34.8,
            },
            Self::CentroOeste => BoundingBox {
                lat_min: -24.1,
                lat_max: -7.3,
                lon_min: -61.6,
                lon_max: -45.9,
            },
            Self::Sudeste => BoundingBox {
                lat_min: -25.3,
                lat_max: -14.2,
                lon_min: -53.1,
                lon_max: -39.7,
            },
            Self::Sul => BoundingBox {
                lat_min: -33.8,
                lat_max: -22.5,
                lon_min: -57.7,
                lon_max: -48.0,
            },
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::normalize;
    use serde_json::json;

    #[test]
    fn select_reads_the_matching_field() {
        let record = normalize(&json!({ "especie": "Mimosa pudica", "genero": "Mimosa" }));

        assert_eq!(Field::Species.select(&record), "Mimosa pudica");
        assert_eq!(Field::Genus.select(&record), "Mimosa");
        assert!(Field::Family.is_sentinel(Field::Family.select(&record)));
        assert!(Field::Genus.is_sentinel(""));
        assert!(!Field::Species.is_sentinel("Mimosa pudica"));
    }

    #[test]
    fn region_bounds_are_well_formed() {
        for region in Region::ALL {
            let bounds = region.bounds();
            assert!(bounds.lat_min < bounds.lat_max, "{region}");
            assert!(bounds.lon_min < bounds.lon_max, "{region}");
        }
        assert!(Region::Sul.bounds().lat_max < Region::Norte.bounds().lat_min);
    }
}
