//! Conversion of upstream occurrence JSON into [`CanonicalRecord`]s.
//!
//! Two shapes are understood: GBIF occurrence search results and the
//! Portuguese-keyed static dataset. Lookups try each alias in order and take
//! the first usable value, so a record mixing both shapes still normalizes.
//! Anything absent, null, blank, or of the wrong JSON type falls back to the
//! field's sentinel.

use serde_json::{Map, Value};
use std::collections::HashSet;

use super::models::{CanonicalRecord, RawRecord, RecordId};
use crate::domain::Field;

const ID_KEYS: &[&str] = &["id", "key", "gbifID"];
const SPECIES_KEYS: &[&str] = &["especie", "species", "scientificName"];
const FAMILY_KEYS: &[&str] = &["familia", "family"];
const GENUS_KEYS: &[&str] = &["genero", "genus"];
const COUNTRY_KEYS: &[&str] = &["pais", "country", "countryCode"];
const LOCALITY_KEYS: &[&str] = &["local", "locality", "stateProvince", "municipality"];
const DATE_KEYS: &[&str] = &["data", "eventDate"];
const LATITUDE_KEYS: &[&str] = &["lat", "decimalLatitude", "latitude"];
const LONGITUDE_KEYS: &[&str] = &["lon", "decimalLongitude", "longitude"];
const HABITAT_KEYS: &[&str] = &["habitat"];
const IMAGE_KEYS: &[&str] = &["imagem", "imageUrl", "image"];

/// Normalizes a single raw record. Never fails.
pub fn normalize(raw: &RawRecord) -> CanonicalRecord {
    let empty = Map::new();
    let object = raw.as_object().unwrap_or(&empty);

    CanonicalRecord {
        id: record_id(object).unwrap_or_default(),
        species: text_or(object, SPECIES_KEYS, Field::Species),
        family: text_or(object, FAMILY_KEYS, Field::Family),
        genus: text_or(object, GENUS_KEYS, Field::Genus),
        country: text_or(object, COUNTRY_KEYS, Field::Country),
        locality: text_or(object, LOCALITY_KEYS, Field::Locality),
        event_date: text(object, DATE_KEYS).unwrap_or_default(),
        latitude: coordinate(object, LATITUDE_KEYS, 90.0),
        longitude: coordinate(object, LONGITUDE_KEYS, 180.0),
        habitat: text_or(object, HABITAT_KEYS, Field::Habitat),
        image_url: text(object, IMAGE_KEYS).or_else(|| media_identifier(object)),
    }
}

/// Normalizes a fetched batch, giving id-less records a positional id
/// (`#0`, `#1`, ...). A positional id that an upstream record already uses
/// gets primes appended (`#1'`) until it is free, so generated ids never
/// shadow another record in the batch.
pub fn normalize_batch(raws: &[RawRecord]) -> Vec<CanonicalRecord> {
    let mut records: Vec<CanonicalRecord> = raws.iter().map(normalize).collect();
    let mut taken: HashSet<String> = records
        .iter()
        .filter(|record| record.id != RecordId::default())
        .map(|record| record.id.to_string())
        .collect();

    for (index, record) in records.iter_mut().enumerate() {
        if record.id != RecordId::default() {
            continue;
        }
        let mut id = format!("#{index}");
        while taken.contains(&id) {
            id.push('\'');
        }
        taken.insert(id.clone());
        record.id = RecordId::Text(id);
    }
    records
}

fn text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        object
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    })
}

fn text_or(object: &Map<String, Value>, keys: &[&str], field: Field) -> String {
    text(object, keys).unwrap_or_else(|| field.sentinel().to_string())
}

fn record_id(object: &Map<String, Value>) -> Option<RecordId> {
    ID_KEYS.iter().find_map(|key| match object.get(*key)? {
        Value::Number(number) => number.as_i64().map(RecordId::Number),
        Value::String(text) if !text.trim().is_empty() => {
            Some(RecordId::Text(text.trim().to_string()))
        }
        _ => None,
    })
}

// Numeric strings are accepted; out-of-range or non-finite values are not.
fn coordinate(object: &Map<String, Value>, keys: &[&str], limit: f64) -> Option<f64> {
    keys.iter().find_map(|key| {
        let value = match object.get(*key)? {
            Value::Number(number) => number.as_f64()?,
            Value::String(text) => text.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        (value.is_finite() && value.abs() <= limit).then_some(value)
    })
}

fn media_identifier(object: &Map<String, Value>) -> Option<String> {
    object
        .get("media")?
        .as_array()?
        .iter()
        .find_map(|item| {
            item.get("identifier")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
        })
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_yields_all_sentinels() {
        let record = normalize(&json!({}));

        assert_eq!(record.id, RecordId::Text(String::new()));
        assert_eq!(record.species, "unknown");
        assert_eq!(record.family, "unspecified");
        assert_eq!(record.genus, "");
        assert_eq!(record.country, "unknown");
        assert_eq!(record.locality, "unknown");
        assert_eq!(record.event_date, "");
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, None);
        assert_eq!(record.habitat, "unspecified");
        assert_eq!(record.image_url, None);
    }

    #[test]
    fn non_object_input_is_treated_as_empty() {
        assert_eq!(normalize(&json!(null)), normalize(&json!({})));
        assert_eq!(normalize(&json!([1, 2, 3])), normalize(&json!({})));
        assert_eq!(normalize(&json!("Ipomoea")), normalize(&json!({})));
    }

    #[test]
    fn reads_local_dataset_shape() {
        let record = normalize(&json!({
            "id": 7,
            "especie": "Handroanthus albus",
            "familia": "Bignoniaceae",
            "genero": "Handroanthus",
            "pais": "Brasil",
            "local": "Minas Gerais",
            "data": "2023-08-14",
            "lat": -19.9,
            "lon": -43.9,
            "habitat": "Cerrado",
            "imagem": "https://example.org/ipe.jpg"
        }));

        assert_eq!(record.id, RecordId::Number(7));
        assert_eq!(record.species, "Handroanthus albus");
        assert_eq!(record.family, "Bignoniaceae");
        assert_eq!(record.genus, "Handroanthus");
        assert_eq!(record.country, "Brasil");
        assert_eq!(record.locality, "Minas Gerais");
        assert_eq!(record.event_date, "2023-08-14");
        assert_eq!(record.latitude, Some(-19.9));
        assert_eq!(record.longitude, Some(-43.9));
        assert_eq!(record.habitat, "Cerrado");
        assert_eq!(record.image_url.as_deref(), Some("https://example.org/ipe.jpg"));
    }

    #[test]
    fn reads_gbif_shape() {
        let record = normalize(&json!({
            "key": 4_011_222_333_i64,
            "scientificName": "Ipomoea cairica (L.) Sweet",
            "family": "Convolvulaceae",
            "genus": "Ipomoea",
            "countryCode": "BR",
            "stateProvince": "São Paulo",
            "eventDate": "2023-01-15T10:20:00",
            "decimalLatitude": -23.5,
            "decimalLongitude": -46.6,
            "media": [{ "type": "StillImage", "identifier": "https://example.org/a.jpg" }]
        }));

        assert_eq!(record.id, RecordId::Number(4_011_222_333));
        assert_eq!(record.species, "Ipomoea cairica (L.) Sweet");
        assert_eq!(record.country, "BR");
        assert_eq!(record.locality, "São Paulo");
        assert_eq!(record.event_date, "2023-01-15T10:20:00");
        assert_eq!(record.habitat, "unspecified");
        assert_eq!(record.image_url.as_deref(), Some("https://example.org/a.jpg"));
        assert!(record.has_coordinates());
    }

    #[test]
    fn wrong_types_and_blanks_fall_back() {
        let record = normalize(&json!({
            "id": {"nested": true},
            "especie": "   ",
            "familia": 42,
            "genero": null,
            "pais": ["BR"],
            "data": 20_230_115,
            "lat": "not a number",
            "lon": true,
            "imagem": ""
        }));

        assert_eq!(record, normalize(&json!({})));
    }

    #[test]
    fn coordinates_accept_numeric_strings_and_reject_out_of_range() {
        let record = normalize(&json!({ "lat": " -22.9 ", "lon": "-43.2" }));
        assert_eq!(record.latitude, Some(-22.9));
        assert_eq!(record.longitude, Some(-43.2));

        let record = normalize(&json!({ "lat": 123.0, "lon": -43.2 }));
        assert_eq!(record.latitude, None);
        assert!(!record.has_coordinates());
    }

    #[test]
    fn string_ids_are_kept_as_text() {
        let record = normalize(&json!({ "gbifID": " 1234 " }));
        assert_eq!(record.id, RecordId::Text("1234".to_string()));
    }

    #[test]
    fn batch_assigns_positional_ids_only_when_missing() {
        let records = normalize_batch(&[json!({}), json!({ "id": "abc" }), json!({})]);

        let ids: Vec<String> = records.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["#0", "abc", "#2"]);
    }

    #[test]
    fn batch_ids_do_not_clash_with_upstream_ids() {
        let records = normalize_batch(&[
            json!({ "id": "#1" }),
            json!({}),
            json!({ "id": "#1'" }),
            json!({}),
        ]);

        let ids: Vec<String> = records.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["#1", "#1''", "#1'", "#3"]);
    }
}
