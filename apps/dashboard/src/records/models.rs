use serde::Serialize;
use std::fmt;

/// A record exactly as received from an upstream source
pub type RawRecord = serde_json::Value;

/// Upstream identifier, either textual (`gbifID`) or numeric (`key`, `id`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl Default for RecordId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Represents one normalized plant occurrence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub id: RecordId,
    pub species: String,
    pub family: String,
    pub genus: String,
    pub country: String,
    pub locality: String,
    pub event_date: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub habitat: String,
    pub image_url: Option<String>,
}

impl CanonicalRecord {
    /// Both coordinates, when the record has them
    pub fn position(&self) -> Option<Position> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) if latitude.is_finite() && longitude.is_finite() => {
                Some(Position {
                    latitude,
                    longitude,
                })
            }
            _ => None,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.position().is_some()
    }

    pub const fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}

/// One map marker: where to draw it and what to call it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayPoint {
    pub position: Position,
    pub label: String,
}
