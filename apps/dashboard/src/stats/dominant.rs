use serde::Serialize;

use super::aggregate::{count_by, rank_counts};
use crate::domain::Field;
use crate::records::{CanonicalRecord, DisplayPoint, Position};

/// The most frequent value of a field plus the record chosen to represent it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dominant<'a> {
    pub value: &'a str,
    pub count: usize,
    pub record: &'a CanonicalRecord,
}

impl Dominant<'_> {
    pub fn position(&self) -> Option<Position> {
        self.record.position()
    }

    pub fn display_point(&self) -> Option<DisplayPoint> {
        Some(DisplayPoint {
            position: self.position()?,
            label: self.value.to_string(),
        })
    }
}

/// Finds the most frequent non-sentinel value of `field`.
///
/// Ranking and tie-breaks match [`super::aggregate_by_field`]. The
/// representative is the first record in input order carrying the winning
/// value; when that record has no coordinates there is no result, even if a
/// later record with the same value has them.
pub fn select_dominant(records: &[CanonicalRecord], field: Field) -> Option<Dominant<'_>> {
    let (value, count) = rank_counts(count_by(records, |record| field.select(record)))
        .into_iter()
        .find(|(value, _)| !field.is_sentinel(value))?;

    let record = records
        .iter()
        .find(|record| field.select(record) == value)?;

    record.has_coordinates().then_some(Dominant {
        value,
        count,
        record,
    })
}
