use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use crate::domain::Field;
use crate::records::CanonicalRecord;

/// Counts records per selected value. Sentinel values are counted like any
/// other value.
pub fn count_by<'a, F>(records: &'a [CanonicalRecord], selector: F) -> HashMap<&'a str, usize>
where
    F: Fn(&'a CanonicalRecord) -> &'a str,
{
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(selector(record)).or_insert(0) += 1;
    }
    counts
}

/// Orders a count table by count descending, then by value ascending.
pub fn rank_counts<'a>(counts: HashMap<&'a str, usize>) -> Vec<(&'a str, usize)> {
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by_key(|&(value, count)| (Reverse(count), value));
    ranked
}

/// Top `top_n` values of `field` with their counts.
pub fn aggregate_by_field(
    records: &[CanonicalRecord],
    field: Field,
    top_n: usize,
) -> Vec<(String, usize)> {
    rank_counts(count_by(records, |record| field.select(record)))
        .into_iter()
        .take(top_n)
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

/// Sorted unique values of `field`, as offered by a filter dropdown.
pub fn distinct_values<'a, I>(records: I, field: Field) -> Vec<String>
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
{
    records
        .into_iter()
        .map(|record| field.select(record))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}
