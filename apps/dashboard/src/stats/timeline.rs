use std::collections::BTreeMap;

use crate::records::CanonicalRecord;

/// Bucket for records whose event date is shorter than a `YYYY-MM` prefix
pub const UNKNOWN_MONTH: &str = "unknown";

const MONTH_KEY_CHARS: usize = 7;

/// Month bucket for an event date: its first seven characters, taken as is.
///
/// The prefix is not validated, so a date such as `"15/01/2023"` yields
/// `"15/01/2"`. Dates with fewer than seven characters have no key.
pub fn month_key(event_date: &str) -> Option<&str> {
    let end = event_date
        .char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(event_date.len()))
        .nth(MONTH_KEY_CHARS)?;
    Some(&event_date[..end])
}

/// Record counts per month, in ascending string order of the bucket key.
///
/// `"unknown"` is ordered as a plain string, which puts it after every
/// numeric `YYYY-MM` key.
pub fn bucket_by_month(records: &[CanonicalRecord]) -> Vec<(String, usize)> {
    let mut buckets: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        let key = month_key(&record.event_date).unwrap_or(UNKNOWN_MONTH);
        *buckets.entry(key).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(month, count)| (month.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::normalize;
    use serde_json::json;

    fn with_dates(dates: &[&str]) -> Vec<CanonicalRecord> {
        dates
            .iter()
            .map(|date| normalize(&json!({ "data": date })))
            .collect()
    }

    #[test]
    fn groups_by_month_and_keeps_unknown_last() {
        let records = with_dates(&["2023-01-15", "2023-01-20", "2023-02-01", ""]);

        assert_eq!(
            bucket_by_month(&records),
            vec![
                ("2023-01".to_string(), 2),
                ("2023-02".to_string(), 1),
                ("unknown".to_string(), 1),
            ]
        );
    }

    #[test]
    fn short_dates_land_in_unknown() {
        let records = with_dates(&["2023-1", "2023", "s/d", "1999-12-31"]);

        assert_eq!(
            bucket_by_month(&records),
            vec![("1999-12".to_string(), 1), ("unknown".to_string(), 3)]
        );
    }

    #[test]
    fn long_dates_keep_their_prefix_unvalidated() {
        let records = with_dates(&["2023-13-01", "15/01/2023", "garbage-date", "2023-13-20"]);

        assert_eq!(
            bucket_by_month(&records),
            vec![
                ("15/01/2".to_string(), 1),
                ("2023-13".to_string(), 2),
                ("garbage".to_string(), 1),
            ]
        );
    }

    #[test]
    fn keys_are_distinct_and_sorted() {
        let records = with_dates(&[
            "2024-03-01",
            "2021-11-30",
            "2024-03-09",
            "",
            "2022-07-04T12:00:00",
            "2021-11-01",
        ]);

        let series = bucket_by_month(&records);
        assert!(series.windows(2).all(|pair| pair[0].0 < pair[1].0));
        assert_eq!(series.iter().map(|(_, count)| count).sum::<usize>(), records.len());
    }

    #[test]
    fn month_key_does_not_split_multibyte_text() {
        assert_eq!(month_key("2023-05"), Some("2023-05"));
        assert_eq!(month_key("ção-ção-ção"), Some("ção-ção"));
        assert_eq!(month_key("çãoção"), None);
        assert_eq!(month_key("2023"), None);
    }

    #[test]
    fn empty_input_gives_empty_series() {
        assert!(bucket_by_month(&[]).is_empty());
    }
}
