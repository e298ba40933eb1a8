use crate::{BucketKey, Reading, Value};

/// Readings grouped by their time-of-day slot
pub type Buckets = crate::HashMap<BucketKey, Vec<Value>>;

/// Groups readings into 5-minute time-of-day buckets.
///
/// Readings without a value are skipped entirely. Filtering by record type
/// is up to the caller.
#[must_use]
pub fn collate<'a, I>(readings: I) -> Buckets
where
    I: IntoIterator<Item = &'a Reading>,
{
    let mut buckets = Buckets::default();

    for reading in readings {
        let Some(value) = reading.value else {
            continue;
        };

        buckets
            .entry(BucketKey::from_timestamp(&reading.timestamp))
            .or_default()
            .push(value);
    }

    buckets
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use test_log::test;

    fn reading(ts: &str, value: Option<Value>) -> Reading {
        Reading::new(DateTime::parse_from_rfc3339(ts).unwrap(), value)
    }

    fn key(s: &str) -> BucketKey {
        let ts = DateTime::parse_from_rfc3339(&format!("2000-01-01T{s}Z")).unwrap();
        BucketKey::from_timestamp(&ts)
    }

    #[test]
    fn collate_groups_by_slot() {
        let readings = [
            reading("2024-05-01T00:01:00Z", Some(100)),
            reading("2024-05-01T00:04:00Z", Some(120)),
            reading("2024-05-01T00:06:00Z", Some(200)),
            reading("2024-05-01T00:01:00Z", None),
        ];

        let buckets = collate(&readings);

        assert_eq!(2, buckets.len());
        assert_eq!(&[100, 120], &buckets[&key("00:00:00")][..]);
        assert_eq!(&[200], &buckets[&key("00:05:00")][..]);
    }

    #[test]
    fn collate_merges_days() {
        let readings = [
            reading("2024-05-01T13:31:00+02:00", Some(90)),
            reading("2024-05-02T13:33:00+02:00", Some(95)),
            reading("2023-01-17T13:34:59+02:00", Some(99)),
        ];

        let buckets = collate(&readings);

        assert_eq!(1, buckets.len());
        assert_eq!(&[90, 95, 99], &buckets[&key("13:30:00")][..]);
    }

    #[test]
    fn collate_drops_absent_values() {
        let readings = [
            reading("2024-05-01T08:00:00Z", None),
            reading("2024-05-01T08:15:00Z", Some(140)),
            reading("2024-05-01T08:30:00Z", None),
            reading("2024-05-01T08:45:00Z", Some(150)),
            reading("2024-05-01T09:00:00Z", Some(160)),
        ];

        let buckets = collate(&readings);

        let present = readings.iter().filter(|r| r.value.is_some()).count();
        assert_eq!(present, buckets.values().map(Vec::len).sum::<usize>());
        assert!(!buckets.contains_key(&key("08:00:00")));
        assert!(!buckets.contains_key(&key("08:30:00")));
    }

    #[test]
    fn collate_empty() {
        assert!(collate(&[] as &[Reading]).is_empty());
        assert!(collate(&[reading("2024-05-01T08:00:00Z", None)]).is_empty());
    }
}
