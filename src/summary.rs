use crate::{collate, BucketKey, Buckets, Reading, SortedReadings, Value};

const FIFTH: u8 = 5;
const NINETY_FIFTH: u8 = 95;

/// Statistics of a single time-of-day bucket
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PercentileSummary {
    /// Time-of-day slot, serialized as `HH:MM:SS`
    #[serde(rename = "timeslot")]
    pub bucket_key: BucketKey,

    /// Readings of the bucket in ascending order, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readings: Option<Vec<Value>>,

    /// 5th percentile (nearest rank)
    #[serde(rename = "pct_05")]
    pub fifth_percentile: f64,

    /// 95th percentile (nearest rank)
    #[serde(rename = "pct_95")]
    pub ninety_fifth_percentile: f64,

    /// Arithmetic mean
    pub average: f64,
}

/// Configures how buckets are summarized.
#[derive(Copy, Clone, Debug, Default)]
pub struct Summarizer {
    include_readings: bool,
}

impl Summarizer {
    /// Creates a summarizer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// If `true`, every summary carries the sorted readings of its bucket.
    ///
    /// Default = false
    #[must_use]
    pub fn include_readings(mut self, enabled: bool) -> Self {
        self.include_readings = enabled;
        self
    }

    /// Summarizes every non-empty bucket, in ascending bucket order.
    #[must_use]
    pub fn summarize(&self, buckets: &Buckets) -> Vec<PercentileSummary> {
        let mut keys = buckets.keys().copied().collect::<Vec<_>>();
        keys.sort_unstable();

        keys.into_iter()
            .filter_map(|key| {
                let readings = buckets.get(&key)?;

                if readings.is_empty() {
                    return None;
                }

                let sorted = SortedReadings::new(readings.clone());

                Some(PercentileSummary {
                    bucket_key: key,
                    fifth_percentile: sorted.percentile(FIFTH),
                    ninety_fifth_percentile: sorted.percentile(NINETY_FIFTH),
                    average: sorted.average(),
                    readings: self.include_readings.then(|| sorted.into_inner()),
                })
            })
            .collect()
    }

    /// Collates readings into buckets and summarizes them.
    #[must_use]
    pub fn summarize_readings<'a, I>(&self, readings: I) -> Vec<PercentileSummary>
    where
        I: IntoIterator<Item = &'a Reading>,
    {
        self.summarize(&collate(readings))
    }
}

/// Summarizes every non-empty bucket into its 5th percentile, 95th percentile
/// and average, sorted by bucket key.
#[must_use]
pub fn summarize(buckets: &Buckets) -> Vec<PercentileSummary> {
    Summarizer::new().summarize(buckets)
}

/// Collates readings into 5-minute time-of-day buckets, and summarizes them.
///
/// Readings without a value are ignored.
#[must_use]
pub fn summarize_readings<'a, I>(readings: I) -> Vec<PercentileSummary>
where
    I: IntoIterator<Item = &'a Reading>,
{
    Summarizer::new().summarize_readings(readings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use test_log::test;

    fn reading(ts: &str, value: Option<Value>) -> Reading {
        Reading::new(DateTime::parse_from_rfc3339(ts).unwrap(), value)
    }

    #[test]
    fn summarize_end_to_end() {
        let readings = [
            reading("2024-05-01T00:01:00Z", Some(100)),
            reading("2024-05-01T00:04:00Z", Some(120)),
            reading("2024-05-01T00:06:00Z", Some(200)),
            reading("2024-05-01T00:01:00Z", None),
        ];

        let summary = summarize_readings(&readings);

        assert_eq!(2, summary.len());

        let first = summary.first().unwrap();
        assert_eq!("00:00:00", first.bucket_key.to_string());
        assert_eq!(100.0, first.fifth_percentile);
        assert_eq!(120.0, first.ninety_fifth_percentile);
        assert_eq!(110.0, first.average);
        assert_eq!(None, first.readings);

        let second = summary.get(1).unwrap();
        assert_eq!("00:05:00", second.bucket_key.to_string());
        assert_eq!(200.0, second.fifth_percentile);
        assert_eq!(200.0, second.ninety_fifth_percentile);
        assert_eq!(200.0, second.average);
    }

    #[test]
    fn summarize_sorted_regardless_of_input_order() {
        let start = DateTime::parse_from_rfc3339("2024-05-01T00:00:00+01:00").unwrap();

        let mut readings = (0..288)
            .map(|i| Reading::new(start + Duration::minutes(i * 5), Some(80 + i)))
            .collect::<Vec<_>>();
        readings.reverse();
        readings.swap(3, 200);

        let summary = summarize_readings(&readings);

        assert_eq!(288, summary.len());
        assert_eq!("00:00:00", summary.first().unwrap().bucket_key.to_string());
        assert_eq!("23:55:00", summary.last().unwrap().bucket_key.to_string());

        let keys = summary
            .iter()
            .map(|s| s.bucket_key.to_string())
            .collect::<Vec<_>>();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(sorted, keys);
    }

    #[test]
    fn summarize_skips_empty_buckets() {
        let mut buckets = Buckets::default();
        let key = BucketKey::from_timestamp(
            &DateTime::parse_from_rfc3339("2024-05-01T10:10:00Z").unwrap(),
        );
        buckets.insert(key, vec![]);

        assert!(summarize(&buckets).is_empty());
        assert!(summarize_readings(&[] as &[Reading]).is_empty());
    }

    #[test]
    fn summarize_with_readings() {
        let readings = [
            reading("2024-05-01T12:00:00Z", Some(150)),
            reading("2024-05-02T12:01:00Z", Some(90)),
            reading("2024-05-03T12:02:00Z", Some(120)),
        ];

        let summary = Summarizer::new()
            .include_readings(true)
            .summarize_readings(&readings);

        assert_eq!(1, summary.len());
        assert_eq!(Some(vec![90, 120, 150]), summary.first().unwrap().readings);
    }

    #[test]
    fn summary_json_format() {
        let readings = [
            reading("2024-05-01T07:40:00Z", Some(100)),
            reading("2024-05-02T07:41:00Z", Some(120)),
        ];

        let json = serde_json::to_string(&summarize_readings(&readings)).unwrap();
        assert_eq!(
            r#"[{"timeslot":"07:40:00","pct_05":100.0,"pct_95":120.0,"average":110.0}]"#,
            json
        );

        let json = serde_json::to_string(
            &Summarizer::new()
                .include_readings(true)
                .summarize_readings(&readings),
        )
        .unwrap();
        assert_eq!(
            r#"[{"timeslot":"07:40:00","readings":[100,120],"pct_05":100.0,"pct_95":120.0,"average":110.0}]"#,
            json
        );
    }
}
