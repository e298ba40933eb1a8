use crate::{DateRange, Reading, Record, RecordType};
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;

/// Time span covered by a single sensor device
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SerialSummary {
    /// Serial number of the sensor device
    pub serial_number: String,

    /// Earliest reading of the device
    pub first_timestamp: DateTime<FixedOffset>,

    /// Latest reading of the device
    pub last_timestamp: DateTime<FixedOffset>,
}

impl SerialSummary {
    /// Folds (serial, timestamp) pairs into one summary per serial, sorted by serial.
    pub(crate) fn collect<'a, I>(items: I) -> Vec<Self>
    where
        I: IntoIterator<Item = (&'a str, DateTime<FixedOffset>)>,
    {
        let mut map: BTreeMap<&str, (DateTime<FixedOffset>, DateTime<FixedOffset>)> =
            BTreeMap::new();

        for (serial, ts) in items {
            map.entry(serial)
                .and_modify(|(first, last)| {
                    if ts < *first {
                        *first = ts;
                    }
                    if ts > *last {
                        *last = ts;
                    }
                })
                .or_insert((ts, ts));
        }

        map.into_iter()
            .map(|(serial, (first, last))| Self {
                serial_number: serial.to_owned(),
                first_timestamp: first,
                last_timestamp: last,
            })
            .collect()
    }
}

/// Access to stored readings
///
/// The service only talks to its data through this trait, so it can be
/// backed by the embedded [`crate::ReadingStore`], or by records in memory.
pub trait ReadingSource {
    /// Returns all readings of the given record type within the (inclusive) range,
    /// in ascending time order.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying storage failed.
    fn readings(&self, range: &DateRange, record_type: RecordType) -> crate::Result<Vec<Reading>>;

    /// Returns the first and last reading timestamp of every device, sorted by serial number.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying storage failed.
    fn serials(&self) -> crate::Result<Vec<SerialSummary>>;
}

impl<T: ReadingSource + ?Sized> ReadingSource for &T {
    fn readings(&self, range: &DateRange, record_type: RecordType) -> crate::Result<Vec<Reading>> {
        (**self).readings(range, record_type)
    }

    fn serials(&self) -> crate::Result<Vec<SerialSummary>> {
        (**self).serials()
    }
}

impl ReadingSource for [Record] {
    fn readings(&self, range: &DateRange, record_type: RecordType) -> crate::Result<Vec<Reading>> {
        let mut readings = self
            .iter()
            .filter(|r| r.record_type == record_type && range.contains(&r.reading.timestamp))
            .map(|r| r.reading)
            .collect::<Vec<_>>();

        readings.sort_by_key(|r| r.timestamp);

        Ok(readings)
    }

    fn serials(&self) -> crate::Result<Vec<SerialSummary>> {
        Ok(SerialSummary::collect(
            self.iter()
                .map(|r| (r.serial_number.as_str(), r.reading.timestamp)),
        ))
    }
}

impl ReadingSource for Vec<Record> {
    fn readings(&self, range: &DateRange, record_type: RecordType) -> crate::Result<Vec<Reading>> {
        self.as_slice().readings(range, record_type)
    }

    fn serials(&self) -> crate::Result<Vec<SerialSummary>> {
        self.as_slice().serials()
    }
}
