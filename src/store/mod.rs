mod builder;
mod codec;

pub use builder::Builder;

use crate::{source::SerialSummary, DateRange, Reading, ReadingSource, Record, RecordType};
use fjall::{CompressionType, PartitionCreateOptions, TxKeyspace, TxPartition};
use std::ops::Bound;

const PARTITION_NAME: &str = "_glucostat#v2#readings";

/// Embedded store of glucose readings, ordered by time.
///
/// Readings are keyed by their UTC timestamp, record type and device serial number, so
/// writing the same reading of the same device twice keeps only one copy, while
/// rows of different record types at the same instant are all kept.
///
/// ```
/// # let dir = tempfile::tempdir()?;
/// use chrono::DateTime;
/// use glucostat::{DateRange, Reading, ReadingSource, ReadingStore, Record, RecordType, Zone};
///
/// let store = ReadingStore::builder().open(dir.path())?;
///
/// store.insert(&Record {
///     serial_number: "0M0000ABC12".into(),
///     record_type: RecordType::HISTORIC,
///     reading: Reading::new(DateTime::parse_from_rfc3339("2024-05-01T07:30:00+02:00").unwrap(), Some(104)),
/// })?;
///
/// let range = DateRange::parse("2024-05-01", "2024-05-01", &"+02:00".parse::<Zone>()?)?;
/// let readings = store.readings(&range, RecordType::HISTORIC)?;
/// assert_eq!(1, readings.len());
/// #
/// # Ok::<(), glucostat::Error>(())
/// ```
pub struct ReadingStore {
    keyspace: TxKeyspace,
    partition: TxPartition,
}

impl ReadingStore {
    /// Creates a builder to configure and open a reading store.
    #[must_use]
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(crate) fn from_keyspace(keyspace: TxKeyspace) -> crate::Result<Self> {
        let opts = PartitionCreateOptions::default()
            .block_size(4_096)
            .compression(CompressionType::Lz4)
            .max_memtable_size(8_000_000);

        let partition = keyspace.open_partition(PARTITION_NAME, opts)?;

        Ok(Self {
            keyspace,
            partition,
        })
    }

    /// Stores a single reading.
    ///
    /// # Errors
    ///
    /// Returns error if an I/O error occurred.
    pub fn insert(&self, record: &Record) -> crate::Result<()> {
        self.insert_batch(std::slice::from_ref(record))
    }

    /// Stores multiple readings atomically.
    ///
    /// # Errors
    ///
    /// Returns error if an I/O error occurred.
    pub fn insert_batch(&self, records: &[Record]) -> crate::Result<()> {
        let mut tx = self.keyspace.write_tx();

        for record in records {
            tx.insert(
                &self.partition,
                codec::encode_key(record),
                codec::encode_value(record)?,
            );
        }

        tx.commit()?;

        log::trace!("stored {} readings", records.len());

        Ok(())
    }

    /// Returns the number of stored readings.
    ///
    /// This scans the whole store.
    ///
    /// # Errors
    ///
    /// Returns error if an I/O error occurred.
    pub fn len(&self) -> crate::Result<usize> {
        Ok(self.partition.inner().len()?)
    }

    /// Returns `true` if no readings are stored.
    ///
    /// # Errors
    ///
    /// Returns error if an I/O error occurred.
    pub fn is_empty(&self) -> crate::Result<bool> {
        Ok(self.partition.inner().is_empty()?)
    }

    fn scan(
        &self,
        bounds: (Bound<[u8; codec::TIMESTAMP_LEN]>, Bound<[u8; codec::TIMESTAMP_LEN]>),
    ) -> impl Iterator<Item = crate::Result<Record>> + '_ {
        self.partition.inner().range(bounds).map(|kv| {
            let (k, v) = kv?;
            codec::decode(&k, &v)
        })
    }
}

impl ReadingSource for ReadingStore {
    fn readings(&self, range: &DateRange, record_type: RecordType) -> crate::Result<Vec<Reading>> {
        if range.is_empty() {
            log::debug!("Empty range {range}, nothing to scan");
            return Ok(vec![]);
        }

        let start = range.start.timestamp_micros();
        let end = range.end.timestamp_micros().saturating_add(1);

        let mut scanned = 0;
        let mut readings = vec![];

        for record in self.scan((
            Bound::Included(codec::encode_timestamp(start)),
            Bound::Excluded(codec::encode_timestamp(end)),
        )) {
            let record = record?;
            scanned += 1;

            if record.record_type == record_type {
                readings.push(record.reading);
            }
        }

        log::debug!(
            "Scanned {scanned} readings in {range}, {} of record type {record_type}",
            readings.len()
        );

        Ok(readings)
    }

    fn serials(&self) -> crate::Result<Vec<SerialSummary>> {
        let records = self
            .scan((Bound::Unbounded, Bound::Unbounded))
            .collect::<crate::Result<Vec<_>>>()?;

        log::debug!("Scanned {} readings for serial numbers", records.len());

        Ok(SerialSummary::collect(
            records
                .iter()
                .map(|r| (r.serial_number.as_str(), r.reading.timestamp)),
        ))
    }
}
