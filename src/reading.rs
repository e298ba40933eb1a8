use crate::Value;
use chrono::{DateTime, FixedOffset, SecondsFormat};

/// A single glucose measurement.
///
/// Readings without a value (e.g. sensor warm-up gaps) are kept as `None`
/// and ignored by the summarizer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Reading {
    /// Device timestamp, in the offset the device reported it in
    pub timestamp: DateTime<FixedOffset>,

    /// Glucose value in mg/dL
    pub value: Option<Value>,
}

impl Reading {
    /// Creates a new reading.
    #[must_use]
    pub fn new(timestamp: DateTime<FixedOffset>, value: Option<Value>) -> Self {
        Self { timestamp, value }
    }
}

/// Kind of a stored record, as exported by the monitoring device.
///
/// Only [`RecordType::HISTORIC`] records (the automatically logged readings)
/// are summarized by default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RecordType(pub u8);

impl RecordType {
    /// Automatically logged readings
    pub const HISTORIC: Self = Self(0);
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reading as it is stored, together with the device it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Serial number of the sensor device
    pub serial_number: String,

    /// Record type discriminant
    pub record_type: RecordType,

    /// The measurement itself
    pub reading: Reading,
}

/// A reading with a present value, ready to be sent to a client.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RawReading {
    /// RFC 3339 timestamp
    pub timestamp: String,

    /// Glucose value in mg/dL
    pub glucose: Value,
}

impl TryFrom<&Reading> for RawReading {
    type Error = ();

    /// Fails if the reading has no value.
    fn try_from(reading: &Reading) -> Result<Self, Self::Error> {
        let glucose = reading.value.ok_or(())?;

        Ok(Self {
            timestamp: reading.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            glucose,
        })
    }
}
