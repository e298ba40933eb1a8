//! Glucose monitor readings, summarized by time of day.
//!
//! Readings are grouped into 5-minute time-of-day slots (`00:00:00`, `00:05:00`, ...),
//! regardless of the date they were taken on. Each slot is summarized into its
//! 5th percentile, 95th percentile and average, which gives the typical
//! "ambulatory glucose profile" view of a date range.
//!
//! Readings are stored in an embedded LSM-tree keyspace (<https://github.com/fjall-rs/fjall>),
//! but the summarizer itself is a pure function over any sequence of readings.
//!
//! ```
//! use chrono::DateTime;
//! use glucostat::{summarize_readings, Reading};
//!
//! let ts = |s| DateTime::parse_from_rfc3339(s).unwrap();
//!
//! let readings = [
//!     Reading::new(ts("2024-05-01T00:01:00+02:00"), Some(100)),
//!     Reading::new(ts("2024-05-02T00:04:00+02:00"), Some(120)),
//!     Reading::new(ts("2024-05-01T00:06:00+02:00"), Some(200)),
//!     Reading::new(ts("2024-05-01T00:01:00+02:00"), None),
//! ];
//!
//! let summary = summarize_readings(&readings);
//!
//! assert_eq!(2, summary.len());
//! assert_eq!("00:00:00", summary[0].bucket_key.to_string());
//! assert_eq!(110.0, summary[0].average);
//! assert_eq!("00:05:00", summary[1].bucket_key.to_string());
//! assert_eq!(200.0, summary[1].average);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![warn(clippy::result_unit_err)]

mod bucket_key;
mod collate;
mod config;
mod date_range;
mod error;
mod reading;
mod service;
mod source;
mod stats;
mod store;
mod summary;

type HashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;

pub use bucket_key::BucketKey;
pub use collate::{collate, Buckets};
pub use config::{Config, Zone};
pub use date_range::DateRange;
pub use error::{Error, Result};
pub use reading::{RawReading, Reading, Record, RecordType};
pub use service::GlucoseService;
pub use source::{ReadingSource, SerialSummary};
pub use stats::{average, percentile, SortedReadings};
pub use store::{Builder as StoreBuilder, ReadingStore};
pub use summary::{summarize, summarize_readings, PercentileSummary, Summarizer};

/// Glucose value in mg/dL
pub type Value = i64;
