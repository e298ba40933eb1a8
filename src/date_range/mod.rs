mod parser;
mod span;

use crate::Zone;
use chrono::{DateTime, FixedOffset, NaiveDate};
use parser::parse_date;

/// An inclusive time range, covering whole calendar days.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    /// Start of the first day (`00:00:00`)
    pub start: DateTime<FixedOffset>,

    /// Last second of the last day (`23:59:59`)
    pub end: DateTime<FixedOffset>,
}

impl DateRange {
    /// Parses two `YYYY-MM-DD` dates into a range spanning
    /// `from 00:00:00` up to and including `to 23:59:59`, in the given time zone.
    ///
    /// A `from` date after the `to` date is not an error; the range is simply empty.
    ///
    /// # Errors
    ///
    /// Returns error if a date is malformed, does not exist or cannot be
    /// represented in the time zone.
    pub fn parse(from: &str, to: &str, zone: &Zone) -> crate::Result<Self> {
        let start = parse_day(from)?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| crate::Error::InvalidDate(from.into()))?;
        let end = parse_day(to)?
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| crate::Error::InvalidDate(to.into()))?;

        Ok(Self {
            start: zone
                .resolve(&start, true)
                .ok_or_else(|| crate::Error::InvalidDate(from.into()))?,
            end: zone
                .resolve(&end, false)
                .ok_or_else(|| crate::Error::InvalidDate(to.into()))?,
        })
    }

    /// Returns `true` if no timestamp can fall into the range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Returns `true` if the timestamp lies within the range.
    #[must_use]
    pub fn contains(&self, ts: &DateTime<FixedOffset>) -> bool {
        &self.start <= ts && ts <= &self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}..={}]", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

fn parse_day(input: &str) -> crate::Result<NaiveDate> {
    let date = parse_date(input).map_err(|column| {
        log::debug!("invalid date {input:?} at column {column}");
        crate::Error::InvalidDate(input.into())
    })?;

    NaiveDate::from_ymd_opt(date.year, date.month, date.day)
        .ok_or_else(|| crate::Error::InvalidDate(input.into()))
}
