use crate::{
    DateRange, PercentileSummary, RawReading, ReadingSource, RecordType, SerialSummary,
    Summarizer, Zone,
};
use std::time::Instant;

/// Answers reading queries over an explicitly passed data source.
///
/// Request dates are `YYYY-MM-DD` strings, interpreted in the configured zone.
pub struct GlucoseService<S: ReadingSource> {
    source: S,
    zone: Zone,
    record_type: RecordType,
}

impl<S: ReadingSource> GlucoseService<S> {
    /// Creates a service that summarizes [`RecordType::HISTORIC`] readings,
    /// with dates in the local time zone.
    pub fn new(source: S) -> Self {
        Self {
            source,
            zone: Zone::Local,
            record_type: RecordType::HISTORIC,
        }
    }

    /// Sets the time zone request dates are interpreted in.
    #[must_use]
    pub fn zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Sets the record type that is queried.
    #[must_use]
    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    /// Returns the underlying data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Summarizes readings between two dates (inclusive) per 5-minute time-of-day slot.
    ///
    /// # Errors
    ///
    /// Returns error if a date is invalid, or the data source failed.
    pub fn summary(&self, from: &str, to: &str) -> crate::Result<Vec<PercentileSummary>> {
        self.summary_with(from, to, &Summarizer::new())
    }

    /// Like [`GlucoseService::summary`], with a custom summarizer.
    ///
    /// # Errors
    ///
    /// Returns error if a date is invalid, or the data source failed.
    pub fn summary_with(
        &self,
        from: &str,
        to: &str,
        summarizer: &Summarizer,
    ) -> crate::Result<Vec<PercentileSummary>> {
        let start = Instant::now();

        let range = DateRange::parse(from, to, &self.zone)?;
        let readings = self.source.readings(&range, self.record_type)?;
        let summary = summarizer.summarize_readings(&readings);

        log::debug!(
            "Summarized {} readings in {range} into {} buckets in {:?}",
            readings.len(),
            summary.len(),
            start.elapsed(),
        );

        Ok(summary)
    }

    /// Returns all readings with a value between two dates (inclusive).
    ///
    /// # Errors
    ///
    /// Returns error if a date is invalid, or the data source failed.
    pub fn raw(&self, from: &str, to: &str) -> crate::Result<Vec<RawReading>> {
        let range = DateRange::parse(from, to, &self.zone)?;

        let raw = self
            .source
            .readings(&range, self.record_type)?
            .iter()
            .filter_map(|reading| RawReading::try_from(reading).ok())
            .collect::<Vec<_>>();

        log::debug!("Returning {} raw readings in {range}", raw.len());

        Ok(raw)
    }

    /// Returns the time span covered by each sensor device.
    ///
    /// # Errors
    ///
    /// Returns error if the data source failed.
    pub fn serials(&self) -> crate::Result<Vec<SerialSummary>> {
        self.source.serials()
    }
}
