use chrono::Timelike;

/// Width of a time-of-day slot in minutes
const SLOT_MINUTES: u8 = 5;

/// A 5-minute time-of-day slot, anchored at `(hour, floor(minute / 5) * 5, 0)`.
///
/// The date of a timestamp is ignored, so readings from different days
/// taken at a similar time of day end up in the same slot.
///
/// Displays as `HH:MM:SS` (seconds are always `00`). The ordering of keys matches
/// the lexicographic ordering of that representation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    hour: u8,
    minute: u8,
}

impl BucketKey {
    /// Derives the slot of a timestamp, read in the timestamp's own time zone.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_timestamp<T: Timelike>(ts: &T) -> Self {
        // NOTE: hour() < 24 and minute() < 60, so both fit into u8
        let minute = ts.minute() as u8;

        Self {
            hour: ts.hour() as u8,
            minute: (minute / SLOT_MINUTES) * SLOT_MINUTES,
        }
    }

    /// Hour of the slot (0-23)
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// First minute of the slot (0, 5, ..., 55)
    #[must_use]
    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:00", self.hour, self.minute)
    }
}

impl serde::Serialize for BucketKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
