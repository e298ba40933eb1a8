mod avg;
mod percentile;

pub use avg::average;
pub use percentile::percentile;

use crate::Value;

/// A bucket of readings, sorted once so every statistic can share it.
///
/// Yields exactly the same results as the free-standing [`percentile`] and [`average`]
/// functions, which copy and sort on every call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortedReadings(Vec<Value>);

impl SortedReadings {
    /// Sorts the given readings in ascending order.
    #[must_use]
    pub fn new(mut values: Vec<Value>) -> Self {
        values.sort_unstable();
        Self(values)
    }

    /// Nearest-rank percentile, see [`percentile`].
    #[must_use]
    pub fn percentile(&self, n: u8) -> f64 {
        percentile::nearest_rank(&self.0, n)
    }

    /// Arithmetic mean, see [`average`].
    #[must_use]
    pub fn average(&self) -> f64 {
        average(&self.0)
    }

    /// Returns the number of readings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no readings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the readings in ascending order.
    #[must_use]
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl std::ops::Deref for SortedReadings {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
