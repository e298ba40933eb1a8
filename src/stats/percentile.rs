use crate::Value;

/// Calculates the n-th percentile (`0..=100`) of some readings.
///
/// This is a nearest-rank percentile without interpolation: the readings are
/// sorted, and the value at index `floor(n * len / 100)` is returned (clamped
/// to the last element). It therefore tends to under-estimate compared to
/// linearly interpolated percentiles, which is expected by consumers of the
/// summary and must not be "fixed".
///
/// Returns `NaN` if there are no readings.
///
/// ```
/// use glucostat::percentile;
///
/// assert_eq!(10.0, percentile(&[50, 40, 30, 20, 10], 5));
/// assert_eq!(50.0, percentile(&[50, 40, 30, 20, 10], 95));
/// assert!(percentile(&[], 50).is_nan());
/// ```
#[must_use]
pub fn percentile(data: &[Value], n: u8) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_unstable();
    nearest_rank(&sorted, n)
}

/// Nearest-rank lookup on already sorted readings.
#[allow(clippy::cast_precision_loss)]
pub(super) fn nearest_rank(sorted: &[Value], n: u8) -> f64 {
    let Some(&max) = sorted.last() else {
        return f64::NAN;
    };

    let index = (usize::from(n) * sorted.len()) / 100;

    sorted.get(index).map_or(max, |&v| v) as f64
}
