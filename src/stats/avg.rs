use crate::Value;

/// Calculates the arithmetic mean of some readings.
///
/// Sums into a 128-bit accumulator, so large buckets cannot overflow.
///
/// Returns `NaN` if there are no readings.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average(data: &[Value]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }

    let sum = data.iter().map(|&v| i128::from(v)).sum::<i128>();

    sum as f64 / data.len() as f64
}
