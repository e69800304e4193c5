/// Smallest `f64` strictly above every `i64` (`2^63`).
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;
/// `i64::MIN` as an `f64` (`-2^63`), exactly representable.
const I64_LOWER_BOUND: f64 = -9_223_372_036_854_775_808.0;

/// Converts an `i64` to the nearest `f64`.
///
/// Integers beyond `2^53` in magnitude round to the nearest representable
/// float, as in mixed integer/float arithmetic.
///
/// ## Example
/// ```
/// use kestrel::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// assert_eq!(i64_to_f64(9_007_199_254_740_993), 9_007_199_254_740_992.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Truncates an `f64` toward zero and converts it to an `i64`.
///
/// ## Errors
/// Returns `Err(error)` if the value is NaN, infinite, or its integer part
/// lies outside the `i64` range.
///
/// ## Parameters
/// - `value`: The float to convert.
/// - `error`: The error to return if the conversion is impossible.
///
/// ## Example
/// ```
/// use kestrel::util::num::f64_to_i64_truncated;
///
/// assert_eq!(f64_to_i64_truncated(3.9, "bad"), Ok(3));
/// assert_eq!(f64_to_i64_truncated(-3.9, "bad"), Ok(-3));
/// assert_eq!(f64_to_i64_truncated(f64::NAN, "bad"), Err("bad"));
/// assert_eq!(f64_to_i64_truncated(1e19, "bad"), Err("bad"));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_truncated<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() {
        return Err(error);
    }

    let truncated = value.trunc();
    if !(I64_LOWER_BOUND..I64_UPPER_BOUND).contains(&truncated) {
        return Err(error);
    }

    Ok(truncated as i64)
}

/// Formats a float so it always reads back as a float.
///
/// Finite values without a fractional part get a trailing `.0`; `3.5` stays
/// `3.5`. Infinities and NaN use Rust's spelling.
///
/// ## Example
/// ```
/// use kestrel::util::num::format_float;
///
/// assert_eq!(format_float(3.0), "3.0");
/// assert_eq!(format_float(-0.25), "-0.25");
/// assert_eq!(format_float(1e20), "100000000000000000000.0");
/// assert_eq!(format_float(f64::INFINITY), "inf");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_i64_bounds() {
        assert_eq!(f64_to_i64_truncated(-9_223_372_036_854_775_808.0, ()), Ok(i64::MIN));
        assert_eq!(f64_to_i64_truncated(9_223_372_036_854_775_808.0, ()), Err(()));
        assert_eq!(f64_to_i64_truncated(f64::NEG_INFINITY, ()), Err(()));
        assert_eq!(f64_to_i64_truncated(-0.5, ()), Ok(0));
    }

    #[test]
    fn floats_keep_a_fraction_digit() {
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-2.0), "-2.0");
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_float(f64::NAN), "NaN");
    }
}
