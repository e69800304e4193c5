/// Numeric conversion helpers.
///
/// This module converts between `i64` and `f64` the way the language defines
/// it: integer promotion rounds to the nearest float, float-to-integer
/// conversion truncates toward zero and refuses values outside the `i64`
/// range, and floats are printed with at least one fractional digit.
pub mod num;
