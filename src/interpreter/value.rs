/// The `Value` type and its basic operations.
///
/// Defines the runtime values, their truthiness, type names, display form and
/// conversion from literals.
pub mod core;
/// Explicit conversions behind the `int` and `float` casts.
pub mod cast;
