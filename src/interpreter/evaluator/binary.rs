/// Binary operation dispatch.
///
/// Routes each operator to its handler and implements the evaluation order
/// of the operands.
pub mod core;
/// Integer and float arithmetic: `+`, `-`, `*`, `/` and `%`.
pub mod arithmetic;
/// Exponentiation.
pub mod power;
/// Bitwise operators and shifts.
pub mod bitwise;
/// Equality and ordering.
pub mod comparison;
/// Short-circuit `&&` and `||`.
pub mod logic;
