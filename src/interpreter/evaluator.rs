/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions, including
/// arithmetic, bitwise operations, comparisons and short-circuit logic.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation, logical not, bitwise complement and the casts.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the [`core::Evaluator`], its `Visitor` implementation, the
/// control-flow signal and the public [`core::evaluate`] entry point.
pub mod core;

/// Blocks and conditionals.
pub mod block;

/// Evaluation of `while` and `for` loops.
///
/// Manages the loop variable, the inclusive range and the step budget.
pub mod for_loop;

/// Function evaluation.
///
/// Handles definitions, calls with their own frame, argument checking and
/// `return`.
pub mod function;

/// Utility functions for evaluation.
///
/// Provides helpers shared by the other evaluation modules.
pub mod utils;
