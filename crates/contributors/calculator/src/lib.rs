//! Arithmetic contributor for everywhere.
//!
//! Queries that evaluate to a number produce a single result holding the
//! value. Selecting it copies the value instead of navigating.

mod contributor;
mod evaluate;

pub use contributor::{CALCULATOR, CalculationElement, CalculatorContributor, CalculatorFactory};
pub use evaluate::{EvaluationError, evaluate, expand_radix_literals, format_number};
