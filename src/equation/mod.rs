//! Formula trees for unit definitions and the parser that produces them.

pub mod expression;
pub mod parse;

pub use expression::{UnitExpr, operator::Operator};
pub use parse::{FormulaError, parse_formula};
