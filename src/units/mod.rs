//! Unit definitions and their algebra.
//!
//! A [`UnitDef`] is a product of [`UnitElement`]s, each a power of a named
//! kind with an optional multiplier and power-of-ten scale. Definitions can be
//! combined algebraically, built from formula text, expanded into the
//! elementary vocabulary of [`BaseUnit`] kinds, and compared for equivalence.

pub mod canonical;
pub mod def;
pub mod element;
pub mod equivalence;
pub mod error;
pub mod formula;
pub mod kind;

pub use def::{AUTO_NAME_DELIMITER, UnitDef};
pub use element::UnitElement;
pub use error::UnitError;
pub use kind::{BaseUnit, UnknownBaseUnit};
