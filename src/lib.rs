//! Unit definitions for model descriptions.
//!
//! Units are declared per module, either from formula text such as
//! `mole / litre` or as aliases of other units. Declared units can be combined
//! algebraically, expanded into a fixed vocabulary of elementary kinds,
//! compared for equivalence, and written to an output document.
//!
//! ```rust
//! use unitdef::{Registry, UnitContext};
//!
//! let mut registry = Registry::new();
//! let module = registry.main_module_mut();
//! module.define_unit("speed", "meter / second").unwrap();
//! module.define_unit("acceleration", "speed / second").unwrap();
//!
//! let canonical = registry.canonical_unit("__main", "acceleration").unwrap();
//! assert_eq!(canonical.to_string(), "meter / second^2");
//! assert_eq!(registry.name_delimiter(), "_");
//! ```

pub mod config;
pub mod equation;
pub mod registry;
pub mod units;
pub mod utils;
pub mod xml;

#[cfg(test)]
mod test_utils;

pub use crate::config::EngineConfig;
pub use crate::equation::{UnitExpr, parse_formula};
pub use crate::registry::{Module, Registry, UnitContext, Variable};
pub use crate::units::{BaseUnit, UnitDef, UnitElement, UnitError};
pub use crate::xml::{ModelDocument, ModelUnits};
