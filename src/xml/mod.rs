//! XML input and output.
//!
//! - [`load`] reads `<model_units>` declaration blocks into a module.
//! - [`document`] writes canonical unit definitions to an output document.
//! - [`quick`] holds the quick-xml reader and writer helpers both share.

pub mod document;
pub mod errors;
pub mod load;
pub mod quick;

pub use document::{ModelDocument, UnitDefinitionRecord, UnitRecord};
pub use errors::{DeserializeError, SerializeError};
pub use load::{ModelUnits, UnitDeclaration, read_model_units};
