//! Engine configuration.
//!
//! The configuration can be embedded in a larger XML file as a single element
//! whose attributes override the defaults:
//!
//! ```xml
//! <unitdef name_delimiter="." default_module="main"/>
//! ```

use serde::{Deserialize, Serialize};

use crate::xml::DeserializeError;

pub const DEFAULT_NAME_DELIMITER: &str = "_";
pub const DEFAULT_MODULE: &str = "__main";

fn default_name_delimiter() -> String {
    DEFAULT_NAME_DELIMITER.to_string()
}

fn default_module() -> String {
    DEFAULT_MODULE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Joins the segments of qualified names into document ids.
    #[serde(rename = "@name_delimiter", default = "default_name_delimiter")]
    pub name_delimiter: String,
    /// The module created up front and used when none is named.
    #[serde(rename = "@default_module", default = "default_module")]
    pub default_module: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            name_delimiter: default_name_delimiter(),
            default_module: default_module(),
        }
    }
}

impl EngineConfig {
    pub fn from_xml(xml: &str) -> Result<Self, DeserializeError> {
        let config: EngineConfig = quick_xml::de::from_str(xml)?;
        if config.default_module.is_empty() {
            return Err(DeserializeError::Custom(
                "default_module must not be empty".to_string(),
            ));
        }
        Ok(config)
    }
}
