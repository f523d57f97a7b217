//! Error types for reading and writing XML.

use thiserror::Error;

use crate::units::UnitError;

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("XML serialization error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Serialization error: {0}")]
    Custom(String),
}

#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("XML deserialization error: {0}")]
    De(#[from] quick_xml::DeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid unit declaration: {0}")]
    Unit(#[from] UnitError),
    #[error("Deserialization error: {0}")]
    Custom(String),
    #[error("Unexpected end of XML")]
    UnexpectedEof,
    #[error("Missing required field: {0}")]
    MissingField(String),
}
