//! Deserialization helpers for quick-xml.
//!
//! Provides:
//! - `Attrs`: typed attribute map with convenient getters
//! - `read_text_content`: collects the text of the current element
//! - `skip_element`: robust subtree skipping for unknown elements

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::xml::DeserializeError;

/// A parsed attribute map that owns decoded string values.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    map: HashMap<String, String>,
    /// The element name for error messages
    element_name: String,
}

impl Attrs {
    /// Parse attributes from a `BytesStart` event.
    pub fn from_start<R: BufRead>(
        start: &BytesStart<'_>,
        reader: &Reader<R>,
    ) -> Result<Self, DeserializeError> {
        let element_name = String::from_utf8_lossy(start.name().as_ref()).to_string();
        let mut map = HashMap::new();

        for attr_result in start.attributes() {
            let attr = attr_result?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.decode_and_unescape_value(reader)?.to_string();
            map.insert(key, value);
        }

        Ok(Self { map, element_name })
    }

    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    /// Get a required string attribute, returning an error if missing.
    pub fn get_req(&self, key: &str) -> Result<&str, DeserializeError> {
        self.map
            .get(key)
            .map(|s| s.as_str())
            .ok_or_else(|| DeserializeError::MissingField(format!("{}@{}", self.element_name, key)))
    }

    /// Get an optional bool attribute.
    ///
    /// Recognizes "true"/"false" (case-insensitive).
    pub fn get_opt_bool(&self, key: &str) -> Result<Option<bool>, DeserializeError> {
        match self.map.get(key) {
            Some(s) => match s.to_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(Some(true)),
                "false" | "0" | "no" => Ok(Some(false)),
                _ => Err(DeserializeError::Custom(format!(
                    "Invalid boolean for {}@{}: '{}' (expected true/false)",
                    self.element_name, key, s
                ))),
            },
            None => Ok(None),
        }
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, DeserializeError> {
        Ok(self.get_opt_bool(key)?.unwrap_or(default))
    }
}

/// Read the text of the element whose `Start` event was just consumed, up to
/// and including its `End` event.
pub fn read_text_content<R: BufRead>(
    reader: &mut Reader<R>,
    buf: &mut Vec<u8>,
) -> Result<String, DeserializeError> {
    let mut text = String::new();

    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Text(e) => {
                text.push_str(&e.unescape()?);
            }
            Event::CData(e) => {
                text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Event::End(_) => break,
            Event::Eof => return Err(DeserializeError::UnexpectedEof),
            _ => {}
        }
    }

    Ok(text.trim().to_string())
}

/// Skip an entire element subtree, consuming all nested content until the
/// matching end tag. Call this right after consuming the element's `Start`
/// event.
pub fn skip_element<R: BufRead>(
    reader: &mut Reader<R>,
    buf: &mut Vec<u8>,
    tag_name: &[u8],
) -> Result<(), DeserializeError> {
    let mut depth = 1u32;

    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                depth -= 1;
                if depth == 0 && e.name().as_ref() == tag_name {
                    break;
                }
            }
            Event::Eof => return Err(DeserializeError::UnexpectedEof),
            _ => {}
        }
    }

    Ok(())
}
