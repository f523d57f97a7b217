//! Serialization helpers for quick-xml.
//!
//! Provides:
//! - `AttrList`: attribute builder that owns formatted values
//! - `XmlEmitter`: convenient element writing helpers

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::utils::format_number;
use crate::xml::SerializeError;

/// A list of attributes with owned values.
///
/// This avoids the lifetime issues with quick-xml's `ElementWriter::with_attribute`
/// by owning all formatted string values until the element is written.
#[derive(Debug, Default)]
pub struct AttrList {
    attrs: Vec<(String, String)>,
}

impl AttrList {
    pub fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    /// Add a required string attribute.
    pub fn add(&mut self, key: &str, value: impl AsRef<str>) -> &mut Self {
        self.attrs
            .push((key.to_string(), value.as_ref().to_string()));
        self
    }

    /// Add a numeric attribute, without a decimal point for whole numbers.
    pub fn add_f64(&mut self, key: &str, value: f64) -> &mut Self {
        self.attrs.push((key.to_string(), format_number(value)));
        self
    }

    pub fn add_i32(&mut self, key: &str, value: i32) -> &mut Self {
        self.attrs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Apply all attributes to a BytesStart element.
    pub fn apply_to(&self, start: &mut BytesStart<'_>) {
        for (key, value) in &self.attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
    }
}

/// A helper for writing XML elements with less boilerplate.
pub struct XmlEmitter<'a, W: Write> {
    writer: &'a mut Writer<W>,
}

impl<'a, W: Write> XmlEmitter<'a, W> {
    pub fn new(writer: &'a mut Writer<W>) -> Self {
        Self { writer }
    }

    /// Write an XML declaration.
    pub fn xml_decl(&mut self) -> Result<(), SerializeError> {
        let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
        self.writer.write_event(Event::Decl(decl))?;
        Ok(())
    }

    /// Write a start tag with attributes: `<name attr="value">`.
    pub fn start_elem(&mut self, name: &str, attrs: &AttrList) -> Result<(), SerializeError> {
        let mut start = BytesStart::new(name);
        attrs.apply_to(&mut start);
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    /// Write a start tag without attributes.
    pub fn open(&mut self, name: &str) -> Result<(), SerializeError> {
        self.start_elem(name, &AttrList::new())
    }

    /// Write an end tag.
    pub fn end_elem(&mut self, name: &str) -> Result<(), SerializeError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write an empty element with attributes: `<name attr="value"/>`.
    pub fn empty_elem_with_attrs(
        &mut self,
        name: &str,
        attrs: &AttrList,
    ) -> Result<(), SerializeError> {
        let mut start = BytesStart::new(name);
        attrs.apply_to(&mut start);
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }
}
