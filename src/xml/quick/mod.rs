//! Quick-xml helper utilities.
//!
//! Thin wrappers around quick-xml's low-level reader and writer APIs used by
//! the declaration loader and the document writer.

pub mod de;
pub mod ser;

pub use de::{Attrs, read_text_content, skip_element};
pub use ser::{AttrList, XmlEmitter};
