//! XML event source.
//!
//! The state machine only sees the callbacks of [`EventHandler`]; this module
//! turns a `quick-xml` reader into that callback sequence. Namespaces are not
//! resolved: prefixes are stripped and local names reported as-is.

use crate::error::ImportError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;
use std::str;
use tracing::trace;

/// Attribute lookup by name on an element start.
pub trait Attributes {
    fn value(&self, name: &str) -> Option<&str>;
}

/// Callbacks driven by an XML event source.
pub trait EventHandler {
    fn start_element(&mut self, name: &str, attributes: &dyn Attributes)
        -> Result<(), ImportError>;
    fn end_element(&mut self, name: &str) -> Result<(), ImportError>;
    fn characters(&mut self, text: &str) -> Result<(), ImportError>;
    fn end_document(&mut self) -> Result<(), ImportError>;
}

/// Owned attribute list of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    pairs: Vec<(String, String)>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn from_element(element: &BytesStart<'_>) -> Result<Self, ImportError> {
        let mut pairs = Vec::new();
        for attr in element.attributes() {
            let attr = attr?;
            let key = str::from_utf8(attr.key.local_name().as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            pairs.push((key, value));
        }
        Ok(Self { pairs })
    }
}

impl Attributes for AttributeList {
    fn value(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Drives an [`EventHandler`] from an XML byte stream.
pub struct XmlEventSource<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> XmlEventSource<R> {
    pub fn new(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().check_end_names = true;
        Self {
            reader,
            buf: Vec::with_capacity(4096),
        }
    }

    /// Feed the whole document to `handler`.
    ///
    /// `end_document` is only called when the input reaches a clean end. Any
    /// error from the reader or the handler stops the run and is returned.
    pub fn drive<H: EventHandler + ?Sized>(mut self, handler: &mut H) -> Result<(), ImportError> {
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(ref element) => {
                    let name = element_name(element)?;
                    let attributes = AttributeList::from_element(element)?;
                    handler.start_element(&name, &attributes)?;
                }
                Event::Empty(ref element) => {
                    let name = element_name(element)?;
                    let attributes = AttributeList::from_element(element)?;
                    handler.start_element(&name, &attributes)?;
                    handler.end_element(&name)?;
                }
                Event::End(ref element) => {
                    let name = str::from_utf8(element.local_name().as_ref())?.to_string();
                    handler.end_element(&name)?;
                }
                Event::Text(ref text) => {
                    let text = text.unescape()?;
                    handler.characters(&text)?;
                }
                Event::CData(ref data) => {
                    let text = str::from_utf8(data.as_ref())?;
                    handler.characters(text)?;
                }
                Event::Eof => {
                    trace!(
                        position = self.reader.buffer_position(),
                        "Reached end of XML input"
                    );
                    return handler.end_document();
                }
                _ => {}
            }
        }
    }
}

fn element_name(element: &BytesStart<'_>) -> Result<String, ImportError> {
    Ok(str::from_utf8(element.local_name().as_ref())?.to_string())
}
