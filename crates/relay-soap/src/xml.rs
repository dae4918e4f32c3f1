//! A minimal XML element tree and an escaping writer.
//!
//! Decoding parses the whole document into [`XmlElement`]s and callers then
//! walk it by local tag name. Namespace prefixes are dropped on parse, so
//! `<tns:user_id>` and `<user_id>` are the same element to a reader.

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Result, SoapError};

/// Deepest element nesting [`parse`] accepts. A SOAP user envelope needs
/// five levels.
pub const MAX_DEPTH: usize = 64;

/// An element with its local name, concatenated text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Local name, without namespace prefix.
    pub name: String,
    /// Unescaped character data directly inside this element.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn named(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// First direct child with this local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first direct child with this local name.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    /// Follow a path of direct-child names.
    #[must_use]
    pub fn path(&self, names: &[&str]) -> Option<&XmlElement> {
        names.iter().try_fold(self, |el, name| el.child(name))
    }

    /// First element child, ignoring its name.
    #[must_use]
    pub fn first_child(&self) -> Option<&XmlElement> {
        self.children.first()
    }

    /// All descendants (excluding `self`) in document order.
    #[must_use]
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        let mut pending: Vec<&XmlElement> = self.children.iter().rev().collect();
        while let Some(el) = pending.pop() {
            out.push(el);
            pending.extend(el.children.iter().rev());
        }
        out
    }

    /// Descendants with this local name, in document order.
    #[must_use]
    pub fn descendants_named(&self, name: &str) -> Vec<&XmlElement> {
        self.descendants()
            .into_iter()
            .filter(|el| el.name == name)
            .collect()
    }
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

/// Parse a document into its root element.
///
/// # Errors
///
/// Returns `SoapError::Xml` if the document is not well-formed, is empty,
/// nests deeper than [`MAX_DEPTH`], or has content outside a single root
/// element.
pub fn parse(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            SoapError::Xml(format!("at byte {}: {e}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(SoapError::Xml("content after root element".into()));
                }
                if stack.len() >= MAX_DEPTH {
                    return Err(SoapError::Xml("nesting too deep".into()));
                }
                stack.push(XmlElement::named(local_name(&start)));
            }
            Event::Empty(start) => {
                let element = XmlElement::named(local_name(&start));
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| SoapError::Xml("unbalanced end tag".into()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| SoapError::Xml(format!("bad character data: {e}")))?;
                match stack.last_mut() {
                    Some(top) => top.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(SoapError::Xml("text outside root element".into())),
                }
            }
            Event::CData(data) => {
                let data = data.into_inner();
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(SoapError::Xml("unexpected end of document".into()));
    }
    root.ok_or_else(|| SoapError::Xml("empty document".into()))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(SoapError::Xml("multiple root elements".into()))
    }
}

/// Builds a document event by event, escaping every text value.
pub struct XmlWriter {
    writer: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Start a document with an XML declaration.
    ///
    /// # Errors
    ///
    /// Returns `SoapError::Xml` if the declaration cannot be written.
    pub fn new() -> Result<Self> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(write_error)?;
        Ok(Self { writer })
    }

    /// Open an element with attributes.
    ///
    /// # Errors
    ///
    /// Returns `SoapError::Xml` on write failure.
    pub fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<&mut Self> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer
            .write_event(Event::Start(start))
            .map_err(write_error)?;
        Ok(self)
    }

    /// Close an element.
    ///
    /// # Errors
    ///
    /// Returns `SoapError::Xml` on write failure.
    pub fn end(&mut self, name: &str) -> Result<&mut Self> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(write_error)?;
        Ok(self)
    }

    /// Write a self-closing element.
    ///
    /// # Errors
    ///
    /// Returns `SoapError::Xml` on write failure.
    pub fn empty(&mut self, name: &str) -> Result<&mut Self> {
        self.writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(write_error)?;
        Ok(self)
    }

    /// Write `<name>value</name>` with `value` escaped.
    ///
    /// # Errors
    ///
    /// Returns `SoapError::Xml` on write failure.
    pub fn text_element(&mut self, name: &str, value: &str) -> Result<&mut Self> {
        self.start(name, &[])?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(escape(value))))
            .map_err(write_error)?;
        self.end(name)
    }

    /// Finish and return the document.
    ///
    /// # Errors
    ///
    /// Returns `SoapError::Xml` if the output is not UTF-8.
    pub fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| SoapError::Xml(format!("non UTF-8 output: {e}")))
    }
}

fn write_error(err: impl std::fmt::Display) -> SoapError {
    SoapError::Xml(format!("write failed: {err}"))
}
