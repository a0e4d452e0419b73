//! Generic XML tree with namespace prefixes removed.
//!
//! S3 responses from different vendors disagree on namespaces, wrapping and
//! whether a one-element collection is repeated or not. Parsing into this
//! tree first and reading collections through [`as_sequence`] gives the
//! extractors a single shape to work with:
//!
//! - an element with neither attributes nor children collapses to
//!   [`XmlValue::Text`],
//! - a child name seen more than once becomes [`XmlValue::List`],
//! - `xmlns` attributes are dropped and prefixed names keep their local part.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::XmlError;

/// A parsed XML value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlValue {
    /// A leaf element's text.
    Text(String),
    /// An element with attributes or children.
    Node(XmlElement),
    /// Repeated sibling elements with the same name, in document order.
    List(Vec<XmlValue>),
}

/// An element with attributes or children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Attributes without namespace declarations.
    pub attributes: BTreeMap<String, String>,
    /// Text content; whitespace between child elements is dropped.
    pub text: String,
    /// Children keyed by local name.
    pub children: BTreeMap<String, XmlValue>,
}

impl XmlElement {
    fn insert(&mut self, name: String, value: XmlValue) {
        match self.children.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if let XmlValue::List(items) = existing {
                    items.push(value);
                } else {
                    let first = std::mem::replace(existing, XmlValue::List(Vec::new()));
                    *existing = XmlValue::List(vec![first, value]);
                }
            }
        }
    }

    fn into_value(mut self) -> XmlValue {
        if self.attributes.is_empty() && self.children.is_empty() {
            return XmlValue::Text(self.text);
        }
        if !self.children.is_empty() && self.text.trim().is_empty() {
            self.text.clear();
        }
        XmlValue::Node(self)
    }
}

impl XmlValue {
    /// Text of a leaf, or of the first element of a list. Empty otherwise.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Node(element) => &element.text,
            Self::List(items) => items.first().map_or("", Self::text),
        }
    }

    /// Direct child by local name. A list answers for its first element.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&XmlValue> {
        match self {
            Self::Text(_) => None,
            Self::Node(element) => element.children.get(name),
            Self::List(items) => items.first().and_then(|item| item.get(name)),
        }
    }

    /// Text of a direct child.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.get(name).map(Self::text)
    }

    /// Depth-first search for the first descendant with this name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&XmlValue> {
        match self {
            Self::Text(_) => None,
            Self::Node(element) => element
                .children
                .get(name)
                .or_else(|| element.children.values().find_map(|child| child.find(name))),
            Self::List(items) => items.iter().find_map(|item| item.find(name)),
        }
    }

    /// Attribute value, when this is an element carrying it.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::Node(element) => element.attributes.get(name).map(String::as_str),
            _ => None,
        }
    }
}

/// Turn an absent, single or repeated value into a sequence.
///
/// This is the only place the 0/1/N collapse is undone.
#[must_use]
pub fn as_sequence(value: Option<&XmlValue>) -> Vec<&XmlValue> {
    match value {
        None => Vec::new(),
        Some(XmlValue::List(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// A parsed document: the root element's local name and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// Local name of the root element.
    pub root: String,
    /// Value of the root element.
    pub value: XmlValue,
}

impl XmlDocument {
    /// The payload of a response whose expected root is `wrapper`.
    ///
    /// Accepts the wrapper as the root itself, the wrapper one level below
    /// the root, or an unwrapped document whose root already holds the
    /// payload fields.
    #[must_use]
    pub fn body(&self, wrapper: &str) -> &XmlValue {
        if self.root == wrapper {
            return &self.value;
        }
        self.value.get(wrapper).unwrap_or(&self.value)
    }
}

/// Parse an XML document into an [`XmlDocument`].
///
/// # Errors
///
/// Returns [`XmlError`] for malformed input, mismatched tags, truncated
/// documents and documents without a root element.
pub fn parse(xml: &[u8]) -> Result<XmlDocument, XmlError> {
    let mut reader = Reader::from_reader(xml);
    let mut stack: Vec<(String, XmlElement)> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(open(&e)?),
            Event::Empty(e) => {
                let (name, element) = open(&e)?;
                if let Some(document) = close(&mut stack, name, element) {
                    return Ok(document);
                }
            }
            Event::End(_) => {
                let (name, element) = stack.pop().ok_or_else(|| {
                    XmlError::Unbalanced("closing tag without opening tag".to_owned())
                })?;
                if let Some(document) = close(&mut stack, name, element) {
                    return Ok(document);
                }
            }
            Event::Text(e) => {
                if let Some((_, element)) = stack.last_mut() {
                    let decoded = e
                        .decode()
                        .map_err(|err| XmlError::InvalidText(err.to_string()))?;
                    let unescaped = quick_xml::escape::unescape(&decoded)
                        .map_err(|err| XmlError::InvalidText(err.to_string()))?;
                    element.text.push_str(&unescaped);
                }
            }
            Event::GeneralRef(e) => {
                if let Some((_, element)) = stack.last_mut() {
                    let reference = format!("&{};", String::from_utf8_lossy(&e));
                    let resolved = quick_xml::escape::unescape(&reference)
                        .map_err(|err| XmlError::InvalidText(err.to_string()))?;
                    element.text.push_str(&resolved);
                }
            }
            Event::CData(e) => {
                if let Some((_, element)) = stack.last_mut() {
                    element.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => {
                return Err(if stack.is_empty() {
                    XmlError::MissingElement("root element".to_owned())
                } else {
                    XmlError::Unbalanced("unexpected EOF inside element".to_owned())
                });
            }
            _ => {}
        }
    }
}

fn open(start: &BytesStart<'_>) -> Result<(String, XmlElement), XmlError> {
    let name = local_name(start.local_name().as_ref())?;
    let mut element = XmlElement::default();
    for attr in start.attributes() {
        let attr = attr?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let raw = String::from_utf8_lossy(&attr.value);
        let value = quick_xml::escape::unescape(&raw)
            .map_err(|err| XmlError::InvalidText(err.to_string()))?;
        element
            .attributes
            .insert(local_name(attr.key.local_name().as_ref())?, value.into_owned());
    }
    Ok((name, element))
}

fn close(
    stack: &mut [(String, XmlElement)],
    name: String,
    element: XmlElement,
) -> Option<XmlDocument> {
    let value = element.into_value();
    match stack.last_mut() {
        Some((_, parent)) => {
            parent.insert(name, value);
            None
        }
        None => Some(XmlDocument { root: name, value }),
    }
}

fn local_name(raw: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|e| XmlError::InvalidText(e.to_string()))
}
