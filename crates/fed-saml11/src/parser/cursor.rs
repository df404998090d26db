//! Event cursor over the XML tokenizer.
//!
//! Wraps a `quick_xml` namespace-aware reader and hands the element parsers
//! owned, namespace-resolved events. The cursor tracks the namespace
//! declarations of every open element and owns the read buffer, so every
//! parse call has its own independent state.

use std::collections::BTreeSet;
use std::io::BufRead;

use quick_xml::escape::escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use quick_xml::writer::Writer;

use crate::config::{ParserConfig, UnknownElementPolicy};
use crate::error::{ParseError, ParseResult};
use crate::types::{AttributeValue, XmlFragment, SAML1_ASSERTION_NS, XMLDSIG_NS};

/// An attribute on a start tag.
#[derive(Debug, Clone)]
struct XmlAttribute {
    namespace: Option<String>,
    local_name: String,
    qname: String,
    value: String,
    declaration: bool,
}

/// An element start tag with resolved names and unescaped attributes.
#[derive(Debug, Clone)]
pub(crate) struct StartElement {
    pub namespace: Option<String>,
    pub local_name: String,
    pub qname: String,
    pub position: u64,
    attributes: Vec<XmlAttribute>,
}

impl StartElement {
    /// Returns whether this is `local` in the SAML 1.x assertion namespace.
    pub fn is_saml(&self, local: &str) -> bool {
        self.is(SAML1_ASSERTION_NS, local)
    }

    /// Returns whether this is `local` in the XML-DSig namespace.
    pub fn is_dsig(&self, local: &str) -> bool {
        self.is(XMLDSIG_NS, local)
    }

    /// Returns whether this element is in the SAML 1.x assertion namespace.
    pub fn is_saml_namespace(&self) -> bool {
        self.namespace.as_deref() == Some(SAML1_ASSERTION_NS)
    }

    fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name == local
    }

    /// Returns the raw value of an unqualified attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| !a.declaration && a.namespace.is_none() && a.local_name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns a trimmed, non-empty unqualified attribute value.
    pub fn optional_attr(&self, name: &str) -> Option<String> {
        self.attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Returns a trimmed attribute value, failing if it is absent or blank.
    pub fn required_attr(&self, name: &str) -> ParseResult<String> {
        self.optional_attr(name)
            .ok_or_else(|| self.missing_attr(name))
    }

    pub fn missing_attr(&self, name: &str) -> ParseError {
        ParseError::MissingRequiredAttribute {
            attribute: name.to_string(),
            element: self.local_name.clone(),
            position: self.position,
        }
    }

    pub fn invalid_attr(&self, name: &str, value: &str) -> ParseError {
        ParseError::InvalidAttributeValue {
            attribute: name.to_string(),
            element: self.local_name.clone(),
            value: value.to_string(),
            position: self.position,
        }
    }

    pub fn unsupported(&self) -> ParseError {
        ParseError::UnsupportedElement {
            name: self.local_name.clone(),
            position: self.position,
        }
    }

    pub fn duplicate_in(&self, parent: &StartElement) -> ParseError {
        ParseError::DuplicateElement {
            element: self.local_name.clone(),
            parent: parent.local_name.clone(),
            position: self.position,
        }
    }

    pub fn out_of_order_in(&self, parent: &StartElement) -> ParseError {
        ParseError::OutOfOrderElement {
            element: self.local_name.clone(),
            parent: parent.local_name.clone(),
            position: self.position,
        }
    }

    /// Namespace declarations on this tag as `(prefix, uri)` pairs; the
    /// default namespace has the empty prefix.
    fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter(|a| a.declaration)
            .map(|a| (a.qname.strip_prefix("xmlns:").unwrap_or(""), a.value.as_str()))
    }

    fn declares(&self, prefix: &str) -> bool {
        self.declarations().any(|(declared, _)| declared == prefix)
    }

    /// Adds the prefixes this tag's element and attribute names rely on.
    fn collect_prefixes(&self, prefixes: &mut BTreeSet<String>) {
        prefixes.insert(prefix_of(&self.qname).unwrap_or("").to_string());
        for attr in self.attributes.iter().filter(|a| !a.declaration) {
            if let Some(prefix) = prefix_of(&attr.qname) {
                prefixes.insert(prefix.to_string());
            }
        }
        prefixes.remove("xml");
    }

    fn to_bytes_start(&self) -> BytesStart<'_> {
        let mut start = BytesStart::new(self.qname.as_str());
        for attr in &self.attributes {
            start.push_attribute((attr.qname.as_str(), attr.value.as_str()));
        }
        start
    }
}

/// An owned tokenizer event.
#[derive(Debug)]
pub(crate) enum XmlEvent {
    Start(StartElement),
    End(String),
    Text(String),
    Eof,
}

/// Namespace bindings declared on one open element.
type Scope = Vec<(String, String)>;

/// Per-call parsing state: the reader, its buffer and the scopes of the
/// open elements.
pub(crate) struct EventCursor<R> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    scopes: Vec<Scope>,
    max_depth: usize,
    allow_doctype: bool,
    unknown_elements: UnknownElementPolicy,
}

impl<R: BufRead> EventCursor<R> {
    pub fn new(source: R, config: &ParserConfig) -> Self {
        let mut reader = NsReader::from_reader(source);
        let reader_config = reader.config_mut();
        reader_config.trim_text(false);
        reader_config.expand_empty_elements = true;
        reader_config.check_end_names = true;

        Self {
            reader,
            buf: Vec::new(),
            scopes: Vec::new(),
            max_depth: config.max_depth,
            allow_doctype: config.allow_doctype,
            unknown_elements: config.unknown_elements,
        }
    }

    /// Byte offset of the tokenizer in the input.
    pub fn position(&self) -> u64 {
        self.reader.buffer_position()
    }

    /// Reads the next significant event.
    ///
    /// Declarations, comments and processing instructions are dropped.
    pub fn next_event(&mut self) -> ParseResult<XmlEvent> {
        loop {
            self.buf.clear();
            let position = self.reader.buffer_position();
            let (resolved, event) = match self.reader.read_resolved_event_into(&mut self.buf) {
                Ok(pair) => pair,
                Err(err) => return Err(ParseError::malformed(err.to_string(), position)),
            };
            let namespace = if matches!(event, Event::Start(_)) {
                owned_namespace(resolved, position)?
            } else {
                drop(resolved);
                None
            };

            match event {
                Event::Start(start) => {
                    if self.scopes.len() >= self.max_depth {
                        return Err(ParseError::DepthLimitExceeded {
                            limit: self.max_depth,
                            position,
                        });
                    }
                    let element = build_element(&self.reader, &start, namespace, position)?;
                    self.scopes.push(
                        element
                            .declarations()
                            .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
                            .collect(),
                    );
                    return Ok(XmlEvent::Start(element));
                }
                Event::End(end) => {
                    self.scopes.pop();
                    let qname = decode(end.name().as_ref(), position)?;
                    return Ok(XmlEvent::End(qname));
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| ParseError::malformed(e.to_string(), position))?;
                    if text.is_empty() {
                        continue;
                    }
                    return Ok(XmlEvent::Text(text.into_owned()));
                }
                Event::CData(data) => {
                    let text = String::from_utf8(data.into_inner().into_owned())
                        .map_err(|e| ParseError::malformed(e.to_string(), position))?;
                    return Ok(XmlEvent::Text(text));
                }
                Event::DocType(_) if !self.allow_doctype => {
                    return Err(ParseError::malformed(
                        "document type declarations are not allowed",
                        position,
                    ));
                }
                Event::Empty(_) => {
                    return Err(ParseError::malformed(
                        "unexpanded empty element",
                        position,
                    ));
                }
                Event::Eof => return Ok(XmlEvent::Eof),
                _ => {}
            }
        }
    }

    /// Reads the next child start tag of `parent`.
    ///
    /// Returns `None` once the parent's end tag is consumed. Whitespace
    /// between children is ignored; any other character data in
    /// element-only content is rejected.
    pub fn next_child(&mut self, parent: &StartElement) -> ParseResult<Option<StartElement>> {
        loop {
            match self.next_event()? {
                XmlEvent::Start(child) => return Ok(Some(child)),
                XmlEvent::End(_) => return Ok(None),
                XmlEvent::Text(text) if is_blank(&text) => {}
                XmlEvent::Text(_) => {
                    return Err(ParseError::malformed(
                        format!("unexpected character data in <{}>", parent.qname),
                        self.position(),
                    ))
                }
                XmlEvent::Eof => return Err(self.unexpected_eof(parent)),
            }
        }
    }

    /// Reads the character content of a simple-content element.
    ///
    /// Text, CDATA sections and entity references are joined as written
    /// and the result is trimmed once.
    pub fn read_text(&mut self, element: &StartElement) -> ParseResult<String> {
        let mut text = String::new();
        loop {
            match self.next_event()? {
                XmlEvent::Text(chunk) => text.push_str(&chunk),
                XmlEvent::End(_) => return Ok(text.trim().to_string()),
                XmlEvent::Start(child) => return Err(child.unsupported()),
                XmlEvent::Eof => return Err(self.unexpected_eof(element)),
            }
        }
    }

    /// Consumes an element whose content model is empty.
    ///
    /// Whitespace is tolerated; character data or child elements are not.
    pub fn read_empty(&mut self, element: &StartElement) -> ParseResult<()> {
        match self.next_child(element)? {
            Some(child) => Err(child.unsupported()),
            None => Ok(()),
        }
    }

    /// Reads `xs:anyType` content: plain text, or nested markup kept opaque.
    pub fn read_content(&mut self, element: &StartElement) -> ParseResult<AttributeValue> {
        let mut markup = String::new();
        let mut text = String::new();
        let mut nested = false;
        loop {
            match self.next_event()? {
                XmlEvent::Start(child) => {
                    nested = true;
                    markup.push_str(&self.capture_markup(&child)?);
                }
                XmlEvent::Text(chunk) => {
                    markup.push_str(&escape(chunk.as_str()));
                    text.push_str(&chunk);
                }
                XmlEvent::End(_) => break,
                XmlEvent::Eof => return Err(self.unexpected_eof(element)),
            }
        }

        if nested {
            Ok(AttributeValue::Xml(XmlFragment::new(markup.trim())))
        } else {
            Ok(AttributeValue::Text(text.trim().to_string()))
        }
    }

    /// Captures `element` itself, including its tags, as an opaque fragment.
    pub fn capture_element(&mut self, element: &StartElement) -> ParseResult<XmlFragment> {
        self.capture_markup(element).map(XmlFragment::new)
    }

    /// Consumes `element`'s subtree through its end tag.
    pub fn skip_element(&mut self, element: &StartElement) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            match self.next_event()? {
                XmlEvent::Start(_) => depth += 1,
                XmlEvent::End(_) if depth == 0 => return Ok(()),
                XmlEvent::End(_) => depth -= 1,
                XmlEvent::Text(_) => {}
                XmlEvent::Eof => return Err(self.unexpected_eof(element)),
            }
        }
    }

    /// Applies the unknown-element policy to `element`.
    ///
    /// Under `Reject` returns `error`; under `Skip` consumes the subtree.
    pub fn reject_or_skip(&mut self, element: &StartElement, error: ParseError) -> ParseResult<()> {
        match self.unknown_elements {
            UnknownElementPolicy::Reject => Err(error),
            UnknownElementPolicy::Skip => {
                tracing::warn!(
                    "Skipping unsupported element <{}> at byte {}",
                    element.qname,
                    element.position
                );
                self.skip_element(element)
            }
        }
    }

    /// Error for a required child found missing at the current position.
    pub fn missing_child(&self, element: &str, parent: &StartElement) -> ParseError {
        ParseError::MissingRequiredElement {
            element: element.to_string(),
            parent: parent.local_name.clone(),
            position: self.position(),
        }
    }

    fn unexpected_eof(&self, element: &StartElement) -> ParseError {
        ParseError::malformed(
            format!("unexpected end of input inside <{}>", element.qname),
            self.position(),
        )
    }

    /// Re-serializes `element` and its subtree through the end tag.
    ///
    /// Bindings the subtree uses but inherits from an ancestor are declared
    /// on the fragment root, so the result stands on its own.
    fn capture_markup(&mut self, element: &StartElement) -> ParseResult<String> {
        let mut prefixes = BTreeSet::new();
        element.collect_prefixes(&mut prefixes);

        let mut body = Writer::new(Vec::new());
        let mut depth = 0usize;
        loop {
            match self.next_event()? {
                XmlEvent::Start(child) => {
                    child.collect_prefixes(&mut prefixes);
                    depth += 1;
                    self.write(&mut body, Event::Start(child.to_bytes_start()))?;
                }
                XmlEvent::End(_) if depth == 0 => break,
                XmlEvent::End(name) => {
                    depth -= 1;
                    self.write(&mut body, Event::End(BytesEnd::new(name.as_str())))?;
                }
                XmlEvent::Text(chunk) => {
                    self.write(&mut body, Event::Text(BytesText::new(&chunk)))?;
                }
                XmlEvent::Eof => return Err(self.unexpected_eof(element)),
            }
        }

        // The element's own scope is closed; what remains is inherited.
        let mut start = element.to_bytes_start();
        for prefix in prefixes.iter().filter(|p| !element.declares(p)) {
            if let Some(uri) = self.lookup(prefix) {
                let name = if prefix.is_empty() {
                    "xmlns".to_string()
                } else {
                    format!("xmlns:{prefix}")
                };
                start.push_attribute((name.as_str(), uri));
            }
        }

        let mut writer = Writer::new(Vec::new());
        self.write(&mut writer, Event::Start(start))?;
        writer.get_mut().extend_from_slice(&body.into_inner());
        self.write(&mut writer, Event::End(BytesEnd::new(element.qname.as_str())))?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| ParseError::malformed(e.to_string(), self.position()))
    }

    /// Resolves `prefix` against the open scopes, innermost first.
    fn lookup(&self, prefix: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter())
            .find(|(declared, _)| declared == prefix)
            .map(|(_, uri)| uri.as_str())
            .filter(|uri| !uri.is_empty())
    }

    fn write(&self, writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> ParseResult<()> {
        writer
            .write_event(event)
            .map_err(|e| ParseError::malformed(e.to_string(), self.position()))
    }
}

fn owned_namespace(resolved: ResolveResult<'_>, position: u64) -> ParseResult<Option<String>> {
    match resolved {
        ResolveResult::Bound(Namespace(ns)) => Ok(Some(String::from_utf8_lossy(ns).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ParseError::malformed(
            format!(
                "undeclared namespace prefix {}",
                String::from_utf8_lossy(&prefix)
            ),
            position,
        )),
    }
}

/// Returns whether `text` is whitespace only.
pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

fn prefix_of(qname: &str) -> Option<&str> {
    qname.split_once(':').map(|(prefix, _)| prefix)
}

fn decode(bytes: &[u8], position: u64) -> ParseResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| ParseError::malformed(e.to_string(), position))
}

fn build_element<R>(
    reader: &NsReader<R>,
    start: &BytesStart<'_>,
    namespace: Option<String>,
    position: u64,
) -> ParseResult<StartElement> {
    let qname = decode(start.name().as_ref(), position)?;
    let local_name = decode(start.local_name().as_ref(), position)?;

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ParseError::malformed(e.to_string(), position))?;
        let key = decode(attr.key.as_ref(), position)?;
        let value = attr
            .unescape_value()
            .map_err(|e| ParseError::malformed(e.to_string(), position))?
            .into_owned();

        let declaration = key == "xmlns" || key.starts_with("xmlns:");
        let (attr_namespace, attr_local) = if declaration {
            (None, key.clone())
        } else {
            let (resolved, local) = reader.resolve_attribute(attr.key);
            (
                owned_namespace(resolved, position)?,
                decode(local.as_ref(), position)?,
            )
        };

        attributes.push(XmlAttribute {
            namespace: attr_namespace,
            local_name: attr_local,
            qname: key,
            value,
            declaration,
        });
    }

    Ok(StartElement {
        namespace,
        local_name,
        qname,
        position,
        attributes,
    })
}
