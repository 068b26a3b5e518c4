//! Small owned tree for vector-markup fragments.
//!
//! Fragments are parsed with `quick-xml` into [`MarkupElement`] nodes, mutated
//! in place and serialized back. Attribute order and text content are
//! preserved; declarations, doctypes and processing instructions outside the
//! root element are dropped.

use anyhow::{Context, Result};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// A node inside an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    /// Child element
    Element(MarkupElement),
    /// Text content (unescaped)
    Text(String),
    /// CDATA section
    CData(String),
    /// Comment
    Comment(String),
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<MarkupNode>,
}

impl MarkupElement {
    /// Creates an element with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Qualified tag name as written (e.g., `svg:g`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag name without namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    /// Case-insensitive local tag name comparison.
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.local_name().eq_ignore_ascii_case(tag)
    }

    /// Gets an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, keeping its position when it already exists.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Iterates attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Child nodes.
    #[must_use]
    pub fn children(&self) -> &[MarkupNode] {
        &self.children
    }

    /// Appends a child node.
    pub fn add_child(&mut self, child: MarkupNode) {
        self.children.push(child);
    }

    /// Appends a child element.
    pub fn add_child_element(&mut self, element: Self) {
        self.children.push(MarkupNode::Element(element));
    }

    /// Child elements only (no text, comments or CDATA).
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            MarkupNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First element in document order, this one included, matching the predicate.
    pub fn find(&self, predicate: impl Fn(&Self) -> bool) -> Option<&Self> {
        self.find_dyn(&predicate, true)
    }

    /// First descendant in document order, this one excluded, matching the predicate.
    pub fn find_descendant(&self, predicate: impl Fn(&Self) -> bool) -> Option<&Self> {
        self.find_dyn(&predicate, false)
    }

    fn find_dyn(&self, predicate: &dyn Fn(&Self) -> bool, include_self: bool) -> Option<&Self> {
        if include_self && predicate(self) {
            return Some(self);
        }
        self.child_elements()
            .find_map(|child| child.find_dyn(predicate, true))
    }

    /// Visits this element and every descendant element in document order.
    pub fn walk_mut(&mut self, mut visit: impl FnMut(&mut Self)) {
        self.walk_mut_dyn(&mut visit);
    }

    fn walk_mut_dyn(&mut self, visit: &mut dyn FnMut(&mut Self)) {
        visit(self);
        for child in &mut self.children {
            if let MarkupNode::Element(element) = child {
                element.walk_mut_dyn(visit);
            }
        }
    }

    /// Serializes the element and its subtree.
    pub fn to_markup(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner()).context("Serialized markup is not UTF-8")
    }

    /// Serializes only the child elements, concatenated.
    pub fn inner_element_markup(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        for child in self.child_elements() {
            child.write_to(&mut writer)?;
        }
        String::from_utf8(writer.into_inner()).context("Serialized markup is not UTF-8")
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;
            for child in &self.children {
                child.write_to(writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        }

        Ok(())
    }
}

impl MarkupNode {
    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        match self {
            Self::Element(element) => element.write_to(writer)?,
            Self::Text(text) => {
                writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
            }
            Self::CData(content) => {
                writer.write_event(Event::CData(BytesCData::new(content.as_str())))?;
            }
            Self::Comment(comment) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?;
            }
        }
        Ok(())
    }
}

/// Parses a fragment with exactly one root element.
///
/// # Errors
///
/// Fails on malformed markup, mismatched or unclosed tags, more than one root
/// element, or text outside the root.
pub fn parse_fragment(input: &str) -> Result<MarkupElement> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<MarkupElement> = Vec::new();
    let mut root: Option<MarkupElement> = None;

    loop {
        let event = reader
            .read_event()
            .with_context(|| format!("Malformed markup at byte {}", reader.buffer_position()))?;

        match event {
            Event::Eof => break,
            Event::Start(start) => {
                let element = element_from_start(&start)?;
                stack.push(element);
            }
            Event::Empty(empty) => {
                let element = element_from_start(&empty)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .context("Closing tag without matching opening tag")?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let content = text.unescape().context("Invalid text content")?;
                if let Some(parent) = stack.last_mut() {
                    parent.add_child(MarkupNode::Text(content.into_owned()));
                } else if !content.trim().is_empty() {
                    anyhow::bail!("Text outside of the root element");
                }
            }
            Event::CData(cdata) => {
                if let Some(parent) = stack.last_mut() {
                    let content = String::from_utf8_lossy(&cdata).into_owned();
                    parent.add_child(MarkupNode::CData(content));
                }
            }
            Event::Comment(comment) => {
                if let Some(parent) = stack.last_mut() {
                    let content = String::from_utf8_lossy(&comment).into_owned();
                    parent.add_child(MarkupNode::Comment(content));
                }
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if let Some(open) = stack.last() {
        anyhow::bail!("Unclosed element <{}>", open.name());
    }

    root.context("Markup contains no element")
}

fn element_from_start(start: &BytesStart<'_>) -> Result<MarkupElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = MarkupElement::new(name);

    for attr in start.attributes() {
        let attr = attr.with_context(|| format!("Invalid attribute on <{}>", element.name()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .with_context(|| format!("Invalid value for attribute '{key}'"))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(
    stack: &mut [MarkupElement],
    root: &mut Option<MarkupElement>,
    element: MarkupElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.add_child_element(element);
    } else if root.is_some() {
        anyhow::bail!("Markup has more than one root element");
    } else {
        *root = Some(element);
    }
    Ok(())
}
