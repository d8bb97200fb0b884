//! Inert markup tree produced by the table builder.
//!
//! The builder never serializes markup itself; it assembles a tree of
//! [`Element`] nodes (tag, attributes, class list, children) that an outer
//! rendering pipeline turns into actual output. Attributes are kept in a
//! `BTreeMap` so the tree compares and prints deterministically.

use std::collections::BTreeMap;

/// Ordered, de-duplicating list of class tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create an empty class list.
    pub fn new() -> Self {
        ClassList::default()
    }

    /// Add a class token. Empty and duplicate tokens are ignored.
    /// Whitespace-separated input is split into individual tokens.
    pub fn add(&mut self, token: impl AsRef<str>) {
        for part in token.as_ref().split_whitespace() {
            if !self.tokens.iter().any(|t| t == part) {
                self.tokens.push(part.to_string());
            }
        }
    }

    /// Check whether a token is present.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// True when no tokens have been added.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Iterate over the tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Render the list as a space-separated attribute value.
    pub fn to_attribute(&self) -> String {
        self.tokens.join(" ")
    }
}

/// A node in the markup tree: an element or a text run.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// A plain text run.
    Text(String),
}

impl Node {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// Return the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Return the text content if this node is a text run.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// One element of the markup tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Tag name (`table`, `tr`, `th`, ...).
    pub tag: String,
    /// Plain attributes, excluding `class`.
    pub attributes: BTreeMap<String, String>,
    /// Class tokens.
    pub classes: ClassList,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with the given tag and no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            classes: ClassList::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute (fluent).
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a class token (fluent).
    pub fn class(mut self, token: impl AsRef<str>) -> Self {
        self.classes.add(token);
        self
    }

    /// Set an attribute in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Append a child node.
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Append a child element.
    pub fn push_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    /// Append a text child.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Iterate over child elements, skipping text runs.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text content of this element and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(el, out),
        }
    }
}
