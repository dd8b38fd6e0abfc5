// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! YAML document tree
//!
//! Scalars keep their source text and quoting style, so a value such as
//! `0644`, `08080` or `1.10` is written back exactly as it was read instead
//! of being re-typed on the way through. The tree is built from the
//! yaml-rust2 event stream.

use yaml_rust2::parser::{Event, EventReceiver, Parser, Tag};
use yaml_rust2::scanner::{ScanError, TScalarStyle};

/// Plain scalars that resolve to null
const NULL_FORMS: &[&str] = &["", "~", "null", "Null", "NULL"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

impl From<TScalarStyle> for ScalarStyle {
    fn from(style: TScalarStyle) -> Self {
        match style {
            TScalarStyle::Plain => ScalarStyle::Plain,
            TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
            TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
            TScalarStyle::Literal => ScalarStyle::Literal,
            _ => ScalarStyle::Folded,
        }
    }
}

/// Node properties: explicit tag and anchor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Props {
    /// Tag as written in YAML, e.g. `!!str` or `!custom`
    pub tag: Option<String>,
    /// Anchor id, 0 when the node has no anchor
    pub anchor: usize,
}

impl Props {
    fn new(anchor: usize, tag: Option<Tag>) -> Self {
        Self {
            tag: tag.map(|tag| tag_text(&tag)),
            anchor,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.anchor == 0
    }

    /// `!tag &aN`, in the order YAML expects
    pub fn render(&self) -> String {
        let mut parts = Vec::new();
        if let Some(tag) = &self.tag {
            parts.push(tag.clone());
        }
        if self.anchor != 0 {
            parts.push(anchor_name(self.anchor));
        }
        parts.join(" ")
    }
}

pub fn anchor_name(id: usize) -> String {
    format!("&a{id}")
}

pub fn alias_name(id: usize) -> String {
    format!("*a{id}")
}

fn tag_text(tag: &Tag) -> String {
    match tag.handle.as_str() {
        "tag:yaml.org,2002:" | "!!" => format!("!!{}", tag.suffix),
        "!" => format!("!{}", tag.suffix),
        "" => format!("!<{}>", tag.suffix),
        handle => format!("!<{}{}>", handle, tag.suffix),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    /// Scalar value as parsed (quotes and escapes resolved)
    pub text: String,
    pub style: ScalarStyle,
    pub props: Props,
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        self.style == ScalarStyle::Plain
            && self.props.tag.is_none()
            && NULL_FORMS.contains(&self.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(Scalar),
    Sequence { props: Props, items: Vec<Node> },
    /// Entries in source order
    Mapping { props: Props, entries: Vec<(Node, Node)> },
    /// Reference to an anchored node by id
    Alias(usize),
}

impl Node {
    /// The empty document
    pub fn null() -> Self {
        Node::Scalar(Scalar {
            text: String::new(),
            style: ScalarStyle::Plain,
            props: Props::default(),
        })
    }

    /// Parse the first document of `text`
    ///
    /// Input without any document yields [`Node::null`].
    pub fn parse(text: &str) -> Result<Self, ScanError> {
        let mut builder = TreeBuilder::default();
        Parser::new_from_str(text).load(&mut builder, false)?;
        Ok(builder.root.unwrap_or_else(Node::null))
    }

    pub fn props(&self) -> Option<&Props> {
        match self {
            Node::Scalar(scalar) => Some(&scalar.props),
            Node::Sequence { props, .. } | Node::Mapping { props, .. } => Some(props),
            Node::Alias(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(scalar) if scalar.is_null())
    }

    /// Short description used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Scalar(scalar) if scalar.is_null() => "null",
            Node::Scalar(_) => "scalar",
            Node::Sequence { .. } => "sequence",
            Node::Mapping { .. } => "mapping",
            Node::Alias(_) => "alias",
        }
    }

    pub fn entries(&self) -> Option<&[(Node, Node)]> {
        match self {
            Node::Mapping { entries, .. } => Some(entries),
            _ => None,
        }
    }

    /// Value of the first entry whose key is the scalar `key`
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries()?
            .iter()
            .find(|(k, _)| k.scalar_text() == Some(key))
            .map(|(_, v)| v)
    }

    /// Text of a scalar node, empty for null; `None` for anything else
    pub fn scalar_text(&self) -> Option<&str> {
        match self {
            Node::Scalar(scalar) if scalar.is_null() => Some(""),
            Node::Scalar(scalar) => Some(&scalar.text),
            _ => None,
        }
    }
}

enum Frame {
    Sequence(Props, Vec<Node>),
    Mapping(Props, Vec<(Node, Node)>, Option<Node>),
}

/// Assembles nodes from parser events
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    root: Option<Node>,
}

impl TreeBuilder {
    fn push(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(Frame::Sequence(_, items)) => items.push(node),
            Some(Frame::Mapping(_, entries, pending_key)) => match pending_key.take() {
                Some(key) => entries.push((key, node)),
                None => *pending_key = Some(node),
            },
        }
    }
}

impl EventReceiver for TreeBuilder {
    fn on_event(&mut self, event: Event) {
        match event {
            Event::Scalar(text, style, anchor, tag) => self.push(Node::Scalar(Scalar {
                text,
                style: style.into(),
                props: Props::new(anchor, tag),
            })),
            Event::SequenceStart(anchor, tag) => self
                .stack
                .push(Frame::Sequence(Props::new(anchor, tag), Vec::new())),
            Event::MappingStart(anchor, tag) => self.stack.push(Frame::Mapping(
                Props::new(anchor, tag),
                Vec::new(),
                None,
            )),
            Event::SequenceEnd => {
                if let Some(Frame::Sequence(props, items)) = self.stack.pop() {
                    self.push(Node::Sequence { props, items });
                }
            }
            Event::MappingEnd => {
                if let Some(Frame::Mapping(props, entries, _)) = self.stack.pop() {
                    self.push(Node::Mapping { props, entries });
                }
            }
            Event::Alias(id) => self.push(Node::Alias(id)),
            _ => {}
        }
    }
}
