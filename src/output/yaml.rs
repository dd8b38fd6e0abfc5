// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Block-style YAML emitter
//!
//! Output uses 2-space indentation with sequence items indented under their
//! parent key. Scalars are written with their source text and quoting, block
//! scalars as literals. Flow collections are rewritten in block style, except
//! empty ones (`[]`, `{}`).

use std::fs;
use std::path::Path;

use crate::error::DocumentError;
use crate::manifest::{Node, Scalar, ScalarStyle, alias_name};

const INDENT: usize = 2;

pub struct YamlWriter;

impl YamlWriter {
    /// Re-serialize a document in the canonical layout
    pub fn render(document: &Node) -> String {
        let mut out = String::new();
        match document {
            Node::Mapping { props, entries } if !entries.is_empty() => {
                if !props.is_empty() {
                    out.push_str(&props.render());
                    out.push('\n');
                }
                write_mapping(&mut out, entries, 0, false);
            }
            Node::Sequence { props, items } if !items.is_empty() => {
                if !props.is_empty() {
                    out.push_str(&props.render());
                    out.push('\n');
                }
                write_sequence(&mut out, items, 0, false);
            }
            _ => {
                let mut value = String::new();
                write_value(&mut value, document, INDENT);
                out.push_str(value.strip_prefix(' ').unwrap_or(value.as_str()));
            }
        }
        out
    }

    /// Create or overwrite `path` with `contents`
    pub fn write(path: &Path, contents: &str) -> Result<(), DocumentError> {
        fs::write(path, contents).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn pad(out: &mut String, indent: usize) {
    out.push_str(&" ".repeat(indent));
}

fn write_mapping(out: &mut String, entries: &[(Node, Node)], indent: usize, first_inline: bool) {
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 || !first_inline {
            pad(out, indent);
        }
        out.push_str(&key_text(key));
        out.push(':');
        write_value(out, value, indent + INDENT);
    }
}

fn write_sequence(out: &mut String, items: &[Node], indent: usize, first_inline: bool) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 || !first_inline {
            pad(out, indent);
        }
        out.push('-');
        match item {
            // Compact form: first entry shares the dash line
            Node::Mapping { props, entries } if props.is_empty() && !entries.is_empty() => {
                out.push(' ');
                write_mapping(out, entries, indent + INDENT, true);
            }
            Node::Sequence { props, items } if props.is_empty() && !items.is_empty() => {
                out.push(' ');
                write_sequence(out, items, indent + INDENT, true);
            }
            _ => write_value(out, item, indent + INDENT),
        }
    }
}

/// Write a value after `key:` or `-`; nested blocks go at `indent`
fn write_value(out: &mut String, node: &Node, indent: usize) {
    if let Some(props) = node.props().filter(|p| !p.is_empty()) {
        out.push(' ');
        out.push_str(&props.render());
    }
    match node {
        Node::Mapping { entries, .. } if !entries.is_empty() => {
            out.push('\n');
            write_mapping(out, entries, indent, false);
        }
        Node::Sequence { items, .. } if !items.is_empty() => {
            out.push('\n');
            write_sequence(out, items, indent, false);
        }
        Node::Mapping { .. } => out.push_str(" {}\n"),
        Node::Sequence { .. } => out.push_str(" []\n"),
        Node::Alias(id) => {
            out.push(' ');
            out.push_str(&alias_name(*id));
            out.push('\n');
        }
        Node::Scalar(scalar) => write_scalar(out, scalar, indent),
    }
}

fn write_scalar(out: &mut String, scalar: &Scalar, indent: usize) {
    let block = matches!(scalar.style, ScalarStyle::Literal | ScalarStyle::Folded);
    if block && fits_literal(&scalar.text) {
        write_literal(out, &scalar.text, indent);
        return;
    }
    let text = inline_scalar(scalar);
    if !text.is_empty() {
        out.push(' ');
        out.push_str(&text);
    }
    out.push('\n');
}

/// Literal blocks cannot start with whitespace without an indentation
/// indicator, and cannot carry control characters
fn fits_literal(text: &str) -> bool {
    !text.is_empty()
        && !text.starts_with(char::is_whitespace)
        && text.chars().all(|c| c == '\n' || c == '\t' || !c.is_control())
}

fn write_literal(out: &mut String, text: &str, indent: usize) {
    let (body, chomp) = if text.ends_with("\n\n") {
        (&text[..text.len() - 1], "+")
    } else if let Some(body) = text.strip_suffix('\n') {
        (body, "")
    } else {
        (text, "-")
    };
    out.push_str(" |");
    out.push_str(chomp);
    out.push('\n');
    for line in body.split('\n') {
        if !line.is_empty() {
            pad(out, indent);
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn single_line(text: &str) -> bool {
    text.chars().all(|c| c == '\t' || !c.is_control())
}

/// Single-line rendering of a scalar in its source style where possible
fn inline_scalar(scalar: &Scalar) -> String {
    let text = &scalar.text;
    match scalar.style {
        ScalarStyle::Plain if single_line(text) => text.clone(),
        ScalarStyle::SingleQuoted if single_line(text) => format!("'{}'", text.replace('\'', "''")),
        _ => double_quoted(text),
    }
}

fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn key_text(key: &Node) -> String {
    match key {
        Node::Scalar(scalar) => {
            let text = if scalar.is_null() {
                "~".to_string()
            } else {
                inline_scalar(scalar)
            };
            with_props(key, text)
        }
        // An alias key needs a space before the colon
        Node::Alias(id) => format!("{} ", alias_name(*id)),
        collection => flow(collection),
    }
}

fn with_props(node: &Node, text: String) -> String {
    match node.props().filter(|p| !p.is_empty()) {
        Some(props) => format!("{} {}", props.render(), text),
        None => text,
    }
}

/// Flow rendering, used only for collection keys
fn flow(node: &Node) -> String {
    match node {
        Node::Scalar(scalar) => {
            let text = match scalar.style {
                ScalarStyle::Plain
                    if single_line(&scalar.text)
                        && !scalar.text.contains([',', '[', ']', '{', '}']) =>
                {
                    scalar.text.clone()
                }
                _ => double_quoted(&scalar.text),
            };
            with_props(node, text)
        }
        Node::Sequence { items, .. } => {
            let items: Vec<_> = items.iter().map(flow).collect();
            with_props(node, format!("[{}]", items.join(", ")))
        }
        Node::Mapping { entries, .. } => {
            let entries: Vec<_> = entries
                .iter()
                .map(|(k, v)| format!("{}: {}", flow(k), flow(v)))
                .collect();
            with_props(node, format!("{{{}}}", entries.join(", ")))
        }
        Node::Alias(id) => alias_name(*id),
    }
}
