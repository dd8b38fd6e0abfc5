// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Multi-document YAML stream splitting
//!
//! The stream is cut into raw document chunks on `---` / `...` markers at
//! column 0 before any YAML parsing happens. Each chunk is then decoded on
//! its own, so a syntax error in one document cannot poison the documents
//! that follow it.

use std::io::BufRead;

use crate::error::DocumentError;
use crate::manifest::Node;

/// One document's worth of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// 1-based position of the document in the stream
    pub ordinal: usize,
    /// 1-based input line where the document text begins
    pub start_line: usize,
    pub text: String,
}

impl RawDocument {
    /// Decode the chunk into a YAML node tree
    ///
    /// A chunk without content decodes to a null node.
    pub fn parse(&self) -> Result<Node, DocumentError> {
        Node::parse(&self.text).map_err(DocumentError::Decode)
    }
}

enum LineKind<'a> {
    /// `---`, with whatever follows the marker on the same line
    Start(&'a str),
    /// `...`
    End,
    /// `%YAML`, `%TAG`, ...
    Directive,
    Body,
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim_end_matches(['\n', '\r']);
    if let Some(rest) = trimmed.strip_prefix("---")
        && (rest.is_empty() || rest.starts_with([' ', '\t']))
    {
        return LineKind::Start(rest.trim_start());
    }
    if trimmed.trim_end() == "..." {
        return LineKind::End;
    }
    if trimmed.starts_with('%') {
        return LineKind::Directive;
    }
    LineKind::Body
}

/// True for lines that carry YAML content (not blank, not a comment)
fn is_content(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Lazy iterator over the documents of a YAML stream
///
/// A document opened by an explicit `---` is yielded even when it holds only
/// blank lines and comments, and takes an ordinal like any other. Such
/// lines ahead of the first marker are dropped. A read failure is yielded
/// once and ends the iteration.
pub struct DocumentSplitter<R> {
    reader: R,
    line_no: usize,
    emitted: usize,
    /// Text that followed a `---` marker, with the marker's line number
    carry: Option<(String, usize)>,
    done: bool,
}

impl<R: BufRead> DocumentSplitter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            emitted: 0,
            carry: None,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for DocumentSplitter<R> {
    type Item = Result<RawDocument, DocumentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut text = String::new();
        let mut start_line = None;
        // Line of the `---` that opened this document
        let mut opened_at = None;
        if let Some((rest, line_no)) = self.carry.take() {
            opened_at = Some(line_no);
            if is_content(&rest) {
                start_line = Some(line_no);
            }
            text = rest;
        }

        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    break;
                }
                Ok(_) => self.line_no += 1,
                Err(e) => {
                    self.done = true;
                    return Some(Err(DocumentError::Read(e)));
                }
            }

            match classify(&line) {
                LineKind::Start(rest) => {
                    let rest = if rest.is_empty() {
                        String::new()
                    } else {
                        format!("{rest}\n")
                    };
                    if start_line.is_some() || opened_at.is_some() {
                        self.carry = Some((rest, self.line_no));
                        break;
                    }
                    // Only a preamble collected so far
                    opened_at = Some(self.line_no);
                    if is_content(&rest) {
                        start_line = Some(self.line_no);
                    }
                    text = rest;
                }
                LineKind::End => {
                    if start_line.is_some() || opened_at.is_some() {
                        break;
                    }
                    text.clear();
                }
                LineKind::Directive if start_line.is_none() => {}
                LineKind::Directive | LineKind::Body => {
                    if start_line.is_none() && is_content(&line) {
                        start_line = Some(self.line_no);
                    }
                    text.push_str(&line);
                }
            }
        }

        let start_line = start_line.or(opened_at)?;
        self.emitted += 1;
        Some(Ok(RawDocument {
            ordinal: self.emitted,
            start_line,
            text,
        }))
    }
}
