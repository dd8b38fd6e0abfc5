// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Pattern-based removal of text from rendered manifests

use std::borrow::Cow;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

/// Lines left empty (or whitespace-only) after removals
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*\n").unwrap());

/// Ordered list of removal patterns
///
/// Patterns are applied one after another, each to the output of the
/// previous one, and every match is replaced with nothing.
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    patterns: Vec<Regex>,
}

impl Redactor {
    /// Compile a comma-separated pattern list as given to `--remove`
    ///
    /// An empty list yields a redactor that changes nothing.
    pub fn from_list(list: &str) -> Result<Self> {
        if list.is_empty() {
            return Ok(Self::default());
        }
        let patterns = list
            .split(',')
            .map(|pattern| {
                Regex::new(pattern).with_context(|| format!("Invalid regex pattern '{}'", pattern))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Remove every match of every pattern, then drop blank lines
    pub fn redact<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.patterns.is_empty() {
            return Cow::Borrowed(text);
        }

        let mut result = text.to_string();
        for pattern in &self.patterns {
            result = pattern.replace_all(&result, "").into_owned();
        }
        Cow::Owned(BLANK_LINES.replace_all(&result, "").into_owned())
    }
}
