// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Projection of a YAML document onto the fields that identify a resource

use std::collections::BTreeMap;

use crate::error::DocumentError;
use crate::manifest::Node;

pub type Labels = BTreeMap<String, String>;

/// Identifying fields of a Kubernetes resource
///
/// Every field defaults to empty when absent from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub namespace: String,
    /// `metadata.labels`
    pub labels: Labels,
    /// `spec.selector.matchLabels`, or a flat `spec.selector` map
    pub selector_labels: Labels,
    /// `spec.template.metadata.labels`
    pub template_labels: Labels,
}

impl Resource {
    /// Project a decoded document onto the resource fields
    ///
    /// An empty document projects to an empty resource. Fails only when the
    /// document is a non-null scalar or a sequence. Missing or oddly typed
    /// fields fall back to empty values; aliases count as absent.
    pub fn from_node(node: &Node) -> Result<Self, DocumentError> {
        if node.is_null() {
            return Ok(Self::default());
        }
        if node.entries().is_none() {
            return Err(DocumentError::NotAMapping {
                found: node.kind_name(),
            });
        }

        let selector_labels = match node_at(node, &["spec", "selector"]) {
            Some(selector) => match selector.get("matchLabels") {
                Some(match_labels) => labels_from(match_labels),
                None if is_flat(selector) => labels_from(selector),
                None => Labels::new(),
            },
            None => Labels::new(),
        };

        Ok(Self {
            api_version: string_at(node, &["apiVersion"]),
            kind: string_at(node, &["kind"]),
            name: string_at(node, &["metadata", "name"]),
            namespace: string_at(node, &["metadata", "namespace"]),
            labels: node_at(node, &["metadata", "labels"])
                .map(labels_from)
                .unwrap_or_default(),
            selector_labels,
            template_labels: node_at(node, &["spec", "template", "metadata", "labels"])
                .map(labels_from)
                .unwrap_or_default(),
        })
    }

    /// Check that the resource can be routed to a file
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.kind.is_empty() || self.name.is_empty() {
            return Err(DocumentError::MissingIdentity);
        }
        Ok(())
    }
}

/// Walk nested mappings by key
fn node_at<'a>(root: &'a Node, path: &[&str]) -> Option<&'a Node> {
    path.iter().try_fold(root, |current, key| current.get(key))
}

fn string_at(root: &Node, path: &[&str]) -> String {
    node_at(root, path)
        .and_then(Node::scalar_text)
        .unwrap_or_default()
        .to_string()
}

fn is_flat(node: &Node) -> bool {
    node.entries()
        .is_some_and(|entries| entries.iter().all(|(_, v)| v.scalar_text().is_some()))
}

fn labels_from(node: &Node) -> Labels {
    node.entries()
        .unwrap_or_default()
        .iter()
        .filter_map(|(k, v)| Some((k.scalar_text()?.to_string(), v.scalar_text()?.to_string())))
        .collect()
}
