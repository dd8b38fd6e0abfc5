// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Service name inference
//!
//! Resources are grouped by the application they belong to. The name is
//! taken from the first source that yields one:
//! 1. `metadata.labels`
//! 2. selector labels
//! 3. pod template labels
//! 4. the prefix of a dash-separated resource name (namespaced kinds only)
//! 5. the `common` bucket

use super::resource::{Labels, Resource};

/// Label keys that conventionally carry the application name, in priority order
pub const APP_LABEL_KEYS: &[&str] = &["app", "app.kubernetes.io/name", "k8s-app"];

/// Group for resources that cannot be attributed to a service
pub const COMMON_SERVICE: &str = "common";

fn app_label(labels: &Labels) -> Option<&str> {
    APP_LABEL_KEYS
        .iter()
        .filter_map(|key| labels.get(*key))
        .map(String::as_str)
        .find(|value| !value.is_empty())
}

/// Cluster-scoped kinds are rarely named after a service
fn is_cluster_scoped(kind: &str) -> bool {
    kind == "Namespace" || kind.starts_with("Cluster")
}

/// Text before the first dash; empty for names such as `-foo`
fn name_prefix(name: &str) -> Option<&str> {
    name.split_once('-').map(|(prefix, _)| prefix)
}

/// Best guess at the service a resource belongs to
pub fn resolve_service_name(resource: &Resource) -> String {
    if let Some(app) = app_label(&resource.labels)
        .or_else(|| app_label(&resource.selector_labels))
        .or_else(|| app_label(&resource.template_labels))
    {
        return app.to_string();
    }

    if !is_cluster_scoped(&resource.kind)
        && let Some(prefix) = name_prefix(&resource.name)
    {
        return prefix.to_string();
    }

    COMMON_SERVICE.to_string()
}
