// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Destination paths for split manifests

use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::cli::OutputFormat;
use crate::error::DocumentError;
use crate::manifest::{Resource, resolve_service_name};

/// `kind-name.yaml`, lower-cased
fn flat_file_name(resource: &Resource) -> String {
    format!(
        "{}-{}.yaml",
        resource.kind.to_lowercase(),
        resource.name.to_lowercase()
    )
}

/// Plain components of a path segment taken from document content
///
/// Root, prefix, `.` and `..` components are dropped, so a segment can only
/// ever descend below the directory it is joined to.
fn confined(segment: &str) -> impl Iterator<Item = &OsStr> {
    Path::new(segment).components().filter_map(|c| match c {
        Component::Normal(part) => Some(part),
        _ => None,
    })
}

/// Compute where a resource is written for the given format
///
/// - `kind-name`: `{outdir}/{kind}-{name}.yaml`, both lower-cased
/// - `kind/name`: `{outdir}/{kind}/{name}.yaml`, only the directory lower-cased
/// - `service`: `{outdir}/{service}/{kind}-{name}.yaml`
///
/// The result always lies inside `outdir`. Separators inside kind, name or
/// service values create subdirectories there.
pub fn destination(outdir: &Path, format: OutputFormat, resource: &Resource) -> PathBuf {
    let mut path = outdir.to_path_buf();
    match format {
        OutputFormat::KindName => path.extend(confined(&flat_file_name(resource))),
        OutputFormat::KindDir => {
            path.extend(confined(&resource.kind.to_lowercase()));
            path.extend(confined(&format!("{}.yaml", resource.name)));
        }
        OutputFormat::Service => {
            path.extend(confined(&resolve_service_name(resource)));
            path.extend(confined(&flat_file_name(resource)));
        }
    }
    path
}

/// Compute the destination and make sure its directory exists
pub fn prepare_destination(
    outdir: &Path,
    format: OutputFormat,
    resource: &Resource,
) -> Result<PathBuf, DocumentError> {
    let path = destination(outdir, format, resource);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| DocumentError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(path)
}
