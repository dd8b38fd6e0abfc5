// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Per-document error types
//!
//! Every variant is recoverable: the pipeline logs it against the document's
//! ordinal and moves on to the next document. Startup failures are not
//! represented here, they propagate as `anyhow::Error` out of `main`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use yaml_rust2::scanner::ScanError;

/// Reason a single document was skipped
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input stream could not be read any further
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    /// The document text is not valid YAML
    #[error("failed to parse YAML: {0}")]
    Decode(#[source] ScanError),

    /// The document decoded to something other than a mapping
    #[error("document is a {found}, expected a mapping")]
    NotAMapping { found: &'static str },

    /// `kind` or `metadata.name` is missing or empty
    #[error("document has empty kind or name")]
    MissingIdentity,

    /// The destination directory could not be created
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination file could not be written
    #[error("failed to write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_mapping_message() {
        let err = DocumentError::NotAMapping { found: "scalar" };
        assert_eq!(err.to_string(), "document is a scalar, expected a mapping");
    }

    #[test]
    fn test_write_message_includes_path() {
        let err = DocumentError::Write {
            path: PathBuf::from("out/pod-web.yaml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("out/pod-web.yaml"));
        assert!(message.contains("denied"));
    }
}
