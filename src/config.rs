// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Run configuration
//!
//! Everything comes from the command line. `SplitConfig` is the validated,
//! immutable form handed to the pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;

use crate::cli::OutputFormat;
use crate::output::Redactor;

/// Validated settings for one run
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Root directory for written manifests
    pub outdir: PathBuf,
    pub format: OutputFormat,
    pub redactor: Redactor,
}

/// Reject a missing or empty `--outdir`
pub fn require_outdir(outdir: Option<&Path>) -> Result<PathBuf> {
    match outdir {
        Some(path) if !path.as_os_str().is_empty() => Ok(path.to_path_buf()),
        _ => bail!("Output directory must be specified (--outdir)"),
    }
}

/// Resolve a `--format` value
pub fn parse_format(value: &str) -> Result<OutputFormat> {
    match OutputFormat::from_str(value, false) {
        Ok(format) => Ok(format),
        Err(_) => bail!(
            "Invalid format option: {value}. Must be 'kind-name', 'kind/name', or 'service'"
        ),
    }
}

/// Delete `outdir` with everything in it and create it again empty
///
/// This is destructive and not reversible: any previous content of the
/// directory is lost.
pub fn reset_output_dir(outdir: &Path) -> Result<()> {
    match fs::remove_dir_all(outdir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "Error removing previous output directory: {}",
                    outdir.display()
                )
            });
        }
    }
    fs::create_dir_all(outdir)
        .with_context(|| format!("Error creating output directory: {}", outdir.display()))
}
