// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

const EXAMPLES: &str = "\
Examples:
  manifest-split --file=1.yaml --outdir=./manifests
  manifest-split --file=1.yaml --outdir=./manifests --remove=\"status:.*,generation:.*\"
  manifest-split --file=1.yaml --outdir=./manifests --format=kind/name
  manifest-split --file=1.yaml --outdir=./manifests --format=service
  cat 1.yaml | manifest-split --outdir=./manifests

WARNING: the output directory is deleted and recreated on every run.";

#[derive(Parser, Debug)]
#[command(name = "manifest-split")]
#[command(author, version, about = "Split multi-document YAML manifests into separate files")]
#[command(after_help = EXAMPLES)]
pub struct Args {
    /// Input YAML file path (if not specified, stdin will be used)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output directory for parsed manifests (required, wiped on every run)
    #[arg(long, value_name = "PATH")]
    pub outdir: Option<PathBuf>,

    /// Patterns to remove from each manifest (regex, comma-separated)
    #[arg(long, value_name = "PATTERNS")]
    pub remove: Option<String>,

    /// Output filename format: kind-name, kind/name or service
    ///
    /// Checked after parsing so that --help wins over a bad value.
    #[arg(long, value_name = "FORMAT", default_value = "kind-name")]
    pub format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Flat structure with kind-name.yaml files
    #[default]
    #[value(name = "kind-name")]
    KindName,
    /// Group by kind in directories
    #[value(name = "kind/name")]
    KindDir,
    /// Group by service in directories
    #[value(name = "service")]
    Service,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::KindName => "kind-name",
            OutputFormat::KindDir => "kind/name",
            OutputFormat::Service => "service",
        };
        f.write_str(name)
    }
}
