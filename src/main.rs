// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

mod cli;
mod config;
mod error;
mod input;
mod manifest;
mod output;
mod pipeline;

use std::io::{self, IsTerminal, Write};

use anyhow::{Result, bail};
use clap::{CommandFactory, Parser};
use tracing::{debug, info, warn};
use tracing_subscriber::prelude::*;

use cli::Args;
use config::SplitConfig;
use input::InputSource;
use output::Redactor;

/// Initialize logging to stderr, leaving stdout for the per-file report
fn init_logging(verbose: bool) {
    let filter = if verbose {
        "manifest_split=debug"
    } else {
        "manifest_split=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

/// Print usage and fail rather than block reading a terminal
fn ensure_input_available<W: Write>(
    source: &InputSource,
    stdin_is_terminal: bool,
    usage: &mut W,
) -> Result<()> {
    if source.waits_on_terminal(stdin_is_terminal) {
        warn!("No input file specified and no data piped in.");
        write!(usage, "{}", Args::command().render_help())?;
        bail!("no input available");
    }
    Ok(())
}

fn main() -> Result<()> {
    // Bare invocation behaves like --help
    if std::env::args_os().len() <= 1 {
        Args::command().print_help()?;
        return Ok(());
    }

    let args = Args::parse();
    init_logging(args.verbose);

    let outdir = config::require_outdir(args.outdir.as_deref())?;
    let format = config::parse_format(&args.format)?;

    let source = InputSource::from_arg(args.file.as_deref());
    ensure_input_available(&source, io::stdin().is_terminal(), &mut io::stdout())?;
    let reader = source.open()?;
    if source == InputSource::Stdin {
        info!("Reading YAML from stdin...");
    }

    config::reset_output_dir(&outdir)?;

    let redactor = Redactor::from_list(args.remove.as_deref().unwrap_or_default())?;

    let config = SplitConfig {
        outdir,
        format,
        redactor,
    };
    debug!(outdir = %config.outdir.display(), format = %config.format, "Starting split");
    if !config.redactor.is_empty() {
        debug!(patterns = config.redactor.len(), "Removal patterns compiled");
    }

    let mut stdout = io::stdout().lock();
    let summary = pipeline::run(reader, &config, &mut stdout)?;

    writeln!(
        stdout,
        "Parsing complete! Saved {} manifests ({} skipped).",
        summary.written, summary.skipped
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_interactive_stdin_prints_usage_and_fails() {
        let mut usage = Vec::new();
        let err = ensure_input_available(&InputSource::Stdin, true, &mut usage).unwrap_err();
        assert_eq!(err.to_string(), "no input available");

        let usage = String::from_utf8(usage).unwrap();
        assert!(usage.contains("--outdir"));
        assert!(usage.contains("Examples:"));
    }

    #[test]
    fn test_piped_stdin_is_accepted() {
        let mut usage = Vec::new();
        ensure_input_available(&InputSource::Stdin, false, &mut usage).unwrap();
        assert!(usage.is_empty());
    }

    #[test]
    fn test_file_input_ignores_terminal() {
        let mut usage = Vec::new();
        let source = InputSource::File(PathBuf::from("in.yaml"));
        ensure_input_available(&source, true, &mut usage).unwrap();
        assert!(usage.is_empty());
    }
}
