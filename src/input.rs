// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Manifest input: a named file or piped stdin

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// `--file` if given and non-empty, stdin otherwise
    pub fn from_arg(file: Option<&Path>) -> Self {
        match file {
            Some(path) if !path.as_os_str().is_empty() => InputSource::File(path.to_path_buf()),
            _ => InputSource::Stdin,
        }
    }

    /// True when reading would block on a terminal instead of piped data
    pub fn waits_on_terminal(&self, stdin_is_terminal: bool) -> bool {
        matches!(self, InputSource::Stdin) && stdin_is_terminal
    }

    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            InputSource::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Error opening YAML file: {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            InputSource::Stdin => Ok(Box::new(io::stdin().lock())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_from_arg() {
        assert_eq!(InputSource::from_arg(None), InputSource::Stdin);
        assert_eq!(InputSource::from_arg(Some(Path::new(""))), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg(Some(Path::new("in.yaml"))),
            InputSource::File(PathBuf::from("in.yaml"))
        );
    }

    #[test]
    fn test_file_is_never_interactive() {
        let source = InputSource::File(PathBuf::from("in.yaml"));
        assert!(!source.waits_on_terminal(true));
        assert!(!source.waits_on_terminal(false));
    }

    #[test]
    fn test_stdin_interactive_only_on_terminal() {
        assert!(InputSource::Stdin.waits_on_terminal(true));
        assert!(!InputSource::Stdin.waits_on_terminal(false));
    }

    #[test]
    fn test_open_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("in.yaml");
        std::fs::write(&path, "kind: Pod\n").unwrap();

        let mut content = String::new();
        InputSource::File(path)
            .open()
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "kind: Pod\n");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let source = InputSource::File(temp_dir.path().join("missing.yaml"));
        let err = source.open().err().unwrap();
        assert!(err.to_string().contains("missing.yaml"));
    }
}
