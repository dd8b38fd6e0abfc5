// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! The split loop
//!
//! Documents are handled one at a time: parse, extract, route, render,
//! redact, write. Any failure skips the current document only.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::SplitConfig;
use crate::error::DocumentError;
use crate::manifest::{DocumentSplitter, RawDocument, Resource};
use crate::output::{YamlWriter, prepare_destination};

/// Outcome of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files successfully written
    pub written: usize,
    /// Documents skipped because of an error
    pub skipped: usize,
}

/// Split every document of `input` into its own file
///
/// One `Saved document to <path>` line is printed to `out` per written file.
/// Only a failure to write to `out` aborts the run.
pub fn run<R: BufRead, W: Write>(
    input: R,
    config: &SplitConfig,
    out: &mut W,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut last_ordinal = 0;

    for item in DocumentSplitter::new(input) {
        let document = match item {
            Ok(document) => document,
            Err(e) => {
                warn!("Error reading document {}: {}", last_ordinal + 1, e);
                summary.skipped += 1;
                continue;
            }
        };
        last_ordinal = document.ordinal;

        match process_document(&document, config) {
            Ok(path) => {
                summary.written += 1;
                writeln!(out, "Saved document to {}", path.display())?;
            }
            Err(e) => {
                warn!(
                    line = document.start_line,
                    "Skipping document {}: {}", document.ordinal, e
                );
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

fn process_document(
    document: &RawDocument,
    config: &SplitConfig,
) -> Result<PathBuf, DocumentError> {
    let node = document.parse()?;
    let resource = Resource::from_node(&node)?;
    resource.validate()?;

    let path = prepare_destination(&config.outdir, config.format, &resource)?;
    debug!(
        document = document.ordinal,
        api_version = %resource.api_version,
        kind = %resource.kind,
        name = %resource.name,
        namespace = %resource.namespace,
        path = %path.display(),
        "Routing document"
    );
    if path.exists() {
        debug!(path = %path.display(), "Overwriting file written by an earlier document");
    }

    let rendered = YamlWriter::render(&node);
    let contents = config.redactor.redact(&rendered);
    YamlWriter::write(&path, &contents)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::Redactor;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const STREAM: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: frontend-deployment
  labels:
    app: shop
spec:
  replicas: 2
status:
  readyReplicas: 2
---
apiVersion: v1
kind: Service
metadata:
  name: Nginx
spec:
  selector:
    app: web
---
apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: foo-bar
";

    fn config(outdir: &Path, format: OutputFormat) -> SplitConfig {
        SplitConfig {
            outdir: outdir.to_path_buf(),
            format,
            redactor: Redactor::default(),
        }
    }

    fn split(input: &str, config: &SplitConfig) -> (RunSummary, String) {
        let mut out = Vec::new();
        let summary = run(input.as_bytes(), config, &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_kind_name_layout() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path(), OutputFormat::KindName);

        let (summary, out) = split(STREAM, &config);

        assert_eq!(summary, RunSummary { written: 3, skipped: 0 });
        assert!(temp_dir.path().join("deployment-frontend-deployment.yaml").is_file());
        assert!(temp_dir.path().join("service-nginx.yaml").is_file());
        assert!(temp_dir.path().join("clusterrole-foo-bar.yaml").is_file());
        assert_eq!(out.lines().count(), 3);
        assert!(out.starts_with("Saved document to "));
    }

    #[test]
    fn test_kind_dir_layout() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path(), OutputFormat::KindDir);

        split(STREAM, &config);

        assert!(temp_dir.path().join("deployment/frontend-deployment.yaml").is_file());
        assert!(temp_dir.path().join("service/Nginx.yaml").is_file());
        assert!(temp_dir.path().join("clusterrole/foo-bar.yaml").is_file());
    }

    #[test]
    fn test_service_layout() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path(), OutputFormat::Service);

        split(STREAM, &config);

        assert!(temp_dir.path().join("shop/deployment-frontend-deployment.yaml").is_file());
        assert!(temp_dir.path().join("web/service-nginx.yaml").is_file());
        assert!(temp_dir.path().join("common/clusterrole-foo-bar.yaml").is_file());
    }

    #[test]
    fn test_written_file_is_normalized_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path(), OutputFormat::KindName);

        split(
            "kind:   ConfigMap\nmetadata:\n    name: cfg\ndata: {a: '1'}\n",
            &config,
        );

        let written = fs::read_to_string(temp_dir.path().join("configmap-cfg.yaml")).unwrap();
        assert_eq!(written, "kind: ConfigMap\nmetadata:\n  name: cfg\ndata:\n  a: '1'\n");
    }

    #[test]
    fn test_scalar_text_survives_to_disk() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path(), OutputFormat::KindName);

        let source = "\
kind: Deployment
metadata:
  name: web
spec:
  template:
    spec:
      containers:
        - name: web
          ports:
            - containerPort: 08080
      volumes:
        - name: cfg
          configMap:
            defaultMode: 0644
            version: 1.10
";
        split(source, &config);

        let written = fs::read_to_string(temp_dir.path().join("deployment-web.yaml")).unwrap();
        assert_eq!(written, source);
    }

    #[test]
    fn test_redaction_applied_to_output() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config(temp_dir.path(), OutputFormat::KindName);
        config.redactor = Redactor::from_list("status:.*,  readyReplicas:.*").unwrap();

        split(STREAM, &config);

        let written =
            fs::read_to_string(temp_dir.path().join("deployment-frontend-deployment.yaml")).unwrap();
        assert!(!written.contains("status"));
        assert!(!written.contains("readyReplicas"));
        assert!(written.contains("replicas: 2"));
        assert!(written.lines().all(|line| !line.trim().is_empty()));
    }

    #[test]
    fn test_empty_redactor_matches_plain_output() {
        let plain_dir = TempDir::new().unwrap();
        let redacted_dir = TempDir::new().unwrap();
        let plain = config(plain_dir.path(), OutputFormat::KindName);
        let mut redacted = config(redacted_dir.path(), OutputFormat::KindName);
        redacted.redactor = Redactor::from_list("").unwrap();

        split(STREAM, &plain);
        split(STREAM, &redacted);

        let name = "deployment-frontend-deployment.yaml";
        assert_eq!(
            fs::read(plain_dir.path().join(name)).unwrap(),
            fs::read(redacted_dir.path().join(name)).unwrap()
        );
    }

    #[test]
    fn test_scalar_document_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path(), OutputFormat::KindName);

        let (summary, _) = split(
            "kind: Pod\nmetadata:\n  name: a\n---\njust a scalar\n---\nkind: Pod\nmetadata:\n  name: b\n",
            &config,
        );

        assert_eq!(summary, RunSummary { written: 2, skipped: 1 });
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_invalid_documents_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path(), OutputFormat::KindName);

        let (summary, _) = split(
            "kind: Pod\n---\nmetadata:\n  name: nokind\n---\nkind: [broken\n---\nkind: Pod\nmetadata:\n  name: ok\n",
            &config,
        );

        assert_eq!(summary, RunSummary { written: 1, skipped: 3 });
        assert!(temp_dir.path().join("pod-ok.yaml").is_file());
    }

    #[test]
    fn test_empty_documents_count_as_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path(), OutputFormat::KindName);

        let (summary, _) = split("---\n---\nkind: Pod\nmetadata:\n  name: a\n---\n", &config);

        assert_eq!(summary, RunSummary { written: 1, skipped: 2 });
        assert!(temp_dir.path().join("pod-a.yaml").is_file());
    }

    #[test]
    fn test_duplicate_destination_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path(), OutputFormat::KindName);

        let (summary, _) = split(
            "kind: Pod\nmetadata:\n  name: web\n  namespace: a\n---\nkind: Pod\nmetadata:\n  name: WEB\n  namespace: b\n",
            &config,
        );

        assert_eq!(summary.written, 2);
        let written = fs::read_to_string(temp_dir.path().join("pod-web.yaml")).unwrap();
        assert!(written.contains("namespace: b"));
    }

    #[test]
    fn test_blocked_directory_skips_document() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path(), OutputFormat::KindDir);
        fs::write(temp_dir.path().join("pod"), "").unwrap();

        let (summary, _) = split(
            "kind: Pod\nmetadata:\n  name: a\n---\nkind: Service\nmetadata:\n  name: b\n",
            &config,
        );

        assert_eq!(summary, RunSummary { written: 1, skipped: 1 });
        assert!(temp_dir.path().join("service/b.yaml").is_file());
    }

    #[test]
    fn test_empty_input() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path(), OutputFormat::KindName);

        let (summary, out) = split("", &config);
        assert_eq!(summary, RunSummary::default());
        assert!(out.is_empty());
    }
}
