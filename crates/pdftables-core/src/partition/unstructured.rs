use crate::error::PdfTablesError;
use crate::partition::{parse_elements, Element, PartitionConfig, Partitioner};
use std::path::Path;
use std::process::Command;

/// Driver run inside the child interpreter. Receives the PDF path and the
/// JSON-encoded keyword arguments, writes the element JSON to stdout.
///
/// Everything else printed while partitioning (Python `print`, progress
/// bars, native libraries writing to fd 1) is sent to stderr, so stdout
/// carries only the JSON document.
const DRIVER: &str = r#"
import contextlib
import json
import os
import sys

sys.stdout.flush()
out = os.fdopen(os.dup(1), "w", encoding="utf-8")
os.dup2(2, 1)

with contextlib.redirect_stdout(sys.stderr):
    from unstructured.partition.pdf import partition_pdf
    from unstructured.staging.base import elements_to_json

    kwargs = json.loads(sys.argv[2])
    elements = partition_pdf(filename=sys.argv[1], **kwargs)
    payload = elements_to_json(elements)

out.write(payload)
out.flush()
"#;

pub const DEFAULT_PYTHON: &str = "python3";

/// Partitioning backend using the `unstructured` Python library.
///
/// The library's `partition_pdf` does layout analysis, OCR and table
/// structure inference; this backend only launches it and reads back the
/// serialized elements.
pub struct UnstructuredPartitioner {
    python: String,
}

impl UnstructuredPartitioner {
    pub fn new() -> Self {
        Self::with_python(DEFAULT_PYTHON)
    }

    /// Use a specific interpreter, e.g. the one inside a virtualenv.
    pub fn with_python(python: impl Into<String>) -> Self {
        UnstructuredPartitioner {
            python: python.into(),
        }
    }

    pub fn python(&self) -> &str {
        &self.python
    }

    /// Check if the interpreter can import the partitioning module.
    pub fn is_available(&self) -> bool {
        Command::new(&self.python)
            .arg("-c")
            .arg("import unstructured.partition.pdf")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for UnstructuredPartitioner {
    fn default() -> Self {
        Self::new()
    }
}

impl Partitioner for UnstructuredPartitioner {
    fn partition(
        &self,
        path: &Path,
        config: &PartitionConfig,
    ) -> Result<Vec<Element>, PdfTablesError> {
        if !path.is_file() {
            return Err(PdfTablesError::Partitioning(format!(
                "no such file: {}",
                path.display()
            )));
        }

        let kwargs = serde_json::to_string(config)?;
        log::debug!(
            "running {} partition_pdf on {} with {}",
            self.python,
            path.display(),
            kwargs
        );

        let output = Command::new(&self.python)
            .arg("-c")
            .arg(DRIVER)
            .arg(path)
            .arg(&kwargs)
            .output()
            .map_err(|e| {
                PdfTablesError::Partitioning(format!("could not launch {}: {}", self.python, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::debug!("partition_pdf stderr:\n{}", stderr);
            return Err(PdfTablesError::Partitioning(engine_error_text(
                &stderr,
                output.status.code(),
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_elements(&stdout).map_err(|e| {
            PdfTablesError::Partitioning(format!("engine returned unreadable output: {}", e))
        })
    }

    fn backend_name(&self) -> &str {
        "unstructured"
    }
}

/// The last non-empty stderr line. For a Python traceback that is the
/// exception type and message.
fn engine_error_text(stderr: &str, code: Option<i32>) -> String {
    match stderr.lines().rev().map(str::trim).find(|l| !l.is_empty()) {
        Some(line) => line.to_string(),
        None => format!(
            "engine exited with code {} and no error output",
            code.map(|c| c.to_string()).unwrap_or_else(|| "unknown".into())
        ),
    }
}
