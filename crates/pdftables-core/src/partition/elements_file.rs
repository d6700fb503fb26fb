use crate::error::PdfTablesError;
use crate::partition::{parse_elements, Element, ElementCategory, PartitionConfig, Partitioner};
use std::path::{Path, PathBuf};

/// Replays element JSON saved from an earlier engine run.
///
/// The document path handed to `partition` is only used for diagnostics;
/// elements always come from the saved file. Page breaks are dropped unless
/// the config asks for them, matching what a live run would return.
pub struct ElementsFilePartitioner {
    elements_path: PathBuf,
}

impl ElementsFilePartitioner {
    pub fn new(elements_path: impl Into<PathBuf>) -> Self {
        ElementsFilePartitioner {
            elements_path: elements_path.into(),
        }
    }

    pub fn elements_path(&self) -> &Path {
        &self.elements_path
    }
}

impl Partitioner for ElementsFilePartitioner {
    fn partition(
        &self,
        path: &Path,
        config: &PartitionConfig,
    ) -> Result<Vec<Element>, PdfTablesError> {
        log::debug!(
            "replaying elements for {} from {}",
            path.display(),
            self.elements_path.display()
        );

        let json = std::fs::read_to_string(&self.elements_path).map_err(|e| {
            PdfTablesError::Partitioning(format!(
                "failed to read {}: {}",
                self.elements_path.display(),
                e
            ))
        })?;

        let mut elements = parse_elements(&json).map_err(|e| {
            PdfTablesError::Partitioning(format!(
                "invalid element JSON in {}: {}",
                self.elements_path.display(),
                e
            ))
        })?;

        if !config.include_page_breaks {
            elements.retain(|el| el.category != ElementCategory::PageBreak);
        }

        Ok(elements)
    }

    fn backend_name(&self) -> &str {
        "elements-file"
    }
}
