pub mod deps;
pub mod error;
pub mod frame;
pub mod html;
pub mod locate;
pub mod materialize;
pub mod outcome;
pub mod partition;

use deps::RequiredTool;
use error::PdfTablesError;
use outcome::{ExtractionStatus, TableExtraction};
use partition::{PartitionConfig, Partitioner, Strategy, UnstructuredPartitioner};
use std::path::Path;

pub use frame::{Cell, DataFrame};
pub use outcome::{ExtractedTable, SkippedTable};

/// Extracts tables from PDF documents through a partitioning backend.
pub struct TableExtractor {
    partitioner: Box<dyn Partitioner>,
    required_tools: Vec<RequiredTool>,
    max_partition: Option<usize>,
    languages: Vec<String>,
}

impl TableExtractor {
    pub fn new(partitioner: impl Partitioner + 'static) -> Self {
        let defaults = PartitionConfig::default();
        TableExtractor {
            partitioner: Box::new(partitioner),
            required_tools: deps::DEFAULT_TOOLS.to_vec(),
            max_partition: defaults.max_partition,
            languages: defaults.languages,
        }
    }

    /// Replace the executables checked before partitioning. An empty list
    /// disables the check.
    pub fn with_required_tools(mut self, tools: Vec<RequiredTool>) -> Self {
        self.required_tools = tools;
        self
    }

    pub fn with_max_partition(mut self, max_partition: Option<usize>) -> Self {
        self.max_partition = max_partition;
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    pub fn backend_name(&self) -> &str {
        self.partitioner.backend_name()
    }

    pub fn partition_config(&self, strategy: Strategy) -> PartitionConfig {
        PartitionConfig {
            max_partition: self.max_partition,
            languages: self.languages.clone(),
            ..PartitionConfig::for_strategy(strategy)
        }
    }

    /// Extract every table from the PDF at `path`.
    ///
    /// Only a missing external tool is returned as an error. Engine
    /// failures and per-table conversion failures are logged and reflected
    /// in the returned status and skipped list.
    pub fn extract(
        &self,
        path: impl AsRef<Path>,
        strategy: Strategy,
    ) -> Result<TableExtraction, PdfTablesError> {
        let path = path.as_ref();

        deps::check_dependencies(&self.required_tools)?;

        let config = self.partition_config(strategy);
        let elements = match self.partitioner.partition(path, &config) {
            Ok(elements) => elements,
            Err(e) if e.is_missing_dependency() => return Err(e),
            Err(e) => {
                let reason = match e {
                    PdfTablesError::Partitioning(reason) => reason,
                    other => other.to_string(),
                };
                log::warn!("⚠️ Error extracting tables: {reason}");
                return Ok(TableExtraction::empty(
                    path.to_path_buf(),
                    strategy,
                    ExtractionStatus::PartitioningFailed { reason },
                ));
            }
        };
        log::debug!(
            "{} returned {} elements for {}",
            self.partitioner.backend_name(),
            elements.len(),
            path.display()
        );

        let tables = locate::locate_tables(elements);
        if tables.is_empty() {
            log::info!("No tables found in the PDF.");
            return Ok(TableExtraction::empty(
                path.to_path_buf(),
                strategy,
                ExtractionStatus::NoTablesFound,
            ));
        }

        let (extracted, skipped) = materialize::materialize(&tables);
        if !skipped.is_empty() {
            log::warn!(
                "{} of {} tables could not be converted",
                skipped.len(),
                tables.len()
            );
        }

        Ok(TableExtraction {
            source: path.to_path_buf(),
            strategy,
            status: ExtractionStatus::Extracted,
            tables: extracted,
            skipped,
        })
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new(UnstructuredPartitioner::new())
    }
}

/// Main API entry point: extract all tables from a PDF with the default
/// engine, after checking that Poppler and Tesseract are installed.
pub fn extract_tables_from_pdf(
    path: impl AsRef<Path>,
    strategy: Strategy,
) -> Result<TableExtraction, PdfTablesError> {
    TableExtractor::default().extract(path, strategy)
}
