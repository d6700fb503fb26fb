use crate::frame::DataFrame;
use crate::partition::Strategy;
use serde::Serialize;
use std::path::PathBuf;

/// One table located in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedTable {
    /// 1-based position among the located tables.
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// HTML rendition produced by the partitioning engine.
    pub html: String,
    /// Parsed table. `None` when the HTML held no readable table.
    pub frame: Option<DataFrame>,
}

/// A located table that could not be converted at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTable {
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    pub reason: String,
}

/// How the extraction as a whole went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// At least one table element was located.
    Extracted,
    /// The document partitioned cleanly but holds no tables.
    NoTablesFound,
    /// The engine failed; no tables could be located.
    PartitioningFailed { reason: String },
}

/// Result of extracting tables from one document.
#[derive(Debug, Clone, Serialize)]
pub struct TableExtraction {
    pub source: PathBuf,
    pub strategy: Strategy,
    pub status: ExtractionStatus,
    pub tables: Vec<ExtractedTable>,
    pub skipped: Vec<SkippedTable>,
}

impl TableExtraction {
    pub(crate) fn empty(source: PathBuf, strategy: Strategy, status: ExtractionStatus) -> Self {
        TableExtraction {
            source,
            strategy,
            status,
            tables: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Parsed tables, in document order. Tables without a frame are left out.
    pub fn dataframes(&self) -> Vec<&DataFrame> {
        self.tables.iter().filter_map(|t| t.frame.as_ref()).collect()
    }

    /// HTML of every converted table, in document order.
    pub fn html(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.html.as_str()).collect()
    }

    /// Split into separate frame and HTML lists.
    ///
    /// The two lists are NOT index-aligned: a table whose HTML held no
    /// readable table contributes its HTML but no frame. Use `tables` when
    /// positional correspondence matters.
    pub fn into_parts(self) -> (Vec<DataFrame>, Vec<String>) {
        let mut frames = Vec::new();
        let mut html = Vec::with_capacity(self.tables.len());
        for table in self.tables {
            if let Some(frame) = table.frame {
                frames.push(frame);
            }
            html.push(table.html);
        }
        (frames, html)
    }
}
