pub mod elements_file;
pub mod unstructured;

use crate::error::PdfTablesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use elements_file::ElementsFilePartitioner;
pub use unstructured::UnstructuredPartitioner;

/// Default ceiling handed to the engine to bound work on large documents.
pub const DEFAULT_MAX_PARTITION: usize = 20;

/// How the partitioning engine analyzes page layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Let the engine pick based on the document.
    Auto,
    /// Text-layer extraction only. Cheap, but infers no table structure.
    Fast,
    /// Layout model plus OCR. Slowest and most accurate.
    #[default]
    HiRes,
    /// OCR every page, ignoring any embedded text layer.
    OcrOnly,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Auto,
        Strategy::Fast,
        Strategy::HiRes,
        Strategy::OcrOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Auto => "auto",
            Strategy::Fast => "fast",
            Strategy::HiRes => "hi_res",
            Strategy::OcrOnly => "ocr_only",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PdfTablesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == key)
            .ok_or_else(|| PdfTablesError::InvalidStrategy(s.to_string()))
    }
}

/// Options passed to the partitioning engine.
///
/// Field names match the engine's keyword arguments so the struct can be
/// serialized straight into its call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionConfig {
    pub strategy: Strategy,
    pub infer_table_structure: bool,
    pub include_page_breaks: bool,
    pub include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_partition: Option<usize>,
    /// OCR languages (e.g., "eng"). Empty leaves the engine default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

impl PartitionConfig {
    pub fn for_strategy(strategy: Strategy) -> Self {
        PartitionConfig {
            strategy,
            ..PartitionConfig::default()
        }
    }
}

impl Default for PartitionConfig {
    fn default() -> Self {
        PartitionConfig {
            strategy: Strategy::default(),
            infer_table_structure: true,
            include_page_breaks: false,
            include_metadata: true,
            max_partition: Some(DEFAULT_MAX_PARTITION),
            languages: Vec::new(),
        }
    }
}

/// Category tag the engine assigns to each element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementCategory {
    Table,
    Title,
    NarrativeText,
    ListItem,
    Image,
    FigureCaption,
    Header,
    Footer,
    PageBreak,
    UncategorizedText,
    Other(String),
}

impl ElementCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ElementCategory::Table => "Table",
            ElementCategory::Title => "Title",
            ElementCategory::NarrativeText => "NarrativeText",
            ElementCategory::ListItem => "ListItem",
            ElementCategory::Image => "Image",
            ElementCategory::FigureCaption => "FigureCaption",
            ElementCategory::Header => "Header",
            ElementCategory::Footer => "Footer",
            ElementCategory::PageBreak => "PageBreak",
            ElementCategory::UncategorizedText => "UncategorizedText",
            ElementCategory::Other(tag) => tag.as_str(),
        }
    }
}

impl From<String> for ElementCategory {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Table" => ElementCategory::Table,
            "Title" => ElementCategory::Title,
            "NarrativeText" => ElementCategory::NarrativeText,
            "ListItem" => ElementCategory::ListItem,
            "Image" => ElementCategory::Image,
            "FigureCaption" => ElementCategory::FigureCaption,
            "Header" => ElementCategory::Header,
            "Footer" => ElementCategory::Footer,
            "PageBreak" => ElementCategory::PageBreak,
            "UncategorizedText" => ElementCategory::UncategorizedText,
            _ => ElementCategory::Other(tag),
        }
    }
}

impl From<ElementCategory> for String {
    fn from(category: ElementCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to an element. Only the keys read downstream are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_as_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// One unit of partitioned document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub category: ElementCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub metadata: ElementMetadata,
}

impl Element {
    pub fn is_table(&self) -> bool {
        self.category == ElementCategory::Table
    }
}

/// Parse the engine's element JSON (an array of element objects).
pub fn parse_elements(json: &str) -> Result<Vec<Element>, PdfTablesError> {
    Ok(serde_json::from_str(json)?)
}

/// Trait for document partitioning backends.
pub trait Partitioner: Send + Sync {
    /// Partition the document at `path` into elements, in reading order.
    fn partition(
        &self,
        path: &Path,
        config: &PartitionConfig,
    ) -> Result<Vec<Element>, PdfTablesError>;

    /// Name of this partitioning backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
