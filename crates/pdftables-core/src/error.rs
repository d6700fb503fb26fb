#[derive(Debug, thiserror::Error)]
pub enum PdfTablesError {
    #[error("{tool} is not installed or not in PATH. {remediation}")]
    MissingDependency {
        tool: String,
        program: String,
        remediation: String,
    },

    #[error("partitioning failed: {0}")]
    Partitioning(String),

    #[error("table {position} could not be converted: {reason}")]
    TableConversion { position: usize, reason: String },

    #[error(transparent)]
    HtmlTable(#[from] crate::html::HtmlTableError),

    #[error("unknown partitioning strategy '{0}' (expected auto, fast, hi_res or ocr_only)")]
    InvalidStrategy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PdfTablesError {
    /// True for failures the caller has to fix in the environment before retrying.
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, PdfTablesError::MissingDependency { .. })
    }
}
