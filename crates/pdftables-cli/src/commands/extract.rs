use pdftables_core::error::PdfTablesError;
use pdftables_core::outcome::ExtractionStatus;
use pdftables_core::partition::{ElementsFilePartitioner, Strategy, UnstructuredPartitioner};
use pdftables_core::TableExtractor;
use std::path::PathBuf;

use crate::output;

/// Exit code when the engine could not partition the document.
const EXIT_PARTITIONING_FAILED: i32 = 2;

pub struct ExtractArgs {
    pub input_file: PathBuf,
    pub strategy: Strategy,
    pub max_partition: Option<usize>,
    pub languages: Vec<String>,
    pub python: String,
    pub elements: Option<PathBuf>,
    pub output_format: String,
    pub out: Option<PathBuf>,
}

pub fn run(args: ExtractArgs) -> Result<i32, PdfTablesError> {
    // Saved elements need neither the engine nor its binaries.
    let extractor = match &args.elements {
        Some(path) => {
            TableExtractor::new(ElementsFilePartitioner::new(path)).with_required_tools(Vec::new())
        }
        None => TableExtractor::new(UnstructuredPartitioner::with_python(&args.python)),
    }
    .with_max_partition(args.max_partition)
    .with_languages(args.languages);

    let extraction = extractor.extract(&args.input_file, args.strategy)?;

    match args.out {
        Some(path) => {
            let json = serde_json::to_string_pretty(&extraction)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Extracted {} table(s), written to {}",
                extraction.tables.len(),
                path.display()
            );
        }
        None => match args.output_format.as_str() {
            "json" => output::json::print(&extraction)?,
            "html" => output::html::print(&extraction),
            _ => output::table::print(&extraction),
        },
    }

    let code = match extraction.status {
        ExtractionStatus::PartitioningFailed { .. } => EXIT_PARTITIONING_FAILED,
        _ => 0,
    };
    Ok(code)
}
