//! Integration tests for the TableExtractor pipeline.
//!
//! Uses a MockPartitioner that returns pre-built elements without invoking
//! the partitioning engine, and an empty tool list so the tests run without
//! poppler-utils or tesseract installed. Log records are captured per test
//! thread so the diagnostic lines can be asserted.

use pdftables_core::deps::RequiredTool;
use pdftables_core::error::PdfTablesError;
use pdftables_core::outcome::ExtractionStatus;
use pdftables_core::partition::{
    Element, ElementCategory, ElementMetadata, ElementsFilePartitioner, PartitionConfig,
    Partitioner, Strategy,
};
use pdftables_core::{Cell, TableExtractor};
use rust_decimal_macros::dec;
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------
thread_local! {
    static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.target().starts_with("pdftables_core")
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Install the capturing logger (once per process) and clear this thread's records.
fn capture_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Info);
    });
    RECORDS.with(|r| r.borrow_mut().clear());
}

/// Messages logged on this thread at `level`, in order.
fn logged(level: log::Level) -> Vec<String> {
    RECORDS.with(|r| {
        r.borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    })
}

enum MockOutcome {
    Elements(Vec<Element>),
    Fail(PdfTablesError),
}

struct MockPartitioner {
    outcome: Mutex<Option<MockOutcome>>,
    calls: Arc<AtomicUsize>,
    seen_config: Arc<Mutex<Option<PartitionConfig>>>,
}

impl MockPartitioner {
    fn new(outcome: MockOutcome) -> Self {
        MockPartitioner {
            outcome: Mutex::new(Some(outcome)),
            calls: Arc::new(AtomicUsize::new(0)),
            seen_config: Arc::new(Mutex::new(None)),
        }
    }
}

impl Partitioner for MockPartitioner {
    fn partition(
        &self,
        _path: &Path,
        config: &PartitionConfig,
    ) -> Result<Vec<Element>, PdfTablesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_config.lock().unwrap() = Some(config.clone());
        match self.outcome.lock().unwrap().take() {
            Some(MockOutcome::Elements(elements)) => Ok(elements),
            Some(MockOutcome::Fail(e)) => Err(e),
            None => panic!("partition called twice"),
        }
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn element(category: ElementCategory, page: u32, html: Option<&str>) -> Element {
    Element {
        category,
        element_id: None,
        text: String::new(),
        metadata: ElementMetadata {
            text_as_html: html.map(str::to_string),
            page_number: Some(page),
            filename: Some("report.pdf".into()),
        },
    }
}

fn table(page: u32, html: &str) -> Element {
    element(ElementCategory::Table, page, Some(html))
}

fn extractor(outcome: MockOutcome) -> TableExtractor {
    TableExtractor::new(MockPartitioner::new(outcome)).with_required_tools(Vec::new())
}

const REVENUE: &str = "<table><thead><tr><th>Region</th><th>Revenue</th></tr></thead>\
    <tbody><tr><td>North</td><td>1,250</td></tr><tr><td>South</td><td>980</td></tr></tbody></table>";

const HEADCOUNT: &str = "<table><tr><th>Team</th><th>People</th></tr>\
    <tr><td>Ops</td><td>12</td></tr></table>";

// ---------------------------------------------------------------------------
// Dependency gate
// ---------------------------------------------------------------------------
#[test]
fn missing_dependency_fails_before_partitioning() {
    let missing = RequiredTool {
        name: "Poppler",
        program: "pdftables-test-missing-pdfinfo",
        version_arg: "-v",
        banner: "pdfinfo version",
        package: "poppler-utils",
        install: &[
            ("Windows", "choco install poppler"),
            ("MacOS", "brew install poppler"),
            ("Linux", "sudo apt-get install poppler-utils"),
        ],
    };
    let partitioner = MockPartitioner::new(MockOutcome::Elements(vec![table(1, REVENUE)]));
    let calls = partitioner.calls.clone();
    let extractor = TableExtractor::new(partitioner).with_required_tools(vec![missing]);

    let err = extractor.extract("report.pdf", Strategy::HiRes).unwrap_err();

    assert!(err.is_missing_dependency());
    let message = err.to_string();
    assert!(message.contains("Poppler is not installed or not in PATH"));
    assert!(message.contains("brew install poppler"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_dependency_from_engine_is_propagated() {
    let extractor = extractor(MockOutcome::Fail(PdfTablesError::MissingDependency {
        tool: "Tesseract".into(),
        program: "tesseract".into(),
        remediation: "Please install tesseract-ocr:".into(),
    }));
    let err = extractor.extract("report.pdf", Strategy::HiRes).unwrap_err();
    assert!(err.is_missing_dependency());
}

// ---------------------------------------------------------------------------
// Engine configuration
// ---------------------------------------------------------------------------
#[test]
fn engine_receives_fixed_configuration() {
    let partitioner = MockPartitioner::new(MockOutcome::Elements(Vec::new()));
    let seen = partitioner.seen_config.clone();
    let extractor = TableExtractor::new(partitioner)
        .with_required_tools(Vec::new())
        .with_languages(vec!["eng".into(), "deu".into()]);

    extractor.extract("report.pdf", Strategy::Fast).unwrap();

    let config = seen.lock().unwrap().clone().unwrap();
    assert_eq!(config.strategy, Strategy::Fast);
    assert!(config.infer_table_structure);
    assert!(!config.include_page_breaks);
    assert!(config.include_metadata);
    assert_eq!(config.max_partition, Some(20));
    assert_eq!(config.languages, ["eng", "deu"]);
}

// ---------------------------------------------------------------------------
// No tables
// ---------------------------------------------------------------------------
#[test]
fn document_without_tables_returns_empty() {
    capture_logs();
    let extractor = extractor(MockOutcome::Elements(vec![
        element(ElementCategory::Title, 1, None),
        element(ElementCategory::NarrativeText, 1, None),
        element(ElementCategory::Image, 2, None),
    ]));

    let result = extractor.extract("memo.pdf", Strategy::HiRes).unwrap();

    assert_eq!(result.status, ExtractionStatus::NoTablesFound);
    let (frames, html) = result.into_parts();
    assert!(frames.is_empty());
    assert!(html.is_empty());
    assert_eq!(logged(log::Level::Info), ["No tables found in the PDF."]);
    assert!(logged(log::Level::Warn).is_empty());
}

// ---------------------------------------------------------------------------
// Two tables and an image
// ---------------------------------------------------------------------------
#[test]
fn two_tables_and_an_image() {
    capture_logs();
    let extractor = extractor(MockOutcome::Elements(vec![
        element(ElementCategory::Title, 1, None),
        table(1, REVENUE),
        element(ElementCategory::Image, 2, None),
        table(3, HEADCOUNT),
    ]));

    let result = extractor.extract("report.pdf", Strategy::HiRes).unwrap();

    assert_eq!(result.status, ExtractionStatus::Extracted);
    assert!(result.skipped.is_empty());
    assert_eq!(result.html(), [REVENUE, HEADCOUNT]);

    let frames = result.dataframes();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].columns, ["Region", "Revenue"]);
    assert_eq!(frames[0].cell(0, 1), Some(&Cell::Number(dec!(1250))));
    assert_eq!(frames[1].columns, ["Team", "People"]);
    assert_eq!(result.tables[1].page_number, Some(3));

    assert_eq!(
        logged(log::Level::Info),
        ["Table 1 extracted successfully.", "Table 2 extracted successfully."]
    );
    assert!(logged(log::Level::Warn).is_empty());
}

// ---------------------------------------------------------------------------
// Order preservation
// ---------------------------------------------------------------------------
#[test]
fn tables_keep_document_order() {
    let htmls: Vec<String> = (1..=5)
        .map(|i| format!("<table><tr><td>table {i}</td></tr></table>"))
        .collect();
    let elements = htmls
        .iter()
        .enumerate()
        .flat_map(|(i, h)| {
            vec![
                element(ElementCategory::NarrativeText, i as u32 + 1, None),
                table(i as u32 + 1, h),
            ]
        })
        .collect();

    let result = extractor(MockOutcome::Elements(elements))
        .extract("report.pdf", Strategy::HiRes)
        .unwrap();

    assert_eq!(result.html(), htmls.iter().map(String::as_str).collect::<Vec<_>>());
    let positions: Vec<usize> = result.tables.iter().map(|t| t.position).collect();
    assert_eq!(positions, [1, 2, 3, 4, 5]);
    for (i, frame) in result.dataframes().iter().enumerate() {
        assert_eq!(frame.cell(0, 0), Some(&Cell::Text(format!("table {}", i + 1))));
    }
}

// ---------------------------------------------------------------------------
// Per-table failures are isolated
// ---------------------------------------------------------------------------
#[test]
fn table_without_readable_markup_keeps_html_only() {
    capture_logs();
    let extractor = extractor(MockOutcome::Elements(vec![
        table(1, REVENUE),
        table(2, "<div>Figure 3: not really a table</div>"),
        table(3, HEADCOUNT),
    ]));

    let result = extractor.extract("report.pdf", Strategy::HiRes).unwrap();

    assert_eq!(result.tables.len(), 3);
    assert!(result.tables[1].frame.is_none());
    assert_eq!(result.tables[1].position, 2);

    let (frames, html) = result.into_parts();
    assert_eq!(frames.len(), 2);
    assert_eq!(html.len(), 3);

    assert_eq!(
        logged(log::Level::Info),
        ["Table 1 extracted successfully.", "Table 3 extracted successfully."]
    );
    assert_eq!(logged(log::Level::Warn), ["No data found in Table 2"]);
}

#[test]
fn long_table_converts_and_oversized_table_keeps_html() {
    capture_logs();
    let rows: String = (0..1_001)
        .map(|i| format!("<tr><td>line {i}</td><td>{i}</td></tr>"))
        .collect();
    let long = format!("<table><thead><tr><th>Line</th><th>Amount</th></tr></thead><tbody>{rows}</tbody></table>");
    let oversized = format!(
        "<table><tr>{}</tr></table>",
        "<td colspan=\"100\">x</td>".repeat(101)
    );
    let extractor = extractor(MockOutcome::Elements(vec![table(1, &long), table(2, &oversized)]));

    let result = extractor.extract("ledger.pdf", Strategy::HiRes).unwrap();

    assert!(result.skipped.is_empty());
    assert_eq!(result.tables.len(), 2);
    assert_eq!(result.tables[0].frame.as_ref().unwrap().shape(), (1_001, 2));
    assert!(result.tables[1].frame.is_none());
    assert_eq!(result.tables[1].html, oversized);

    assert_eq!(logged(log::Level::Info), ["Table 1 extracted successfully."]);
    assert_eq!(
        logged(log::Level::Warn),
        [
            "Table 2 is too large to parse: table grid exceeds 10000 columns",
            "No data found in Table 2",
        ]
    );
}

#[test]
fn table_without_html_is_skipped_entirely() {
    capture_logs();
    let extractor = extractor(MockOutcome::Elements(vec![
        table(1, REVENUE),
        element(ElementCategory::Table, 2, None),
        table(3, HEADCOUNT),
    ]));

    let result = extractor.extract("report.pdf", Strategy::HiRes).unwrap();

    assert_eq!(result.status, ExtractionStatus::Extracted);
    assert_eq!(result.html(), [REVENUE, HEADCOUNT]);
    assert_eq!(result.dataframes().len(), 2);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].position, 2);
    assert_eq!(result.skipped[0].page_number, Some(2));

    assert_eq!(
        logged(log::Level::Info),
        ["Table 1 extracted successfully.", "Table 3 extracted successfully."]
    );
    assert_eq!(
        logged(log::Level::Warn),
        [
            "Error processing Table 2: element metadata has no text_as_html",
            "1 of 3 tables could not be converted",
        ]
    );
}

// ---------------------------------------------------------------------------
// Engine failure
// ---------------------------------------------------------------------------
#[test]
fn engine_failure_degrades_to_empty_result() {
    capture_logs();
    let extractor = extractor(MockOutcome::Fail(PdfTablesError::Partitioning(
        "PDFSyntaxError: No /Root object! - Is this really a PDF?".into(),
    )));

    let result = extractor.extract("corrupt.pdf", Strategy::HiRes).unwrap();

    match &result.status {
        ExtractionStatus::PartitioningFailed { reason } => {
            assert!(reason.contains("No /Root object"));
        }
        other => panic!("unexpected status: {other:?}"),
    }
    assert!(result.is_empty());
    let (frames, html) = result.into_parts();
    assert!(frames.is_empty());
    assert!(html.is_empty());

    assert_eq!(
        logged(log::Level::Warn),
        ["⚠️ Error extracting tables: PDFSyntaxError: No /Root object! - Is this really a PDF?"]
    );
    assert!(logged(log::Level::Info).is_empty());
}

#[test]
fn io_failure_in_engine_is_not_raised() {
    let extractor = extractor(MockOutcome::Fail(PdfTablesError::Io(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "permission denied",
    ))));

    let result = extractor.extract("locked.pdf", Strategy::OcrOnly).unwrap();

    assert!(matches!(
        result.status,
        ExtractionStatus::PartitioningFailed { .. }
    ));
    assert_eq!(result.strategy, Strategy::OcrOnly);
}

// ---------------------------------------------------------------------------
// Replaying saved elements
// ---------------------------------------------------------------------------
#[test]
fn saved_elements_replay_end_to_end() {
    let elements = serde_json::json!([
        {"type": "Title", "element_id": "t1", "text": "Annual report", "metadata": {"page_number": 1}},
        {"type": "PageBreak", "text": ""},
        {"type": "Table", "element_id": "t2", "text": "Region Revenue",
         "metadata": {"page_number": 2, "text_as_html": REVENUE}}
    ]);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(elements.to_string().as_bytes()).unwrap();

    let extractor =
        TableExtractor::new(ElementsFilePartitioner::new(file.path())).with_required_tools(Vec::new());
    assert_eq!(extractor.backend_name(), "elements-file");

    let result = extractor.extract("annual.pdf", Strategy::HiRes).unwrap();

    assert_eq!(result.tables.len(), 1);
    assert_eq!(result.tables[0].page_number, Some(2));
    let frame = result.tables[0].frame.as_ref().unwrap();
    assert_eq!(frame.shape(), (2, 2));
    assert!(frame.is_numeric_column(1));
}
