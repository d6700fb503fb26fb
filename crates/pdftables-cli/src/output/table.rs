use pdftables_core::outcome::{ExtractedTable, ExtractionStatus, TableExtraction};
use pdftables_core::DataFrame;

/// Widest a rendered column may get before its cells are truncated.
const MAX_COLUMN_WIDTH: usize = 40;

pub fn print(extraction: &TableExtraction) {
    print!("{}", format_extraction(extraction));
}

pub fn format_extraction(extraction: &TableExtraction) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} (strategy: {})\n\n",
        extraction.source.display(),
        extraction.strategy
    ));

    match &extraction.status {
        ExtractionStatus::NoTablesFound => {
            out.push_str("  No tables found.\n");
            return out;
        }
        ExtractionStatus::PartitioningFailed { reason } => {
            out.push_str(&format!("  Partitioning failed: {reason}\n"));
            return out;
        }
        ExtractionStatus::Extracted => {}
    }

    for table in &extraction.tables {
        out.push_str(&format_table(table));
        out.push('\n');
    }

    if !extraction.skipped.is_empty() {
        out.push_str("Skipped:\n");
        for skipped in &extraction.skipped {
            out.push_str(&format!("  Table {}: {}\n", skipped.position, skipped.reason));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "{} table(s), {} with data, {} skipped\n",
        extraction.tables.len(),
        extraction.dataframes().len(),
        extraction.skipped.len()
    ));

    out
}

fn format_table(table: &ExtractedTable) -> String {
    let title = match table.page_number {
        Some(page) => format!("=== Table {} (page {}) ===\n\n", table.position, page),
        None => format!("=== Table {} ===\n\n", table.position),
    };

    match &table.frame {
        Some(frame) => format!("{title}{}", format_frame(frame)),
        None => format!("{title}  (no data found in table HTML)\n"),
    }
}

/// Render a frame as aligned columns. Numeric columns are right-aligned.
pub fn format_frame(frame: &DataFrame) -> String {
    let rendered: Vec<Vec<String>> = frame
        .rows
        .iter()
        .map(|row| row.iter().map(|c| clip(&c.to_string())).collect())
        .collect();
    let headers: Vec<String> = frame.columns.iter().map(|c| clip(c)).collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rendered
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(headers[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let numeric: Vec<bool> = (0..headers.len())
        .map(|col| frame.is_numeric_column(col))
        .collect();

    let mut out = String::new();
    out.push_str(&format_row(&headers, &widths, &numeric));
    out.push_str(&format!(
        "  {}\n",
        "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1))
    ));
    for row in &rendered {
        out.push_str(&format_row(row, &widths, &numeric));
    }
    out
}

fn format_row(cells: &[String], widths: &[usize], numeric: &[bool]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(numeric)
        .map(|((cell, &width), &right)| {
            if right {
                format!("{:>width$}", cell, width = width)
            } else {
                format!("{:<width$}", cell, width = width)
            }
        })
        .collect();
    format!("  {}\n", padded.join("  ").trim_end())
}

fn clip(s: &str) -> String {
    if s.chars().count() <= MAX_COLUMN_WIDTH {
        return s.to_string();
    }
    let kept: String = s.chars().take(MAX_COLUMN_WIDTH - 3).collect();
    format!("{kept}...")
}
