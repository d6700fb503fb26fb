use crate::error::PdfTablesError;
use crate::html::read_html;
use crate::outcome::{ExtractedTable, SkippedTable};
use crate::partition::Element;

/// Convert located table elements into tables.
///
/// Every element is handled on its own: one that cannot be converted is
/// logged and reported in the skipped list, and the rest carry on.
pub fn materialize(tables: &[Element]) -> (Vec<ExtractedTable>, Vec<SkippedTable>) {
    let mut extracted = Vec::new();
    let mut skipped = Vec::new();

    for (idx, element) in tables.iter().enumerate() {
        let position = idx + 1;
        match convert_table(position, element) {
            Ok(table) => {
                if table.frame.is_some() {
                    log::info!("Table {position} extracted successfully.");
                } else {
                    log::warn!("No data found in Table {position}");
                }
                extracted.push(table);
            }
            Err(e) => {
                let reason = match e {
                    PdfTablesError::TableConversion { reason, .. } => reason,
                    other => other.to_string(),
                };
                log::warn!("Error processing Table {position}: {reason}");
                skipped.push(SkippedTable {
                    position,
                    page_number: element.metadata.page_number,
                    reason,
                });
            }
        }
    }

    (extracted, skipped)
}

/// Convert one table element. `position` is 1-based.
pub fn convert_table(position: usize, element: &Element) -> Result<ExtractedTable, PdfTablesError> {
    let html = element
        .metadata
        .text_as_html
        .as_deref()
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| PdfTablesError::TableConversion {
            position,
            reason: "element metadata has no text_as_html".into(),
        })?;

    let frame = match read_html(html) {
        Ok(frames) => frames.into_iter().next(),
        Err(PdfTablesError::HtmlTable(e)) => {
            log::warn!("Table {position} is too large to parse: {e}");
            None
        }
        Err(e) => {
            return Err(PdfTablesError::TableConversion {
                position,
                reason: e.to_string(),
            })
        }
    };

    Ok(ExtractedTable {
        position,
        page_number: element.metadata.page_number,
        html: html.to_string(),
        frame,
    })
}
