use pdftables_core::error::PdfTablesError;
use pdftables_core::outcome::TableExtraction;

pub fn print(extraction: &TableExtraction) -> Result<(), PdfTablesError> {
    let json = serde_json::to_string_pretty(extraction)?;
    println!("{json}");
    Ok(())
}
