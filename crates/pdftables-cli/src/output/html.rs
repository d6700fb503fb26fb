use pdftables_core::outcome::TableExtraction;

/// Print each table's HTML, preceded by an HTML comment naming its position.
pub fn print(extraction: &TableExtraction) {
    for table in &extraction.tables {
        match table.page_number {
            Some(page) => println!("<!-- Table {} (page {}) -->", table.position, page),
            None => println!("<!-- Table {} -->", table.position),
        }
        println!("{}", table.html);
    }
}
