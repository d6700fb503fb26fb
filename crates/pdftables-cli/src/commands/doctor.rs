use pdftables_core::deps::{self, DEFAULT_TOOLS};
use pdftables_core::error::PdfTablesError;
use pdftables_core::partition::UnstructuredPartitioner;

pub fn run(python: &str) -> Result<i32, PdfTablesError> {
    let mut missing = Vec::new();

    println!("External tools:\n");
    for tool in &DEFAULT_TOOLS {
        match deps::check_tool(tool) {
            Ok(()) => println!("  {:<10} ok ({})", tool.name, tool.program),
            Err(e) => {
                println!("  {:<10} missing ({})", tool.name, tool.program);
                missing.push(e.to_string());
            }
        }
    }

    let engine = UnstructuredPartitioner::with_python(python);
    if engine.is_available() {
        println!("  {:<10} ok ({})", "unstructured", engine.python());
    } else {
        println!("  {:<10} missing ({})", "unstructured", engine.python());
        missing.push(format!(
            "{} cannot import unstructured. Install it with: {} -m pip install \"unstructured[pdf]\"",
            engine.python(),
            engine.python()
        ));
    }
    println!();

    if missing.is_empty() {
        println!("All dependencies found.");
        return Ok(0);
    }

    for message in &missing {
        println!("{message}\n");
    }
    Ok(1)
}
