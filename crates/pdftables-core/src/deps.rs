use crate::error::PdfTablesError;
use std::process::Command;

/// An external executable the partitioning engine shells out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredTool {
    /// Human-readable name used in diagnostics (e.g., "Poppler").
    pub name: &'static str,
    /// Executable looked up on PATH.
    pub program: &'static str,
    /// Argument that makes the program print a banner and exit.
    pub version_arg: &'static str,
    /// Start of the program's own version banner (e.g., "pdfinfo version").
    pub banner: &'static str,
    /// Distribution package that provides the program.
    pub package: &'static str,
    /// Install command per platform, in display order.
    pub install: &'static [(&'static str, &'static str)],
}

/// Poppler, checked through `pdfinfo`. Used to rasterize and inspect PDF pages.
pub const POPPLER: RequiredTool = RequiredTool {
    name: "Poppler",
    program: "pdfinfo",
    version_arg: "-v",
    banner: "pdfinfo version",
    package: "poppler-utils",
    install: &[
        ("Windows", "choco install poppler"),
        ("MacOS", "brew install poppler"),
        ("Linux", "sudo apt-get install poppler-utils"),
    ],
};

/// Tesseract OCR engine, needed by the high-resolution strategies.
pub const TESSERACT: RequiredTool = RequiredTool {
    name: "Tesseract",
    program: "tesseract",
    version_arg: "--version",
    banner: "tesseract ",
    package: "tesseract-ocr",
    install: &[
        ("Windows", "choco install tesseract"),
        ("MacOS", "brew install tesseract"),
        ("Linux", "sudo apt-get install tesseract-ocr"),
    ],
};

/// Tools checked before every extraction, in this order.
pub const DEFAULT_TOOLS: [RequiredTool; 2] = [POPPLER, TESSERACT];

impl RequiredTool {
    /// Installation instructions shown when the tool is missing.
    pub fn remediation(&self) -> String {
        let mut text = format!("Please install {}:", self.package);
        for (platform, command) in self.install {
            text.push_str(&format!("\n- {platform}: {command}"));
        }
        text
    }

    fn missing(&self) -> PdfTablesError {
        PdfTablesError::MissingDependency {
            tool: self.name.to_string(),
            program: self.program.to_string(),
            remediation: self.remediation(),
        }
    }
}

/// Verify that `tool` can be launched from the current environment.
///
/// A successful exit passes. Older poppler builds exit non-zero on `-v`
/// while still printing their version banner, so a failed exit is accepted
/// only when the output carries the tool's own banner. Loader errors and
/// crashes fail the check.
pub fn check_tool(tool: &RequiredTool) -> Result<(), PdfTablesError> {
    let output = match Command::new(tool.program).arg(tool.version_arg).output() {
        Ok(output) => output,
        Err(e) => {
            log::debug!("failed to launch {}: {}", tool.program, e);
            return Err(tool.missing());
        }
    };

    if output.status.success() {
        return Ok(());
    }

    let printed = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    if has_banner(&printed, tool.banner) {
        log::debug!(
            "{} {} exited with {} but printed its version banner; treating as installed",
            tool.program,
            tool.version_arg,
            output.status
        );
        return Ok(());
    }

    log::debug!(
        "{} {} exited with {}: {}",
        tool.program,
        tool.version_arg,
        output.status,
        printed.trim()
    );
    Err(tool.missing())
}

fn has_banner(output: &str, banner: &str) -> bool {
    output.lines().any(|line| line.trim_start().starts_with(banner))
}

/// Check every tool in order, failing on the first one that is missing.
pub fn check_dependencies(tools: &[RequiredTool]) -> Result<(), PdfTablesError> {
    for tool in tools {
        check_tool(tool)?;
    }
    Ok(())
}

pub fn is_available(tool: &RequiredTool) -> bool {
    check_tool(tool).is_ok()
}
