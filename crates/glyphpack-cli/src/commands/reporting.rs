use anyhow::{Context, Result};
use colored::Colorize;
use glyphpack_engine::{GlyphDiagnostic, SymbolEngine};
use glyphpack_spec::{
    FontDocument, Report, ReportBuilder, ReportError, ReportWarning, ValidationResult,
};
use std::fmt::Display;
use std::fs;
use std::path::Path;

use crate::codegen::{c_identifier, estimated_memory_bytes};

/// Where human-readable status goes.
///
/// Status is sent to stderr whenever generated code is streamed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Console {
    Stdout,
    Stderr,
}

impl Console {
    pub(crate) fn for_code_on_stdout(code_on_stdout: bool) -> Self {
        if code_on_stdout {
            Console::Stderr
        } else {
            Console::Stdout
        }
    }

    pub(crate) fn line(&self, text: impl Display) {
        match self {
            Console::Stdout => println!("{}", text),
            Console::Stderr => eprintln!("{}", text),
        }
    }

    pub(crate) fn blank(&self) {
        self.line("");
    }
}

pub(crate) fn print_document_info(console: Console, doc: &FontDocument) {
    console.line(format!("\n{}", "Document information:".cyan().bold()));
    console.line(format!("  {:<28}{}", "Font name:", doc.fontname));
    console.line(format!("  {:<28}{}", "Default width:", doc.width));
    console.line(format!("  {:<28}{}", "Default height:", doc.height));
    console.line(format!(
        "  {:<28}{}",
        "Default horizontal padding:", doc.padding_horizontal
    ));
    console.line(format!(
        "  {:<28}{}",
        "Default vertical padding:", doc.padding_vertical
    ));
    console.line(format!("  {:<28}{}", "Symbol count:", doc.symbols.len()));
}

pub(crate) fn print_statistics(console: Console, doc: &FontDocument, engine: &SymbolEngine) {
    console.line(format!("\n{}", "Statistics:".cyan().bold()));
    console.line(format!(
        "  {:<20}{} / {}",
        "Symbols parsed:",
        engine.descriptor_count(),
        doc.symbols.len()
    ));
    console.line(format!(
        "  {:<20}{} bytes",
        "Bytestream size:",
        engine.bitstream_size()
    ));
    console.line(format!(
        "  {:<20}{} bytes",
        "Total memory usage:",
        estimated_memory_bytes(engine)
    ));
}

/// Prints errors and warnings in the `  x [E011] at path: message` style.
pub(crate) fn print_findings(console: Console, validation: &ValidationResult) {
    if !validation.errors.is_empty() {
        console.line(format!("\n{}", "Errors:".red().bold()));
        for error in &validation.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            console.line(format!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            ));
        }
    }

    if !validation.warnings.is_empty() {
        console.line(format!("\n{}", "Warnings:".yellow().bold()));
        for warning in &validation.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            console.line(format!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            ));
        }
    }
}

/// Folds engine diagnostics into document findings.
pub(crate) fn with_diagnostics(
    mut validation: ValidationResult,
    diagnostics: &[GlyphDiagnostic],
) -> ValidationResult {
    for diagnostic in diagnostics {
        validation.add_error(diagnostic.to_validation_error());
    }
    validation
}

pub(crate) fn apply_validation_messages(
    mut builder: ReportBuilder,
    validation: &ValidationResult,
) -> ReportBuilder {
    for err in &validation.errors {
        builder = builder.error(ReportError::from_validation_error(err));
    }
    for warn in &validation.warnings {
        builder = builder.warning(ReportWarning::from_validation_warning(warn));
    }
    builder
}

/// Report file for a font, placed in `dir`.
pub(crate) fn report_path(dir: &Path, fontname: &str) -> String {
    dir.join(Report::filename(&c_identifier(fontname)))
        .to_string_lossy()
        .to_string()
}

/// Directory a file lives in, or `.` for a bare file name.
pub(crate) fn parent_dir(path: &str) -> &Path {
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

pub(crate) fn write_report(report: &Report, path: &str) -> Result<()> {
    let json = report.to_json_pretty().context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report to: {}", path))?;
    Ok(())
}

pub(crate) fn generator_version() -> String {
    format!("glyphpack-cli v{}", env!("CARGO_PKG_VERSION"))
}
