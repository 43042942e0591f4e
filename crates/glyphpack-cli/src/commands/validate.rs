//! Validate command implementation
//!
//! Loads a font document, packs it, and reports every problem without
//! writing any output.

use anyhow::{Context, Result};
use colored::Colorize;
use glyphpack_engine::SymbolEngine;
use glyphpack_spec::{canonical_document_hash, validate_document, DEFAULT_SET_MARKER};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{
    diagnostic_to_json, input_error_to_json, validation_error_to_json,
    validation_warning_to_json, JsonError, JsonWarning, ValidateOutput, ValidateResult,
};
use super::reporting::{self, Console};
use crate::codegen::estimated_memory_bytes;
use crate::input::{load_font, LoadResult};

/// Run the validate command
///
/// # Arguments
/// * `input` - Path to the font document
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input)
    } else {
        run_human(input)
    }
}

/// Run validate with human-readable (colored) output
fn run_human(input: &str) -> Result<ExitCode> {
    let start = Instant::now();
    let console = Console::Stdout;

    console.line(format!("{} {}", "Validating:".cyan().bold(), input));

    let LoadResult {
        document,
        source_hash,
    } = load_font(Path::new(input))
        .with_context(|| format!("Failed to load font document: {}", input))?;

    console.line(format!("{} {}", "Source:".dimmed(), &source_hash[..16]));
    reporting::print_document_info(console, &document);

    let engine = SymbolEngine::from_document(&document, DEFAULT_SET_MARKER);
    let findings = reporting::with_diagnostics(validate_document(&document), engine.diagnostics());

    reporting::print_statistics(console, &document, &engine);
    reporting::print_findings(console, &findings);

    let duration_ms = start.elapsed().as_millis() as u64;
    if findings.is_ok() {
        console.line(format!(
            "\n{} Font is valid ({}ms)",
            "SUCCESS".green().bold(),
            duration_ms
        ));
        Ok(ExitCode::SUCCESS)
    } else {
        console.line(format!(
            "\n{} Font has {} error(s) ({}ms)",
            "FAILED".red().bold(),
            findings.errors.len(),
            duration_ms
        ));
        Ok(ExitCode::from(1))
    }
}

/// Run validate with machine-readable JSON output
fn run_json(input: &str) -> Result<ExitCode> {
    let start = Instant::now();

    let output = match load_font(Path::new(input)) {
        Ok(LoadResult {
            document,
            source_hash,
        }) => {
            let engine = SymbolEngine::from_document(&document, DEFAULT_SET_MARKER);
            let document_validation = validate_document(&document);

            let errors: Vec<JsonError> = document_validation
                .errors
                .iter()
                .map(validation_error_to_json)
                .chain(engine.diagnostics().iter().map(diagnostic_to_json))
                .collect();
            let warnings: Vec<JsonWarning> = document_validation
                .warnings
                .iter()
                .map(validation_warning_to_json)
                .collect();

            let document_hash =
                canonical_document_hash(&document).context("Failed to hash font document")?;
            let result = ValidateResult {
                fontname: document.fontname.clone(),
                glyphs_declared: document.symbols.len(),
                glyphs_packed: engine.descriptor_count(),
                bitstream_bytes: engine.bitstream_size(),
                estimated_memory_bytes: estimated_memory_bytes(&engine),
                duration_ms: start.elapsed().as_millis() as u64,
            };
            ValidateOutput::loaded(result, errors, warnings, document_hash, source_hash)
        }
        Err(e) => ValidateOutput::failure(input_error_to_json(&e, Some(input))),
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
    println!("{}", json);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
