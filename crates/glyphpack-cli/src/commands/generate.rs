//! Generate command implementation
//!
//! Packs a font document and emits C source for the bitstream and
//! descriptor table, followed by a report file.

use anyhow::{Context, Result};
use colored::Colorize;
use glyphpack_engine::SymbolEngine;
use glyphpack_spec::{
    canonical_document_hash, validate_document, FontDocument, Report, ReportBuilder,
    ValidationResult, DEFAULT_SET_MARKER,
};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::reporting::{self, Console};
use crate::codegen::{
    generate_c_source, oversized_descriptors, CodegenOptions, DEFAULT_BYTES_PER_LINE,
};
use crate::input::{load_font, LoadResult, DEFAULT_INPUT};

/// Settings shared by `generate` and `generate-all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Character treated as a set pixel.
    pub marker: char,
    /// Hex values per line in the data array.
    pub bytes_per_line: usize,
    /// Whether to write a `<font>.report.json` file.
    pub write_report: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            marker: DEFAULT_SET_MARKER,
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
            write_report: true,
        }
    }
}

impl GenerateOptions {
    pub(crate) fn codegen(&self) -> CodegenOptions {
        CodegenOptions {
            bytes_per_line: self.bytes_per_line,
            generator: Some(reporting::generator_version()),
        }
    }
}

/// A loaded and packed font with everything found along the way.
pub(crate) struct FontBuild {
    pub(crate) document: FontDocument,
    pub(crate) engine: SymbolEngine,
    pub(crate) findings: ValidationResult,
    pub(crate) document_hash: String,
}

pub(crate) fn build_font(path: &Path, marker: char) -> Result<FontBuild> {
    let LoadResult { document, .. } = load_font(path)?;
    let document_hash =
        canonical_document_hash(&document).context("Failed to hash font document")?;
    let engine = SymbolEngine::from_document(&document, marker);
    let findings = reporting::with_diagnostics(validate_document(&document), engine.diagnostics());

    Ok(FontBuild {
        document,
        engine,
        findings,
        document_hash,
    })
}

pub(crate) fn build_report(build: &FontBuild, output: Option<&str>, duration_ms: u64) -> Report {
    let mut builder = ReportBuilder::new(build.document_hash.clone(), reporting::generator_version())
        .fontname(&build.document.fontname)
        .glyphs(build.document.symbols.len(), build.engine.descriptor_count())
        .bitstream(build.engine.bitstream())
        .duration_ms(duration_ms);
    if let Some(path) = output {
        builder = builder.output(path);
    }
    reporting::apply_validation_messages(builder, &build.findings).build()
}

/// Run the generate command
///
/// # Arguments
/// * `input` - Path to the font document (default: `symbols.json`)
/// * `output` - File to write the C source to (default: stdout)
/// * `options` - Marker, formatting, and report settings
///
/// # Returns
/// Exit code: 0 if code was generated, 1 if the font has errors
pub fn run(input: Option<&str>, output: Option<&str>, options: &GenerateOptions) -> Result<ExitCode> {
    let start = Instant::now();
    let input = input.unwrap_or(DEFAULT_INPUT);
    let console = Console::for_code_on_stdout(output.is_none());

    console.line(format!("{} {}", "Generating:".cyan().bold(), input));

    let build = build_font(Path::new(input), options.marker)
        .with_context(|| format!("Failed to load font document: {}", input))?;

    reporting::print_document_info(console, &build.document);
    reporting::print_statistics(console, &build.document, &build.engine);
    reporting::print_findings(console, &build.findings);

    let report_dir = reporting::parent_dir(output.unwrap_or(input));
    let report_path = reporting::report_path(report_dir, &build.document.fontname);

    if build.engine.has_errors() {
        if options.write_report {
            let report = build_report(&build, None, start.elapsed().as_millis() as u64);
            reporting::write_report(&report, &report_path)?;
            console.line(format!("\n{} {}", "Report written to:".dimmed(), report_path));
        }
        console.line(format!(
            "\n{} Code output generation failed due to {} error(s) ({}ms)",
            "FAILED".red().bold(),
            build.engine.error_count(),
            start.elapsed().as_millis()
        ));
        return Ok(ExitCode::from(1));
    }

    let source = generate_c_source(&build.document.fontname, &build.engine, &options.codegen())?;

    for descriptor in oversized_descriptors(&build.engine) {
        console.line(format!(
            "  {} glyph \"{}\" does not fit the generated uint8_t/uint32_t fields",
            "!".yellow(),
            descriptor.name()
        ));
    }

    match output {
        Some(path) => {
            fs::write(path, &source)
                .with_context(|| format!("Failed to write output: {}", path))?;
        }
        None => print!("{}", source),
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    if options.write_report {
        let report = build_report(&build, output, duration_ms);
        reporting::write_report(&report, &report_path)?;
        console.line(format!("\n{} {}", "Report written to:".dimmed(), report_path));
    }

    console.line(format!(
        "\n{} Generated {} ({}ms)",
        "SUCCESS".green().bold(),
        output.unwrap_or("<stdout>"),
        duration_ms
    ));
    Ok(ExitCode::SUCCESS)
}
