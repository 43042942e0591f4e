//! Generate-all command implementation
//!
//! Generates a C header for every font document in a directory tree and
//! keeps going when individual fonts fail.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use walkdir::WalkDir;

use super::generate::{build_font, build_report, GenerateOptions};
use super::reporting;
use crate::codegen::{c_identifier, generate_c_source};

/// Result of generating a single font
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FontResult {
    /// Path to the font document
    pub input: String,
    /// Font name (if the document could be loaded)
    pub fontname: Option<String>,
    /// Path of the generated header (on success)
    pub output: Option<String>,
    /// Whether generation succeeded
    pub success: bool,
    /// Error message if failed
    pub error: Option<String>,
    /// BLAKE3 hash of the packed bitstream
    pub bitstream_hash: Option<String>,
    /// Generation time in milliseconds
    pub duration_ms: u64,
}

/// Summary report for all generations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Total fonts processed
    pub total_fonts: usize,
    /// Successful generations
    pub successful: usize,
    /// Failed generations
    pub failed: usize,
    /// Total runtime in seconds
    pub runtime_seconds: f64,
    /// Per-font results
    pub fonts: Vec<FontResult>,
}

/// File name of the summary written to the output directory.
pub const SUMMARY_FILENAME: &str = "generation_summary.json";

/// Run the generate-all command
///
/// # Arguments
/// * `input_dir` - Directory searched recursively for `*.json` font documents
/// * `out_dir` - Directory receiving headers, reports, and the summary
/// * `options` - Marker, formatting, and report settings
///
/// # Returns
/// Exit code: 0 if every font generated, 1 if any failed
pub fn run(input_dir: &str, out_dir: &str, options: &GenerateOptions) -> Result<ExitCode> {
    let start = Instant::now();
    let input_path = Path::new(input_dir);
    let out_path = Path::new(out_dir);

    if !input_path.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", input_dir);
    }

    println!("{} {}", "Input directory:".cyan().bold(), input_dir);
    println!("{} {}", "Output directory:".cyan().bold(), out_dir);

    fs::create_dir_all(out_path)
        .with_context(|| format!("Failed to create output directory: {}", out_dir))?;

    let fonts = collect_fonts(input_path);
    println!(
        "{} Found {} font documents to process\n",
        "INFO".blue().bold(),
        fonts.len()
    );

    let mut results = Vec::with_capacity(fonts.len());
    for font in &fonts {
        let result = process_font(font, out_path, options);
        if result.success {
            println!(
                "  {} {} ({}ms)",
                "SUCCESS".green(),
                result.input,
                result.duration_ms
            );
        } else {
            println!(
                "  {} {} - {}",
                "FAILED".red(),
                result.input,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
        results.push(result);
    }

    let successful = results.iter().filter(|r| r.success).count();
    let summary = GenerationSummary {
        total_fonts: results.len(),
        successful,
        failed: results.len() - successful,
        runtime_seconds: start.elapsed().as_secs_f64(),
        fonts: results,
    };

    println!();
    println!("{} {}", "Total fonts processed:".cyan().bold(), summary.total_fonts);
    println!("{} {}", "Successful:".green().bold(), summary.successful);
    println!("{} {}", "Failed:".red().bold(), summary.failed);
    println!(
        "{} {:.2}s",
        "Total runtime:".cyan().bold(),
        summary.runtime_seconds
    );

    let summary_path = out_path.join(SUMMARY_FILENAME);
    let summary_json =
        serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    fs::write(&summary_path, summary_json)
        .with_context(|| format!("Failed to write summary: {}", summary_path.display()))?;
    println!("{} {}", "Summary report:".cyan().bold(), summary_path.display());

    if summary.failed > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Font documents under `dir`, sorted, skipping reports and summaries.
fn collect_fonts(dir: &Path) -> Vec<PathBuf> {
    let mut fonts: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| {
            path.is_file()
                && path.extension().is_some_and(|ext| ext == "json")
                && !path.file_name().is_some_and(|name| {
                    let name = name.to_string_lossy();
                    name.contains(".report.") || name == SUMMARY_FILENAME
                })
        })
        .collect();
    fonts.sort();
    fonts
}

/// Process a single font document
fn process_font(path: &Path, out_dir: &Path, options: &GenerateOptions) -> FontResult {
    let start = Instant::now();
    let mut result = FontResult {
        input: path.display().to_string(),
        fontname: None,
        output: None,
        success: false,
        error: None,
        bitstream_hash: None,
        duration_ms: 0,
    };

    let build = match build_font(path, options.marker) {
        Ok(build) => build,
        Err(e) => {
            result.error = Some(format!("{:#}", e));
            result.duration_ms = start.elapsed().as_millis() as u64;
            return result;
        }
    };
    result.fontname = Some(build.document.fontname.clone());

    let header_path = out_dir.join(format!("{}.h", c_identifier(&build.document.fontname)));
    let header = header_path.to_string_lossy().to_string();

    let outcome = generate_c_source(&build.document.fontname, &build.engine, &options.codegen())
        .map_err(anyhow::Error::from)
        .and_then(|source| {
            fs::write(&header_path, source)
                .with_context(|| format!("Failed to write output: {}", header))
        });

    result.duration_ms = start.elapsed().as_millis() as u64;
    let written = outcome.is_ok().then_some(header.as_str());

    if options.write_report {
        let report = build_report(&build, written, result.duration_ms);
        let report_path = reporting::report_path(out_dir, &build.document.fontname);
        if let Err(e) = reporting::write_report(&report, &report_path) {
            result.error = Some(format!("{:#}", e));
            return result;
        }
    }

    match outcome {
        Ok(()) => {
            result.success = true;
            result.output = Some(header);
            result.bitstream_hash = Some(glyphpack_spec::blake3_hash(build.engine.bitstream()));
        }
        Err(e) => result.error = Some(format!("{:#}", e)),
    }
    result
}
