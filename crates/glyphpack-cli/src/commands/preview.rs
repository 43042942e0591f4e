//! Preview command implementation
//!
//! Renders packed glyphs as framed ASCII art, read back from the bitstream.
//! Fonts with errors can still be previewed; only accepted glyphs appear.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::generate::build_font;
use super::reporting::{self, Console};
use crate::input::DEFAULT_INPUT;
use crate::render::{glyph_header, render_glyph};

/// Run the preview command
///
/// # Arguments
/// * `input` - Path to the font document (default: `symbols.json`)
/// * `marker` - Character treated as a set pixel
/// * `glyph` - Only preview glyphs with this name
///
/// # Returns
/// Exit code: 0 if every selected glyph rendered, 1 otherwise
pub fn run(input: Option<&str>, marker: char, glyph: Option<&str>) -> Result<ExitCode> {
    let input = input.unwrap_or(DEFAULT_INPUT);
    let console = Console::Stdout;

    console.line(format!("{} {}", "Previewing:".cyan().bold(), input));

    let build = build_font(Path::new(input), marker)
        .with_context(|| format!("Failed to load font document: {}", input))?;

    if build.engine.has_errors() {
        reporting::print_findings(console, &build.findings);
        console.line(format!(
            "\n{} {} glyph error(s); showing accepted glyphs only",
            "!".yellow(),
            build.engine.error_count()
        ));
    }

    let selected: Vec<_> = build
        .engine
        .descriptors()
        .iter()
        .filter(|d| glyph.map_or(true, |name| d.name() == name))
        .collect();

    if selected.is_empty() {
        if let Some(name) = glyph {
            console.line(format!(
                "\n{} No packed glyph named \"{}\"",
                "FAILED".red().bold(),
                name
            ));
            return Ok(ExitCode::from(1));
        }
    }

    let mut failures = 0usize;
    for descriptor in selected {
        console.blank();
        console.line(glyph_header(descriptor));
        console.blank();
        match render_glyph(&build.engine, descriptor) {
            Ok(rendered) => print!("{}", rendered),
            Err(e) => {
                failures += 1;
                console.line(format!("  {} [{}] {}", "x".red(), e.code().red(), e));
            }
        }
    }

    if failures == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        console.line(format!(
            "\n{} {} glyph(s) could not be rendered",
            "FAILED".red().bold(),
            failures
        ));
        Ok(ExitCode::from(1))
    }
}
