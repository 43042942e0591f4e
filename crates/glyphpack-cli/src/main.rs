//! glyphpack CLI - pack pixel-art fonts into C arrays
//!
//! This binary validates font documents, generates C source for their packed
//! bitstream and descriptor table, and previews the packed glyphs.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use glyphpack_cli::codegen::DEFAULT_BYTES_PER_LINE;
use glyphpack_cli::commands;
use glyphpack_cli::commands::generate::GenerateOptions;

/// glyphpack - monochrome glyph packer for embedded displays
#[derive(Parser)]
#[command(name = "glyphpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a font document without generating code
    Validate {
        /// Path to the font document
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate C source from a font document
    Generate {
        /// Path to the font document (default: symbols.json)
        #[arg(short, long)]
        input: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Character that marks a set pixel
        #[arg(short, long, default_value_t = '#')]
        marker: char,

        /// Hex values per line in the data array
        #[arg(long, default_value_t = DEFAULT_BYTES_PER_LINE as u16, value_parser = clap::value_parser!(u16).range(1..))]
        bytes_per_line: u16,

        /// Skip writing the <font>.report.json file
        #[arg(long)]
        no_report: bool,
    },

    /// Render packed glyphs as ASCII art
    Preview {
        /// Path to the font document (default: symbols.json)
        #[arg(short, long)]
        input: Option<String>,

        /// Character that marks a set pixel
        #[arg(short, long, default_value_t = '#')]
        marker: char,

        /// Only preview the glyph with this name
        #[arg(short, long)]
        glyph: Option<String>,
    },

    /// Generate C headers for every font document in a directory
    GenerateAll {
        /// Directory searched recursively for *.json font documents
        #[arg(long)]
        input_dir: String,

        /// Directory receiving headers, reports, and the summary
        #[arg(long)]
        out_dir: String,

        /// Character that marks a set pixel
        #[arg(short, long, default_value_t = '#')]
        marker: char,

        /// Hex values per line in the data array
        #[arg(long, default_value_t = DEFAULT_BYTES_PER_LINE as u16, value_parser = clap::value_parser!(u16).range(1..))]
        bytes_per_line: u16,

        /// Skip writing per-font report files
        #[arg(long)]
        no_report: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { input, json } => commands::validate::run(&input, json),
        Commands::Generate {
            input,
            output,
            marker,
            bytes_per_line,
            no_report,
        } => {
            let options = GenerateOptions {
                marker,
                bytes_per_line: bytes_per_line as usize,
                write_report: !no_report,
            };
            commands::generate::run(input.as_deref(), output.as_deref(), &options)
        }
        Commands::Preview {
            input,
            marker,
            glyph,
        } => commands::preview::run(input.as_deref(), marker, glyph.as_deref()),
        Commands::GenerateAll {
            input_dir,
            out_dir,
            marker,
            bytes_per_line,
            no_report,
        } => {
            let options = GenerateOptions {
                marker,
                bytes_per_line: bytes_per_line as usize,
                write_report: !no_report,
            };
            commands::generate_all::run(&input_dir, &out_dir, &options)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
