//! Test harness for running glyphpack commands and reading their outputs.
//!
//! Commands are called as library functions rather than through a
//! subprocess, so tests see the same exit codes `main` would return.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glyphpack_cli::codegen::c_identifier;
use glyphpack_cli::commands::generate::{self, GenerateOptions};
use glyphpack_cli::commands::{generate_all, validate};
use glyphpack_cli::input::load_font;
use glyphpack_spec::Report;

use crate::fixtures::FontFixture;

/// Outcome of one `generate` run.
#[derive(Debug)]
pub struct GenerateRun {
    /// Exit code returned by the command.
    pub exit_code: ExitCode,
    /// Generated header, if one was written.
    pub header: Option<String>,
    /// Parsed report, if one was written.
    pub report: Option<Report>,
}

impl GenerateRun {
    /// Assert that the command succeeded and wrote a header.
    pub fn assert_success(&self) {
        assert_eq!(self.exit_code, ExitCode::SUCCESS, "generate failed: {:?}", self.report);
        assert!(self.header.is_some(), "no header was written");
    }

    /// Assert that the command failed without writing a header.
    pub fn assert_failure(&self) {
        assert_eq!(self.exit_code, ExitCode::from(1));
        assert!(self.header.is_none(), "header written despite errors");
    }
}

/// A test harness with its own working directory.
pub struct TestHarness {
    pub fixture: FontFixture,
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            fixture: FontFixture::new(),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.fixture.path()
    }

    /// Output directory for generated headers.
    pub fn out_dir(&self) -> PathBuf {
        self.path().join("out")
    }

    /// Run `generate` on `input`, writing `<out>/<stem>.h`.
    pub fn generate(&self, input: &Path, options: &GenerateOptions) -> GenerateRun {
        let out_dir = self.out_dir();
        fs::create_dir_all(&out_dir).expect("Failed to create output dir");

        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .expect("fixture path has a UTF-8 stem");
        let header_path = out_dir.join(format!("{}.h", stem));
        let report_path = load_font(input)
            .ok()
            .map(|loaded| out_dir.join(Report::filename(&c_identifier(&loaded.document.fontname))));

        // Remove leftovers so a failed run cannot pass off earlier output.
        let _ = fs::remove_file(&header_path);
        if let Some(path) = &report_path {
            let _ = fs::remove_file(path);
        }

        let exit_code = generate::run(
            Some(input.to_str().expect("UTF-8 path")),
            Some(header_path.to_str().expect("UTF-8 path")),
            options,
        )
        .expect("generate returned an error");

        let report = report_path
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| Report::from_json(&json).ok());

        GenerateRun {
            exit_code,
            header: fs::read_to_string(&header_path).ok(),
            report,
        }
    }

    /// Run `validate` on `input`.
    pub fn validate(&self, input: &Path, json: bool) -> ExitCode {
        validate::run(input.to_str().expect("UTF-8 path"), json).expect("validate returned an error")
    }

    /// Run `generate-all` over the fixture directory into [`Self::out_dir`].
    pub fn generate_all(&self, options: &GenerateOptions) -> ExitCode {
        generate_all::run(
            self.path().to_str().expect("UTF-8 path"),
            self.out_dir().to_str().expect("UTF-8 path"),
            options,
        )
        .expect("generate-all returned an error")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
