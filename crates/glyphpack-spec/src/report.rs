//! Generation report.
//!
//! A report is written next to every generated header and records what went
//! in (document hash), what came out (bitstream hash and sizes) and every
//! problem found on the way.

use crate::error::{ValidationError, ValidationWarning};
use serde::{Deserialize, Serialize};

/// Report schema version.
pub const REPORT_VERSION: u32 = 1;

/// A complete report for one `generate` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version.
    pub report_version: u32,
    /// Font name from the document.
    pub fontname: String,
    /// Hex-encoded BLAKE3 hash of the canonicalized document.
    pub document_hash: String,
    /// Whether the run finished without errors.
    pub ok: bool,
    /// Errors found while packing.
    pub errors: Vec<ReportError>,
    /// Warnings found while checking the document.
    pub warnings: Vec<ReportWarning>,
    /// Number of glyphs declared in the document.
    pub glyphs_declared: usize,
    /// Number of glyphs that made it into the descriptor table.
    pub glyphs_packed: usize,
    /// Size of the packed bitstream in bytes.
    pub bitstream_bytes: usize,
    /// Hex-encoded BLAKE3 hash of the packed bitstream.
    pub bitstream_hash: String,
    /// Path of the generated file, if one was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,
    /// Generator identifier and version (e.g., "glyphpack-cli v0.1.0").
    pub generator_version: String,
}

impl Report {
    /// Creates a new report builder.
    pub fn builder(document_hash: String, generator_version: String) -> ReportBuilder {
        ReportBuilder::new(document_hash, generator_version)
    }

    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Generates the standard report filename for a font.
    ///
    /// ```
    /// use glyphpack_spec::report::Report;
    ///
    /// assert_eq!(Report::filename("tiny"), "tiny.report.json");
    /// ```
    pub fn filename(fontname: &str) -> String {
        format!("{}.report.json", fontname)
    }
}

/// Error entry in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportError {
    /// Error code (e.g., "E010").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ReportError {
    /// Converts a ValidationError to a ReportError.
    pub fn from_validation_error(err: &ValidationError) -> Self {
        Self {
            code: err.code.code().to_string(),
            message: err.message.clone(),
            path: err.path.clone(),
        }
    }
}

/// Warning entry in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// Warning code (e.g., "W003").
    pub code: String,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ReportWarning {
    /// Converts a ValidationWarning to a ReportWarning.
    pub fn from_validation_warning(warn: &ValidationWarning) -> Self {
        Self {
            code: warn.code.code().to_string(),
            message: warn.message.clone(),
            path: warn.path.clone(),
        }
    }
}

/// Builder for [`Report`].
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    report: Report,
}

impl ReportBuilder {
    /// Starts a report for a document.
    pub fn new(document_hash: String, generator_version: String) -> Self {
        Self {
            report: Report {
                report_version: REPORT_VERSION,
                fontname: String::new(),
                document_hash,
                ok: true,
                errors: Vec::new(),
                warnings: Vec::new(),
                glyphs_declared: 0,
                glyphs_packed: 0,
                bitstream_bytes: 0,
                bitstream_hash: String::new(),
                output: None,
                duration_ms: 0,
                generator_version,
            },
        }
    }

    /// Sets the font name.
    pub fn fontname(mut self, fontname: impl Into<String>) -> Self {
        self.report.fontname = fontname.into();
        self
    }

    /// Records glyph counts.
    pub fn glyphs(mut self, declared: usize, packed: usize) -> Self {
        self.report.glyphs_declared = declared;
        self.report.glyphs_packed = packed;
        self
    }

    /// Records the packed bitstream.
    pub fn bitstream(mut self, bytes: &[u8]) -> Self {
        self.report.bitstream_bytes = bytes.len();
        self.report.bitstream_hash = crate::hash::blake3_hash(bytes);
        self
    }

    /// Records the path of the generated file.
    pub fn output(mut self, path: impl Into<String>) -> Self {
        self.report.output = Some(path.into());
        self
    }

    /// Sets the execution time.
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.report.duration_ms = duration_ms;
        self
    }

    /// Adds an error; the report is no longer ok.
    pub fn error(mut self, error: ReportError) -> Self {
        self.report.errors.push(error);
        self.report.ok = false;
        self
    }

    /// Adds a warning.
    pub fn warning(mut self, warning: ReportWarning) -> Self {
        self.report.warnings.push(warning);
        self
    }

    /// Finishes the report.
    pub fn build(self) -> Report {
        self.report
    }
}
