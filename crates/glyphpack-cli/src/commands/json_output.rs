//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag of the `validate` command so other
//! tools can consume diagnostics without scraping colored text.

use glyphpack_engine::GlyphDiagnostic;
use serde::{Deserialize, Serialize};

use crate::input::InputError;

/// Error codes for CLI operations.
///
/// These codes are stable. Document and glyph findings pass their own
/// `E0xx` codes through unchanged.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
    /// Required members present but malformed
    pub const INVALID_DOCUMENT: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E011")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the JSON path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W003")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the JSON path for this warning.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether validation succeeded (no errors)
    pub success: bool,
    /// Load, document, and glyph errors
    pub errors: Vec<JsonError>,
    /// Document warnings
    pub warnings: Vec<JsonWarning>,
    /// Packing statistics (when the document could be loaded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ValidateResult>,
    /// Canonical document hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_hash: Option<String>,
    /// BLAKE3 hash of the source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

/// Packing statistics for a loaded document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateResult {
    /// Font name
    pub fontname: String,
    /// Glyphs declared in the document
    pub glyphs_declared: usize,
    /// Glyphs that made it into the descriptor table
    pub glyphs_packed: usize,
    /// Packed bitstream size
    pub bitstream_bytes: usize,
    /// Bitstream plus descriptor table
    pub estimated_memory_bytes: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ValidateOutput {
    /// Creates an output for a document that could be loaded and packed.
    pub fn loaded(
        result: ValidateResult,
        errors: Vec<JsonError>,
        warnings: Vec<JsonWarning>,
        document_hash: String,
        source_hash: String,
    ) -> Self {
        Self {
            success: errors.is_empty(),
            errors,
            warnings,
            result: Some(result),
            document_hash: Some(document_hash),
            source_hash: Some(source_hash),
        }
    }

    /// Creates a failed output for a document that could not be loaded.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            warnings: Vec::new(),
            result: None,
            document_hash: None,
            source_hash: None,
        }
    }
}

/// Converts an InputError to JsonErrors.
///
/// Missing required fields expand to one error per field.
pub fn input_error_to_json(err: &InputError, file: Option<&str>) -> Vec<JsonError> {
    let errors = match err {
        InputError::FileRead { path, source } => vec![JsonError::new(
            error_codes::FILE_READ,
            format!("Failed to read file '{}': {}", path.display(), source),
        )],
        InputError::JsonParse { message } => vec![JsonError::new(
            error_codes::JSON_PARSE,
            format!("JSON parse error: {}", message),
        )],
        InputError::MissingFields { errors } => {
            errors.iter().map(validation_error_to_json).collect()
        }
        InputError::InvalidDocument { message } => vec![JsonError::new(
            error_codes::INVALID_DOCUMENT,
            format!("Invalid font document: {}", message),
        )],
    };

    match file {
        Some(f) => errors.into_iter().map(|e| e.with_file(f)).collect(),
        None => errors,
    }
}

/// Converts a ValidationError to a JsonError.
pub fn validation_error_to_json(err: &glyphpack_spec::ValidationError) -> JsonError {
    let mut error = JsonError::new(err.code.to_string(), &err.message);
    if let Some(ref path) = err.path {
        error = error.with_path(path);
    }
    error
}

/// Converts a ValidationWarning to a JsonWarning.
pub fn validation_warning_to_json(warn: &glyphpack_spec::ValidationWarning) -> JsonWarning {
    let mut warning = JsonWarning::new(warn.code.to_string(), &warn.message);
    if let Some(ref path) = warn.path {
        warning = warning.with_path(path);
    }
    warning
}

/// Converts an engine diagnostic to a JsonError.
pub fn diagnostic_to_json(diagnostic: &GlyphDiagnostic) -> JsonError {
    validation_error_to_json(&diagnostic.to_validation_error())
}
