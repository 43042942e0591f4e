//! Error types for font document validation and glyph packing.

use thiserror::Error;

/// Error codes reported while checking a font document or packing its glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Document errors (E001-E007)
    /// E001: Document root is not a JSON object
    NotAnObject,
    /// E002: Missing `fontname`
    MissingFontName,
    /// E003: Missing default `width`
    MissingDefaultWidth,
    /// E004: Missing default `height`
    MissingDefaultHeight,
    /// E005: Missing default `paddingHorizontal`
    MissingPaddingHorizontal,
    /// E006: Missing default `paddingVertical`
    MissingPaddingVertical,
    /// E007: Missing `symbols`
    MissingSymbols,

    // Glyph errors (E010-E012)
    /// E010: Number of data rows differs from the resolved height
    RowCountMismatch,
    /// E011: A data row's length differs from the resolved width
    RowWidthMismatch,
    /// E012: The glyph's area does not fit in the remaining bit offset range
    GeometryOverflow,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NotAnObject => "E001",
            ErrorCode::MissingFontName => "E002",
            ErrorCode::MissingDefaultWidth => "E003",
            ErrorCode::MissingDefaultHeight => "E004",
            ErrorCode::MissingPaddingHorizontal => "E005",
            ErrorCode::MissingPaddingVertical => "E006",
            ErrorCode::MissingSymbols => "E007",
            ErrorCode::RowCountMismatch => "E010",
            ErrorCode::RowWidthMismatch => "E011",
            ErrorCode::GeometryOverflow => "E012",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for font document checks.
///
/// None of these block code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Font name is empty
    EmptyFontName,
    /// W002: Glyph has no name
    UnnamedGlyph,
    /// W003: Glyph name already used by an earlier glyph
    DuplicateGlyphName,
    /// W004: Glyph declares no `data`, so it writes no bits but still reserves space
    MissingGlyphData,
    /// W005: Resolved geometry has zero area
    ZeroAreaGlyph,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::EmptyFontName => "W001",
            WarningCode::UnnamedGlyph => "W002",
            WarningCode::DuplicateGlyphName => "W003",
            WarningCode::MissingGlyphData => "W004",
            WarningCode::ZeroAreaGlyph => "W005",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "symbols\[3\].data\[1\]").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for font document operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// JSON serialization or parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of font document validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Appends all errors and warnings of `other`.
    pub fn merge(&mut self, other: ValidationResult) {
        for error in other.errors {
            self.add_error(error);
        }
        self.warnings.extend(other.warnings);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
