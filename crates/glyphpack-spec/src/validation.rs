//! Font document validation.
//!
//! Two passes exist:
//!
//! - [`check_required_fields`] runs on the raw JSON value and only checks that
//!   every required top-level member is present. Nothing else about the
//!   schema is enforced here.
//! - [`validate_document`] runs on a decoded [`FontDocument`] and reports
//!   non-blocking warnings (unnamed or duplicate glyphs, glyphs without data).
//!
//! Row and column checks belong to the packing engine, which counts them as
//! it packs.

use std::collections::HashSet;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::font::{FontDocument, Geometry};

/// Required top-level members, in the order they are reported.
pub const REQUIRED_FIELDS: &[(&str, ErrorCode, &str)] = &[
    ("fontname", ErrorCode::MissingFontName, "the font has no name"),
    (
        "width",
        ErrorCode::MissingDefaultWidth,
        "no default width provided",
    ),
    (
        "height",
        ErrorCode::MissingDefaultHeight,
        "no default height provided",
    ),
    (
        "paddingHorizontal",
        ErrorCode::MissingPaddingHorizontal,
        "no default horizontal padding provided",
    ),
    (
        "paddingVertical",
        ErrorCode::MissingPaddingVertical,
        "no default vertical padding provided",
    ),
    (
        "symbols",
        ErrorCode::MissingSymbols,
        "the document does not contain symbols",
    ),
];

/// Checks that every required top-level member is present.
///
/// # Example
/// ```
/// use glyphpack_spec::validation::check_required_fields;
///
/// let value = serde_json::json!({ "fontname": "f", "width": 3 });
/// let result = check_required_fields(&value);
/// assert!(!result.is_ok());
/// assert_eq!(result.errors.len(), 4);
/// ```
pub fn check_required_fields(value: &serde_json::Value) -> ValidationResult {
    let Some(object) = value.as_object() else {
        return ValidationResult::failure(vec![ValidationError::new(
            ErrorCode::NotAnObject,
            "the document root must be a JSON object",
        )]);
    };

    let mut result = ValidationResult::success();
    for (field, code, message) in REQUIRED_FIELDS {
        if !object.contains_key(*field) {
            result.add_error(ValidationError::with_path(*code, *message, *field));
        }
    }
    result
}

/// Reports non-blocking problems in a decoded document.
pub fn validate_document(doc: &FontDocument) -> ValidationResult {
    let mut result = ValidationResult::success();
    let defaults = doc.defaults();

    if doc.fontname.trim().is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EmptyFontName,
            "font name is empty; generated arrays fall back to a generic prefix",
            "fontname",
        ));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for (index, glyph) in doc.symbols.iter().enumerate() {
        let path = format!("symbols[{}]", index);

        if glyph.name.is_empty() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::UnnamedGlyph,
                "glyph has no name",
                format!("{}.name", path),
            ));
        } else if !seen.insert(glyph.name.as_str()) {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::DuplicateGlyphName,
                format!("glyph name \"{}\" is used more than once", glyph.name),
                format!("{}.name", path),
            ));
        }

        let geometry = glyph.resolve(&defaults);
        if glyph.data.is_none() && geometry.area() > 0 {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::MissingGlyphData,
                format!(
                    "glyph \"{}\" has no data but reserves {} bits",
                    glyph.name,
                    geometry.area()
                ),
                path.clone(),
            ));
        }
        if is_zero_area(&geometry) {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::ZeroAreaGlyph,
                format!(
                    "glyph \"{}\" resolves to {}x{}",
                    glyph.name, geometry.width, geometry.height
                ),
                path,
            ));
        }
    }

    result
}

fn is_zero_area(geometry: &Geometry) -> bool {
    geometry.width == 0 || geometry.height == 0
}
