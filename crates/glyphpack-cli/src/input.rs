//! Loading font documents from disk.
//!
//! Loading happens in stages so each failure can be reported precisely: the
//! file is read, parsed as generic JSON, checked for required top-level
//! members, and only then decoded into a [`FontDocument`].

use glyphpack_spec::validation::check_required_fields;
use glyphpack_spec::{FontDocument, ValidationError};
use std::path::{Path, PathBuf};

/// Font file used when no input is given.
pub const DEFAULT_INPUT: &str = "symbols.json";

/// A loaded font document with source provenance.
#[derive(Debug)]
pub struct LoadResult {
    /// The decoded document.
    pub document: FontDocument,
    /// BLAKE3 hash of the source file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur while loading a font document.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Content is not valid JSON.
    JsonParse { message: String },

    /// One or more required top-level members are absent.
    MissingFields { errors: Vec<ValidationError> },

    /// Required members are present but have the wrong shape.
    InvalidDocument { message: String },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::JsonParse { message } => {
                write!(f, "the document can not be parsed: {}", message)
            }
            InputError::MissingFields { errors } => {
                write!(f, "font document is missing {} required field(s)", errors.len())?;
                for error in errors {
                    write!(f, "\n  {}", error)?;
                }
                Ok(())
            }
            InputError::InvalidDocument { message } => {
                write!(f, "invalid font document: {}", message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Loads a font document from a JSON file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use glyphpack_cli::input::load_font;
///
/// let result = load_font(Path::new("symbols.json")).unwrap();
/// println!("Loaded {}", result.document.fontname);
/// ```
pub fn load_font(path: &Path) -> Result<LoadResult, InputError> {
    let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    let document = parse_font(&content)?;

    Ok(LoadResult {
        document,
        source_hash,
    })
}

/// Parses and checks a font document held in memory.
pub fn parse_font(content: &str) -> Result<FontDocument, InputError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| InputError::JsonParse {
            message: e.to_string(),
        })?;

    let required = check_required_fields(&value);
    if !required.is_ok() {
        return Err(InputError::MissingFields {
            errors: required.errors,
        });
    }

    FontDocument::from_value(value).map_err(|e| InputError::InvalidDocument {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphpack_spec::ErrorCode;

    const TINY: &str = r##"{
        "fontname": "tiny",
        "width": 3,
        "height": 2,
        "paddingHorizontal": 1,
        "paddingVertical": 0,
        "symbols": [{ "name": "A", "data": ["# #", " # "] }]
    }"##;

    #[test]
    fn test_load_font() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("tiny.json");
        std::fs::write(&path, TINY).unwrap();

        let result = load_font(&path).unwrap();
        assert_eq!(result.document.fontname, "tiny");
        assert_eq!(result.document.symbols.len(), 1);
        assert_eq!(result.source_hash.len(), 64);
    }

    #[test]
    fn test_load_file_not_found() {
        let result = load_font(Path::new("/nonexistent/symbols.json"));
        assert!(matches!(result, Err(InputError::FileRead { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let result = parse_font("{ invalid json }");
        assert!(matches!(result, Err(InputError::JsonParse { .. })));
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let result = parse_font(r#"{ "fontname": "f", "width": 1, "height": 1 }"#);
        match result {
            Err(InputError::MissingFields { errors }) => {
                let codes: Vec<ErrorCode> = errors.iter().map(|e| e.code).collect();
                assert_eq!(
                    codes,
                    vec![
                        ErrorCode::MissingPaddingHorizontal,
                        ErrorCode::MissingPaddingVertical,
                        ErrorCode::MissingSymbols,
                    ]
                );
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_root() {
        let result = parse_font("[1, 2, 3]");
        match result {
            Err(InputError::MissingFields { errors }) => {
                assert_eq!(errors[0].code, ErrorCode::NotAnObject);
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_member_type() {
        let result = parse_font(
            r#"{ "fontname": "f", "width": "wide", "height": 1,
                 "paddingHorizontal": 0, "paddingVertical": 0, "symbols": [] }"#,
        );
        assert!(matches!(result, Err(InputError::InvalidDocument { .. })));
    }

    #[test]
    fn test_missing_fields_display_lists_each() {
        let err = parse_font("{}").unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("font document is missing 6 required field(s)"));
        assert!(text.contains("E002: the font has no name"));
    }
}
