//! glyphpack font document library
//!
//! This crate provides types, validation, and hashing for glyphpack font
//! documents. A font document is a JSON file that declares default glyph
//! geometry and a list of glyphs drawn as rows of characters.
//!
//! # Example
//!
//! ```
//! use glyphpack_spec::{FontDocument, Geometry, GlyphSpec};
//! use glyphpack_spec::validation::{check_required_fields, validate_document};
//!
//! let json = r##"{
//!     "fontname": "tiny",
//!     "width": 3,
//!     "height": 2,
//!     "paddingHorizontal": 0,
//!     "paddingVertical": 0,
//!     "symbols": [{ "name": "A", "data": ["# #", " # "] }]
//! }"##;
//!
//! let value: serde_json::Value = serde_json::from_str(json).unwrap();
//! assert!(check_required_fields(&value).is_ok());
//!
//! let doc = FontDocument::from_value(value).unwrap();
//! assert_eq!(doc.defaults(), Geometry::new(3, 2, 0, 0));
//! assert!(validate_document(&doc).warnings.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation
//! - [`font`]: Font document, glyph spec, and geometry types
//! - [`hash`]: Canonical hashing
//! - [`report`]: Report types for generation results
//! - [`validation`]: Document validation functions

pub mod error;
pub mod font;
pub mod hash;
pub mod report;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use font::{FontDocument, Geometry, GlyphSpec, DEFAULT_SET_MARKER};
pub use hash::{blake3_hash, canonical_document_hash};
pub use report::{Report, ReportBuilder, ReportError, ReportWarning, REPORT_VERSION};
pub use validation::{check_required_fields, validate_document};
