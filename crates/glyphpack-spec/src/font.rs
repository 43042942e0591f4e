//! Font document types.
//!
//! A font document is a JSON object with font-wide default geometry and a
//! list of glyphs, each drawn as rows of characters:
//!
//! ```json
//! {
//!   "fontname": "tiny",
//!   "width": 3,
//!   "height": 2,
//!   "paddingHorizontal": 1,
//!   "paddingVertical": 0,
//!   "symbols": [
//!     { "name": "A", "data": ["# #", " # "] },
//!     { "name": "wide", "width": 4, "data": ["####", "#  #"] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Character that marks a set pixel unless the caller picks another one.
pub const DEFAULT_SET_MARKER: char = '#';

/// Resolved glyph geometry.
///
/// Padding is metadata only: it never takes up space in the packed
/// bitstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    /// Glyph width in pixels.
    pub width: u32,
    /// Glyph height in pixels.
    pub height: u32,
    /// Blank columns on each side when the glyph is drawn.
    pub padding_horizontal: u32,
    /// Blank rows above and below when the glyph is drawn.
    pub padding_vertical: u32,
}

impl Geometry {
    /// Creates a geometry from its four components.
    pub fn new(width: u32, height: u32, padding_horizontal: u32, padding_vertical: u32) -> Self {
        Self {
            width,
            height,
            padding_horizontal,
            padding_vertical,
        }
    }

    /// Number of bits this geometry reserves in the bitstream, saturating at
    /// `usize::MAX`.
    pub fn area(&self) -> usize {
        self.checked_area().unwrap_or(usize::MAX)
    }

    /// Number of bits this geometry reserves, or `None` if it overflows `usize`.
    pub fn checked_area(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }
}

/// A parsed font document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDocument {
    /// Font name, used to name the generated arrays.
    pub fontname: String,
    /// Default glyph width.
    pub width: u32,
    /// Default glyph height.
    pub height: u32,
    /// Default horizontal padding.
    pub padding_horizontal: u32,
    /// Default vertical padding.
    pub padding_vertical: u32,
    /// Glyphs in processing order.
    pub symbols: Vec<GlyphSpec>,
}

impl FontDocument {
    /// Creates an empty document with the given defaults.
    pub fn new(fontname: impl Into<String>, defaults: Geometry) -> Self {
        Self {
            fontname: fontname.into(),
            width: defaults.width,
            height: defaults.height,
            padding_horizontal: defaults.padding_horizontal,
            padding_vertical: defaults.padding_vertical,
            symbols: Vec::new(),
        }
    }

    /// Appends a glyph.
    pub fn symbol(mut self, glyph: GlyphSpec) -> Self {
        self.symbols.push(glyph);
        self
    }

    /// Returns the font-wide default geometry.
    pub fn defaults(&self) -> Geometry {
        Geometry::new(
            self.width,
            self.height,
            self.padding_horizontal,
            self.padding_vertical,
        )
    }

    /// Parses a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a document from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Serializes the document to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the document to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// One glyph as declared in the document.
///
/// Every geometry field is optional and falls back to the font default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphSpec {
    /// Glyph name. Not required to be unique.
    #[serde(default)]
    pub name: String,
    /// Width override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Horizontal padding override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_horizontal: Option<u32>,
    /// Vertical padding override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_vertical: Option<u32>,
    /// Pixel rows, top to bottom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
}

impl GlyphSpec {
    /// Creates a glyph with no overrides and no data.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the pixel rows.
    pub fn with_rows<I, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data = Some(rows.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides the width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Overrides the height.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Overrides both paddings.
    pub fn with_padding(mut self, horizontal: u32, vertical: u32) -> Self {
        self.padding_horizontal = Some(horizontal);
        self.padding_vertical = Some(vertical);
        self
    }

    /// Applies this glyph's overrides on top of `defaults`.
    pub fn resolve(&self, defaults: &Geometry) -> Geometry {
        Geometry {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            padding_horizontal: self
                .padding_horizontal
                .unwrap_or(defaults.padding_horizontal),
            padding_vertical: self.padding_vertical.unwrap_or(defaults.padding_vertical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_document() {
        let json = r##"{
            "fontname": "tiny",
            "width": 3,
            "height": 2,
            "paddingHorizontal": 1,
            "paddingVertical": 0,
            "symbols": [
                { "name": "A", "data": ["# #", " # "] },
                { "name": "wide", "width": 4, "paddingVertical": 2 }
            ]
        }"##;

        let doc = FontDocument::from_json(json).expect("should parse");
        assert_eq!(doc.fontname, "tiny");
        assert_eq!(doc.defaults(), Geometry::new(3, 2, 1, 0));
        assert_eq!(doc.symbols.len(), 2);
        assert_eq!(
            doc.symbols[0],
            GlyphSpec::new("A").with_rows(["# #", " # "])
        );
        assert_eq!(doc.symbols[1].width, Some(4));
        assert_eq!(doc.symbols[1].padding_vertical, Some(2));
        assert!(doc.symbols[1].data.is_none());
    }

    #[test]
    fn test_unknown_symbol_members_are_ignored() {
        let json = r##"{
            "fontname": "f", "width": 1, "height": 1,
            "paddingHorizontal": 0, "paddingVertical": 0,
            "symbols": [{ "name": "x", "comment": "ignored", "data": ["#"] }]
        }"##;
        let doc = FontDocument::from_json(json).unwrap();
        assert_eq!(doc.symbols[0].name, "x");
    }

    #[test]
    fn test_missing_name_defaults_to_empty() {
        let glyph: GlyphSpec = serde_json::from_str(r#"{ "data": [] }"#).unwrap();
        assert_eq!(glyph.name, "");
        assert_eq!(glyph.data, Some(vec![]));
    }

    #[test]
    fn test_negative_width_is_rejected() {
        let result: Result<GlyphSpec, _> = serde_json::from_str(r#"{ "width": -1 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_overrides() {
        let defaults = Geometry::new(5, 7, 1, 1);

        let plain = GlyphSpec::new("a");
        assert_eq!(plain.resolve(&defaults), defaults);

        let custom = GlyphSpec::new("b")
            .with_width(3)
            .with_height(4)
            .with_padding(0, 2);
        assert_eq!(custom.resolve(&defaults), Geometry::new(3, 4, 0, 2));
    }

    #[test]
    fn test_area_excludes_padding() {
        assert_eq!(Geometry::new(3, 2, 10, 10).area(), 6);
        assert_eq!(Geometry::new(0, 9, 1, 1).area(), 0);
    }

    #[test]
    fn test_checked_area_at_u32_limits() {
        let huge = Geometry::new(u32::MAX, u32::MAX, 0, 0);
        let expected = (u32::MAX as u64 * u32::MAX as u64) as usize;
        if usize::BITS >= 64 {
            assert_eq!(huge.checked_area(), Some(expected));
        } else {
            assert_eq!(huge.checked_area(), None);
            assert_eq!(huge.area(), usize::MAX);
        }
        assert_eq!(Geometry::new(u32::MAX, 0, 0, 0).checked_area(), Some(0));
    }

    #[test]
    fn test_json_round_trip() {
        let doc = FontDocument::new("round", Geometry::new(2, 2, 0, 0))
            .symbol(GlyphSpec::new("x").with_rows(["##", "  "]))
            .symbol(GlyphSpec::new("y").with_width(1));

        let json = doc.to_json_pretty().unwrap();
        assert!(json.contains("\"paddingHorizontal\""));
        let parsed = FontDocument::from_json(&json).unwrap();
        assert_eq!(doc, parsed);
    }
}
