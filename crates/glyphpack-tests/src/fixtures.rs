//! Font documents and on-disk fixtures for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use glyphpack_spec::{FontDocument, Geometry, GlyphSpec};

/// A temporary directory holding font documents.
pub struct FontFixture {
    pub root: TempDir,
}

impl FontFixture {
    /// Create an empty fixture directory.
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write a document as pretty JSON to `<name>.json` and return its path.
    pub fn add_font(&self, name: &str, doc: &FontDocument) -> PathBuf {
        let json = doc.to_json_pretty().expect("Failed to serialize font");
        self.add_raw(&format!("{}.json", name), &json)
    }

    /// Write arbitrary content to `relative` (directories are created).
    pub fn add_raw(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }
}

impl Default for FontFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Two 3x2 glyphs, declared out of display order.
pub fn tiny_font() -> FontDocument {
    FontDocument::new("tiny", Geometry::new(3, 2, 0, 0))
        .symbol(GlyphSpec::new("B").with_rows(["###", "# #"]))
        .symbol(GlyphSpec::new("A").with_rows(["# #", " # "]))
}

/// 3x5 digits plus a few wider named glyphs and per-glyph overrides.
pub fn digits_font() -> FontDocument {
    let digits: [(&str, [&str; 5]); 10] = [
        ("0", ["###", "# #", "# #", "# #", "###"]),
        ("1", [" # ", "## ", " # ", " # ", "###"]),
        ("2", ["###", "  #", "###", "#  ", "###"]),
        ("3", ["###", "  #", " ##", "  #", "###"]),
        ("4", ["# #", "# #", "###", "  #", "  #"]),
        ("5", ["###", "#  ", "###", "  #", "###"]),
        ("6", ["###", "#  ", "###", "# #", "###"]),
        ("7", ["###", "  #", "  #", "  #", "  #"]),
        ("8", ["###", "# #", "###", "# #", "###"]),
        ("9", ["###", "# #", "###", "  #", "###"]),
    ];

    let mut doc = FontDocument::new("digits-3x5", Geometry::new(3, 5, 1, 1))
        .symbol(
            GlyphSpec::new("space")
                .with_width(2)
                .with_rows(["  ", "  ", "  ", "  ", "  "]),
        )
        .symbol(GlyphSpec::new(".").with_width(1).with_rows([" ", " ", " ", " ", "#"]));

    // Reverse order so the descriptor table has to be sorted.
    for (name, rows) in digits.iter().rev() {
        doc = doc.symbol(GlyphSpec::new(*name).with_rows(rows.iter().copied()));
    }

    doc.symbol(
        GlyphSpec::new("arrow_right")
            .with_width(5)
            .with_padding(0, 1)
            .with_rows(["  #  ", "   # ", "#####", "   # ", "  #  "]),
    )
}

/// A font where the second glyph has one row too many and the third one
/// row too wide.
pub fn broken_font() -> FontDocument {
    FontDocument::new("broken", Geometry::new(2, 2, 0, 0))
        .symbol(GlyphSpec::new("a").with_rows(["##", "##"]))
        .symbol(GlyphSpec::new("b").with_rows(["##", "##", "##"]))
        .symbol(GlyphSpec::new("c").with_rows(["###", "##"]))
        .symbol(GlyphSpec::new("d").with_rows(["# ", " #"]))
}
