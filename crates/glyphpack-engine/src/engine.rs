//! The symbol engine: row validation, bit packing and descriptor bookkeeping.

use glyphpack_spec::{
    ErrorCode, FontDocument, Geometry, GlyphSpec, ValidationError, DEFAULT_SET_MARKER,
};

use crate::bits::{read_bit, BitWriter};
use crate::descriptor::GlyphDescriptor;
use crate::error::EngineError;

/// What was wrong with a glyph's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The glyph supplied `actual` rows but its height is `expected`.
    RowCount { expected: u32, actual: usize },
    /// Row `row` is `actual` characters long but the width is `expected`.
    RowWidth {
        row: usize,
        expected: u32,
        actual: usize,
    },
    /// A `width` x `height` glyph starting at `offset` runs past `usize::MAX`.
    GeometryOverflow {
        width: u32,
        height: u32,
        offset: usize,
    },
}

/// One counted error, attributed to a glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphDiagnostic {
    /// Position of the glyph in the input.
    pub index: usize,
    /// Glyph name.
    pub name: String,
    /// The problem.
    pub kind: DiagnosticKind,
}

impl GlyphDiagnostic {
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            DiagnosticKind::RowCount { .. } => ErrorCode::RowCountMismatch,
            DiagnosticKind::RowWidth { .. } => ErrorCode::RowWidthMismatch,
            DiagnosticKind::GeometryOverflow { .. } => ErrorCode::GeometryOverflow,
        }
    }

    /// JSON path of the offending data.
    pub fn path(&self) -> String {
        match self.kind {
            DiagnosticKind::RowCount { .. } => format!("symbols[{}].data", self.index),
            DiagnosticKind::RowWidth { row, .. } => {
                format!("symbols[{}].data[{}]", self.index, row)
            }
            DiagnosticKind::GeometryOverflow { .. } => format!("symbols[{}]", self.index),
        }
    }

    pub fn message(&self) -> String {
        match self.kind {
            DiagnosticKind::RowCount { expected, actual } => format!(
                "\"{}\": height mismatch - expecting {} rows, got {}",
                self.name, expected, actual
            ),
            DiagnosticKind::RowWidth {
                row,
                expected,
                actual,
            } => format!(
                "\"{}\": width mismatch in row {} - expecting {} columns, got {}",
                self.name, row, expected, actual
            ),
            DiagnosticKind::GeometryOverflow {
                width,
                height,
                offset,
            } => format!(
                "\"{}\": {}x{} glyph at bit offset {} overflows the offset range",
                self.name, width, height, offset
            ),
        }
    }

    pub fn to_validation_error(&self) -> ValidationError {
        ValidationError::with_path(self.code(), self.message(), self.path())
    }
}

impl std::fmt::Display for GlyphDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// A packed font.
///
/// Built once from default geometry and an ordered list of glyphs; read-only
/// afterwards. Building never fails: glyphs whose rows do not match their
/// geometry, or whose area would push the next offset past `usize::MAX`,
/// raise the error count and are left out of the descriptor table.
///
/// Two packing rules are easy to miss:
///
/// - A rejected glyph still writes every character of every row it supplied
///   into the bitstream.
/// - Every glyph, rejected or not, with or without data, advances the offset
///   of the next glyph by exactly `width * height`.
///
/// So a descriptor's offset is always the sum of `width * height` over every
/// glyph before it in input order, but after a rejected or data-less glyph the
/// bitstream contents no longer line up with those offsets.
///
/// # Example
///
/// ```
/// use glyphpack_engine::SymbolEngine;
/// use glyphpack_spec::{Geometry, GlyphSpec};
///
/// let glyphs = vec![GlyphSpec::new("A").with_rows(["# #", " # "])];
/// let engine = SymbolEngine::new(Geometry::new(3, 2, 0, 0), &glyphs);
///
/// assert_eq!(engine.error_count(), 0);
/// assert_eq!(engine.bitstream(), &[0b1010_1000]);
/// assert_eq!(engine.descriptors()[0].offset(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct SymbolEngine {
    defaults: Geometry,
    marker: char,
    bitstream: Vec<u8>,
    bits_written: usize,
    descriptors: Vec<GlyphDescriptor>,
    diagnostics: Vec<GlyphDiagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl SymbolEngine {
    /// Packs `glyphs` using `#` as the set-pixel marker.
    pub fn new(defaults: Geometry, glyphs: &[GlyphSpec]) -> Self {
        Self::with_marker(defaults, DEFAULT_SET_MARKER, glyphs)
    }

    /// Packs `glyphs`, treating `marker` as a set pixel and anything else as
    /// clear.
    pub fn with_marker(defaults: Geometry, marker: char, glyphs: &[GlyphSpec]) -> Self {
        let mut packer = Packer::new(defaults, marker);
        for (index, glyph) in glyphs.iter().enumerate() {
            packer.pack(index, glyph);
        }
        packer.finish()
    }

    /// Packs every glyph of a document with its default geometry.
    pub fn from_document(doc: &FontDocument, marker: char) -> Self {
        Self::with_marker(doc.defaults(), marker, &doc.symbols)
    }

    /// Font-wide default geometry.
    pub fn defaults(&self) -> Geometry {
        self.defaults
    }

    /// Character treated as a set pixel.
    pub fn marker(&self) -> char {
        self.marker
    }

    /// The packed bitstream.
    pub fn bitstream(&self) -> &[u8] {
        &self.bitstream
    }

    /// Size of the packed bitstream in bytes.
    pub fn bitstream_size(&self) -> usize {
        self.bitstream.len()
    }

    /// Bits appended before the final partial byte was sealed.
    pub fn bits_written(&self) -> usize {
        self.bits_written
    }

    /// Descriptors of accepted glyphs, in output-table order.
    pub fn descriptors(&self) -> &[GlyphDescriptor] {
        &self.descriptors
    }

    pub fn descriptor_count(&self) -> usize {
        self.descriptors.len()
    }

    /// Every counted error, in input order.
    pub fn diagnostics(&self) -> &[GlyphDiagnostic] {
        &self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Always zero for now; no packing rule raises a warning yet.
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count != 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count != 0
    }

    /// Reads one bit of the packed bitstream.
    ///
    /// # Errors
    /// [`EngineError::OutOfRange`] when `offset` is past the last sealed byte.
    pub fn bit_at(&self, offset: usize) -> Result<bool, EngineError> {
        read_bit(&self.bitstream, offset).ok_or(EngineError::OutOfRange {
            offset,
            available: self.bitstream.len() * 8,
        })
    }

    /// Reads a glyph's pixels back, row-major, starting at its offset.
    ///
    /// A zero-area glyph has no pixels and reads back as no rows.
    ///
    /// # Errors
    /// [`EngineError::OutOfRange`] when any of the glyph's pixels lie past
    /// the end of the bitstream. Nothing is read in that case.
    pub fn glyph_bitmap(&self, descriptor: &GlyphDescriptor) -> Result<Vec<Vec<bool>>, EngineError> {
        let available = self.bitstream.len() * 8;
        let width = descriptor.width() as usize;
        let mut offset = descriptor.offset();

        // Check the whole span first so huge declared sizes never allocate.
        let area = descriptor.geometry().checked_area();
        if area == Some(0) {
            return Ok(Vec::new());
        }
        let end = area.and_then(|area| offset.checked_add(area));
        match end {
            Some(end) if end <= available => {}
            _ => {
                return Err(EngineError::OutOfRange {
                    offset: available.max(offset),
                    available,
                })
            }
        }
        let mut rows = Vec::with_capacity(descriptor.height() as usize);

        for _ in 0..descriptor.height() {
            let mut row = Vec::with_capacity(width);
            for _ in 0..width {
                row.push(self.bit_at(offset)?);
                offset += 1;
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

/// Mutable state for one engine build.
struct Packer {
    defaults: Geometry,
    marker: char,
    writer: BitWriter,
    next_offset: usize,
    descriptors: Vec<GlyphDescriptor>,
    diagnostics: Vec<GlyphDiagnostic>,
}

impl Packer {
    fn new(defaults: Geometry, marker: char) -> Self {
        Self {
            defaults,
            marker,
            writer: BitWriter::new(),
            next_offset: 0,
            descriptors: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn pack(&mut self, index: usize, glyph: &GlyphSpec) {
        let geometry = glyph.resolve(&self.defaults);
        let errors_before = self.diagnostics.len();

        if let Some(rows) = &glyph.data {
            if rows.len() != geometry.height as usize {
                self.report(
                    index,
                    glyph,
                    DiagnosticKind::RowCount {
                        expected: geometry.height,
                        actual: rows.len(),
                    },
                );
            }

            for (row_index, row) in rows.iter().enumerate() {
                let length = row.chars().count();
                if length != geometry.width as usize {
                    self.report(
                        index,
                        glyph,
                        DiagnosticKind::RowWidth {
                            row: row_index,
                            expected: geometry.width,
                            actual: length,
                        },
                    );
                }

                for c in row.chars() {
                    self.writer.push(c == self.marker);
                }
            }
        }

        let next_offset = geometry
            .checked_area()
            .and_then(|area| self.next_offset.checked_add(area));
        if next_offset.is_none() {
            self.report(
                index,
                glyph,
                DiagnosticKind::GeometryOverflow {
                    width: geometry.width,
                    height: geometry.height,
                    offset: self.next_offset,
                },
            );
        }

        if self.diagnostics.len() == errors_before {
            self.descriptors.push(GlyphDescriptor::new(
                glyph.name.clone(),
                self.next_offset,
                geometry,
            ));
        }

        // An overflowing glyph reserves nothing.
        if let Some(next_offset) = next_offset {
            self.next_offset = next_offset;
        }
    }

    fn report(&mut self, index: usize, glyph: &GlyphSpec, kind: DiagnosticKind) {
        self.diagnostics.push(GlyphDiagnostic {
            index,
            name: glyph.name.clone(),
            kind,
        });
    }

    fn finish(self) -> SymbolEngine {
        let bits_written = self.writer.bits_written();
        let bitstream = self.writer.finish();

        let mut descriptors = self.descriptors;
        descriptors.sort_by(GlyphDescriptor::display_cmp);

        SymbolEngine {
            defaults: self.defaults,
            marker: self.marker,
            bitstream,
            bits_written,
            descriptors,
            error_count: self.diagnostics.len(),
            diagnostics: self.diagnostics,
            warning_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(engine: &SymbolEngine) -> Vec<&str> {
        engine.descriptors().iter().map(|d| d.name()).collect()
    }

    #[test]
    fn test_single_valid_glyph() {
        let glyphs = vec![GlyphSpec::new("A").with_rows(["# #", " # "])];
        let engine = SymbolEngine::new(Geometry::new(3, 2, 0, 0), &glyphs);

        assert_eq!(engine.error_count(), 0);
        assert!(!engine.has_errors());
        assert_eq!(engine.descriptor_count(), 1);
        assert_eq!(
            engine.descriptors()[0],
            GlyphDescriptor::new("A", 0, Geometry::new(3, 2, 0, 0))
        );
        assert_eq!(engine.bits_written(), 6);
        assert_eq!(engine.bitstream(), &[0b1010_1000]);

        let bits: Vec<bool> = (0..6).map(|i| engine.bit_at(i).unwrap()).collect();
        assert_eq!(bits, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn test_offsets_accumulate_area() {
        let glyphs = vec![
            GlyphSpec::new("x").with_rows(["##", "##"]),
            GlyphSpec::new("y").with_width(3).with_rows(["###", "   "]),
            GlyphSpec::new("z").with_rows(["# ", " #"]),
        ];
        let engine = SymbolEngine::new(Geometry::new(2, 2, 5, 5), &glyphs);

        let offsets: Vec<(&str, usize)> = engine
            .descriptors()
            .iter()
            .map(|d| (d.name(), d.offset()))
            .collect();
        assert_eq!(offsets, vec![("x", 0), ("y", 4), ("z", 10)]);
        assert_eq!(engine.bits_written(), 14);
        assert_eq!(engine.bitstream_size(), 2);
        // x: 1111, y: 111000, z: 1001
        assert_eq!(engine.bitstream(), &[0b1111_1110, 0b0010_0100]);
    }

    #[test]
    fn test_padding_is_metadata_only() {
        let glyphs = vec![
            GlyphSpec::new("a").with_padding(7, 9).with_rows(["#"]),
            GlyphSpec::new("b").with_rows(["#"]),
        ];
        let engine = SymbolEngine::new(Geometry::new(1, 1, 0, 0), &glyphs);
        assert_eq!(engine.descriptors()[0].padding_horizontal(), 7);
        assert_eq!(engine.descriptors()[0].padding_vertical(), 9);
        assert_eq!(engine.descriptors()[1].offset(), 1);
    }

    #[test]
    fn test_row_count_mismatch_still_writes_and_advances() {
        let glyphs = vec![
            GlyphSpec::new("tall").with_rows(["##", "##", "##"]),
            GlyphSpec::new("next").with_rows(["# ", " #"]),
        ];
        let engine = SymbolEngine::new(Geometry::new(2, 2, 0, 0), &glyphs);

        assert_eq!(engine.error_count(), 1);
        assert_eq!(names(&engine), vec!["next"]);
        // The rejected glyph wrote 3 rows of 2 bits...
        assert_eq!(engine.bits_written(), 6 + 4);
        // ...but only reserved width * height = 4 bits of offset.
        assert_eq!(engine.descriptors()[0].offset(), 4);
        assert_eq!(
            engine.diagnostics()[0].kind,
            DiagnosticKind::RowCount {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_too_few_rows_is_an_error() {
        let glyphs = vec![GlyphSpec::new("short").with_rows(["###"])];
        let engine = SymbolEngine::new(Geometry::new(3, 2, 0, 0), &glyphs);
        assert_eq!(engine.error_count(), 1);
        assert_eq!(engine.descriptor_count(), 0);
        assert_eq!(engine.bits_written(), 3);
    }

    #[test]
    fn test_row_width_mismatch_counts_each_row() {
        let glyphs = vec![
            GlyphSpec::new("bad").with_rows(["####", "#"]),
            GlyphSpec::new("ok").with_rows(["###", "###"]),
        ];
        let engine = SymbolEngine::new(Geometry::new(3, 2, 0, 0), &glyphs);

        assert_eq!(engine.error_count(), 2);
        assert_eq!(names(&engine), vec!["ok"]);
        assert_eq!(engine.descriptors()[0].offset(), 6);
        // All five characters of the rejected glyph were packed.
        assert_eq!(engine.bits_written(), 5 + 6);
        assert_eq!(engine.bitstream(), &[0b1111_1111, 0b1110_0000]);

        let paths: Vec<String> = engine.diagnostics().iter().map(|d| d.path()).collect();
        assert_eq!(paths, vec!["symbols[0].data[0]", "symbols[0].data[1]"]);
    }

    #[test]
    fn test_both_mismatches_on_one_glyph() {
        let glyphs = vec![GlyphSpec::new("x").with_rows(["#", "#", "#"])];
        let engine = SymbolEngine::new(Geometry::new(2, 2, 0, 0), &glyphs);
        assert_eq!(engine.error_count(), 4);
        assert_eq!(engine.diagnostics()[0].code(), ErrorCode::RowCountMismatch);
        assert_eq!(engine.diagnostics()[1].code(), ErrorCode::RowWidthMismatch);
    }

    #[test]
    fn test_glyph_without_data_keeps_descriptor() {
        let glyphs = vec![
            GlyphSpec::new("blank"),
            GlyphSpec::new("after").with_rows(["##"]),
        ];
        let engine = SymbolEngine::new(Geometry::new(2, 1, 0, 0), &glyphs);

        assert_eq!(engine.error_count(), 0);
        assert_eq!(names(&engine), vec!["after", "blank"]);
        assert_eq!(engine.descriptors()[0].offset(), 2);
        assert_eq!(engine.descriptors()[1].offset(), 0);
        assert_eq!(engine.bits_written(), 2);
    }

    #[test]
    fn test_empty_input() {
        let engine = SymbolEngine::new(Geometry::new(8, 8, 0, 0), &[]);
        assert_eq!(engine.bitstream_size(), 0);
        assert_eq!(engine.descriptor_count(), 0);
        assert!(matches!(
            engine.bit_at(0),
            Err(EngineError::OutOfRange {
                offset: 0,
                available: 0
            })
        ));
    }

    #[test]
    fn test_sorted_output_order() {
        let glyphs = vec![
            GlyphSpec::new("b").with_rows(["#"]),
            GlyphSpec::new("ba").with_rows(["#"]),
            GlyphSpec::new("a").with_rows(["#"]),
        ];
        let engine = SymbolEngine::new(Geometry::new(1, 1, 0, 0), &glyphs);
        assert_eq!(names(&engine), vec!["a", "b", "ba"]);
        // Offsets follow input order, not output order.
        let offsets: Vec<usize> = engine.descriptors().iter().map(|d| d.offset()).collect();
        assert_eq!(offsets, vec![2, 0, 1]);
    }

    #[test]
    fn test_custom_marker() {
        let glyphs = vec![GlyphSpec::new("o").with_rows(["X.X", ".#."])];
        let engine = SymbolEngine::with_marker(Geometry::new(3, 2, 0, 0), 'X', &glyphs);
        assert_eq!(engine.marker(), 'X');
        assert_eq!(engine.bitstream(), &[0b1010_0000]);
    }

    #[test]
    fn test_non_ascii_rows_count_characters() {
        let glyphs = vec![GlyphSpec::new("u").with_rows(["█·█"])];
        let engine = SymbolEngine::with_marker(Geometry::new(3, 1, 0, 0), '█', &glyphs);
        assert_eq!(engine.error_count(), 0);
        assert_eq!(engine.bitstream(), &[0b1010_0000]);
    }

    #[test]
    fn test_bit_at_bounds() {
        let glyphs = vec![GlyphSpec::new("a").with_rows(["###"])];
        let engine = SymbolEngine::new(Geometry::new(3, 1, 0, 0), &glyphs);
        // The sealed byte is addressable, including its zero padding.
        assert_eq!(engine.bit_at(7), Ok(false));
        assert_eq!(
            engine.bit_at(8),
            Err(EngineError::OutOfRange {
                offset: 8,
                available: 8
            })
        );
    }

    #[test]
    fn test_glyph_bitmap_reads_rows() {
        let glyphs = vec![
            GlyphSpec::new("first").with_rows(["##", "  "]),
            GlyphSpec::new("L").with_rows(["# ", "##"]),
        ];
        let engine = SymbolEngine::new(Geometry::new(2, 2, 0, 0), &glyphs);
        let l = &engine.descriptors()[0];
        assert_eq!(l.name(), "L");
        assert_eq!(
            engine.glyph_bitmap(l).unwrap(),
            vec![vec![true, false], vec![true, true]]
        );
    }

    #[test]
    fn test_glyph_bitmap_zero_area() {
        let glyphs = vec![
            GlyphSpec::new("a").with_rows(["#"]),
            GlyphSpec::new("tall").with_width(0).with_height(u32::MAX),
        ];
        let engine = SymbolEngine::new(Geometry::new(1, 1, 0, 0), &glyphs);
        let tall = &engine.descriptors()[1];
        assert_eq!(tall.name(), "tall");
        assert_eq!(engine.glyph_bitmap(tall), Ok(Vec::new()));
    }

    #[test]
    fn test_glyph_bitmap_out_of_range() {
        let glyphs = vec![GlyphSpec::new("ghost").with_width(4).with_height(4)];
        let engine = SymbolEngine::new(Geometry::new(1, 1, 0, 0), &glyphs);
        let ghost = &engine.descriptors()[0];
        assert!(engine.glyph_bitmap(ghost).is_err());
    }

    #[test]
    fn test_diagnostic_messages() {
        let glyphs = vec![GlyphSpec::new("A").with_rows(["####", "#"])];
        let engine = SymbolEngine::new(Geometry::new(3, 1, 0, 0), &glyphs);

        let row_count = &engine.diagnostics()[0];
        assert_eq!(
            row_count.to_string(),
            "E010: \"A\": height mismatch - expecting 1 rows, got 2"
        );
        let err = engine.diagnostics()[1].to_validation_error();
        assert_eq!(err.code, ErrorCode::RowWidthMismatch);
        assert_eq!(err.path.as_deref(), Some("symbols[0].data[0]"));
    }

    #[test]
    fn test_rebuild_is_identical() {
        let glyphs = vec![
            GlyphSpec::new("q").with_rows(["# #", "###"]),
            GlyphSpec::new("bad").with_rows(["#"]),
            GlyphSpec::new("r").with_rows(["## ", "#  "]),
        ];
        let a = SymbolEngine::new(Geometry::new(3, 2, 0, 0), &glyphs);
        let b = SymbolEngine::new(Geometry::new(3, 2, 0, 0), &glyphs);
        assert_eq!(a.bitstream(), b.bitstream());
        assert_eq!(a.descriptors(), b.descriptors());
        assert_eq!(a.diagnostics(), b.diagnostics());
    }

    #[test]
    fn test_offset_overflow_is_an_error() {
        let glyphs = vec![
            GlyphSpec::new("a").with_width(u32::MAX).with_height(u32::MAX),
            GlyphSpec::new("b").with_width(u32::MAX).with_height(u32::MAX),
            GlyphSpec::new("c").with_rows(["#"]),
        ];
        let engine = SymbolEngine::new(Geometry::new(1, 1, 0, 0), &glyphs);

        let huge = Geometry::new(u32::MAX, u32::MAX, 0, 0).checked_area();
        assert_eq!(engine.error_count(), engine.diagnostics().len());
        assert!(engine
            .diagnostics()
            .iter()
            .all(|d| d.code() == ErrorCode::GeometryOverflow));
        assert_eq!(engine.bitstream(), &[0b1000_0000]);

        match huge {
            // 64-bit: "a" fits, "b" would run past usize::MAX.
            Some(area) => {
                assert_eq!(engine.error_count(), 1);
                assert_eq!(names(&engine), vec!["a", "c"]);
                assert_eq!(engine.descriptors()[0].offset(), 0);
                assert_eq!(engine.descriptors()[1].offset(), area);
                assert_eq!(
                    engine.diagnostics()[0].kind,
                    DiagnosticKind::GeometryOverflow {
                        width: u32::MAX,
                        height: u32::MAX,
                        offset: area
                    }
                );
                assert_eq!(engine.diagnostics()[0].path(), "symbols[1]");
                // Neither survivor can be read back, and nothing is allocated.
                for descriptor in engine.descriptors() {
                    assert!(engine.glyph_bitmap(descriptor).is_err());
                }
            }
            // 32-bit: neither huge glyph fits.
            None => {
                assert_eq!(engine.error_count(), 2);
                assert_eq!(names(&engine), vec!["c"]);
                assert_eq!(engine.descriptors()[0].offset(), 0);
                assert_eq!(
                    engine.glyph_bitmap(&engine.descriptors()[0]),
                    Ok(vec![vec![true]])
                );
            }
        }
    }

    #[test]
    fn test_warnings_stay_zero() {
        let glyphs = vec![GlyphSpec::new("x").with_rows(["#", "#", "#"])];
        let engine = SymbolEngine::new(Geometry::new(1, 1, 0, 0), &glyphs);
        assert_eq!(engine.warning_count(), 0);
        assert!(!engine.has_warnings());
    }
}
