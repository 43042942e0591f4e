//! Glyph descriptors and their display ordering.

use std::cmp::Ordering;

use glyphpack_spec::Geometry;

/// Where a packed glyph lives in the bitstream, and how big it is.
///
/// Descriptors are plain data. Any geometry is accepted, including zero
/// sizes; checking rows against geometry is the engine's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphDescriptor {
    name: String,
    offset: usize,
    geometry: Geometry,
}

impl GlyphDescriptor {
    /// Creates a descriptor.
    pub fn new(name: impl Into<String>, offset: usize, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            offset,
            geometry,
        }
    }

    /// Glyph name. May be empty and is not guaranteed to be unique.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bit index of the glyph's first pixel.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn width(&self) -> u32 {
        self.geometry.width
    }

    pub fn height(&self) -> u32 {
        self.geometry.height
    }

    pub fn padding_horizontal(&self) -> u32 {
        self.geometry.padding_horizontal
    }

    pub fn padding_vertical(&self) -> u32 {
        self.geometry.padding_vertical
    }

    /// All four geometry values.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Orders descriptors for output tables. See [`compare_names`].
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        compare_names(&self.name, &other.name)
    }
}

/// Output-table order for glyph names.
///
/// Single-character names come first, ordered by code point. Every other
/// name (empty or longer than one character) follows, ordered
/// lexicographically. A single-character name precedes any other name
/// regardless of its value, so `"~"` sorts before `"AA"`.
///
/// ```
/// use glyphpack_engine::compare_names;
///
/// let mut names = vec!["ba", "b", "a", ""];
/// names.sort_by(|a, b| compare_names(a, b));
/// assert_eq!(names, vec!["a", "b", "", "ba"]);
/// ```
pub fn compare_names(lhs: &str, rhs: &str) -> Ordering {
    match (single_char(lhs), single_char(rhs)) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => lhs.cmp(rhs),
    }
}

fn single_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<&str> = names.to_vec();
        names.sort_by(|a, b| compare_names(a, b));
        names.into_iter().map(String::from).collect()
    }

    #[test]
    fn test_accessors() {
        let d = GlyphDescriptor::new("A", 12, Geometry::new(3, 2, 1, 4));
        assert_eq!(d.name(), "A");
        assert_eq!(d.offset(), 12);
        assert_eq!(d.width(), 3);
        assert_eq!(d.height(), 2);
        assert_eq!(d.padding_horizontal(), 1);
        assert_eq!(d.padding_vertical(), 4);
        assert_eq!(d.geometry(), Geometry::new(3, 2, 1, 4));
    }

    #[test]
    fn test_zero_geometry_is_allowed() {
        let d = GlyphDescriptor::new("", 0, Geometry::default());
        assert_eq!(d.width(), 0);
        assert_eq!(d.name(), "");
    }

    #[test]
    fn test_single_chars_first() {
        assert_eq!(sorted(&["b", "ba", "a"]), vec!["a", "b", "ba"]);
    }

    #[test]
    fn test_single_char_beats_any_longer_name() {
        assert_eq!(compare_names("~", "AA"), Ordering::Less);
        assert_eq!(compare_names("AA", "~"), Ordering::Greater);
        assert_eq!(compare_names("z", ""), Ordering::Less);
    }

    #[test]
    fn test_single_chars_by_code_point() {
        assert_eq!(
            sorted(&["a", "Z", "0", " ", "é"]),
            vec![" ", "0", "Z", "a", "é"]
        );
    }

    #[test]
    fn test_multi_char_names_lexicographic() {
        assert_eq!(
            sorted(&["space", "arrow_up", "", "arrow"]),
            vec!["", "arrow", "arrow_up", "space"]
        );
    }

    #[test]
    fn test_multibyte_single_char_counts_as_single() {
        // "é" is two bytes but one character.
        assert_eq!(compare_names("é", "ab"), Ordering::Less);
    }

    #[test]
    fn test_display_cmp_uses_names() {
        let a = GlyphDescriptor::new("a", 100, Geometry::new(1, 1, 0, 0));
        let b = GlyphDescriptor::new("bb", 0, Geometry::new(1, 1, 0, 0));
        assert_eq!(a.display_cmp(&b), Ordering::Less);
        assert_eq!(a.display_cmp(&a.clone()), Ordering::Equal);
    }
}
