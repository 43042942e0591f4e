//! Canonical hashing.
//!
//! Documents are hashed over a canonical JSON form (sorted keys, no
//! whitespace, minimal escaping) so that formatting changes in the source
//! file do not change the hash. Packed bitstreams are hashed as raw bytes.

use crate::error::SpecError;
use crate::font::FontDocument;

/// Computes the canonical BLAKE3 hash of a font document.
///
/// ```text
/// document_hash = hex(BLAKE3(canonical_json(document)))
/// ```
///
/// # Example
/// ```
/// use glyphpack_spec::{FontDocument, Geometry, GlyphSpec};
/// use glyphpack_spec::hash::canonical_document_hash;
///
/// let doc = FontDocument::new("tiny", Geometry::new(3, 2, 0, 0))
///     .symbol(GlyphSpec::new("A").with_rows(["# #", " # "]));
///
/// let hash = canonical_document_hash(&doc).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_document_hash(doc: &FontDocument) -> Result<String, SpecError> {
    let value = doc.to_value()?;
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    blake3_hash_str(&canonicalize_json(value))
}

/// Renders a JSON value in canonical form.
///
/// - Object keys are sorted lexicographically
/// - No whitespace between tokens
/// - Strings use minimal escaping
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &serde_json::Value, out: &mut String) {
    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => out.push_str(&n.to_string()),
        serde_json::Value::String(s) => write_canonical_string(s, out),
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        serde_json::Value::Object(map) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical_string(key, out);
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
    }
}

fn write_canonical_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Computes a BLAKE3 hash of arbitrary data.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
pub fn blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Computes a BLAKE3 hash of a string.
pub fn blake3_hash_str(s: &str) -> String {
    blake3_hash(s.as_bytes())
}
