//! C source generation.
//!
//! Emits the packed bitstream as a `uint8_t` array and the descriptor table
//! as an array of structs, both tagged with a per-font program-memory macro
//! that the user fills in for their target.

use glyphpack_engine::{GlyphDescriptor, SymbolEngine};
use regex::Regex;
use std::fmt::Write as _;
use std::sync::OnceLock;
use thiserror::Error;

/// Hex values per line unless configured otherwise.
pub const DEFAULT_BYTES_PER_LINE: usize = 4;

/// Prefix used when a font name sanitizes to nothing.
pub const FALLBACK_PREFIX: &str = "font";

static NON_IDENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn non_ident_regex() -> &'static Regex {
    NON_IDENT_REGEX.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("invalid regex pattern"))
}

/// Options for [`generate_c_source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Hex values per line in the data array. Values below 1 are treated as 1.
    pub bytes_per_line: usize,
    /// Text for the leading comment, e.g. "glyphpack v0.1.0".
    pub generator: Option<String>,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
            generator: None,
        }
    }
}

/// Errors from C source generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// The engine counted errors; nothing is emitted.
    #[error("code output generation failed due to {count} error(s) during parsing")]
    GlyphErrors { count: usize },
}

/// Turns a font name into a C identifier.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`, a leading digit gets
/// a `_` prefix, and an empty name becomes [`FALLBACK_PREFIX`].
///
/// ```
/// use glyphpack_cli::codegen::c_identifier;
///
/// assert_eq!(c_identifier("tiny-5x7"), "tiny_5x7");
/// assert_eq!(c_identifier("8bit"), "_8bit");
/// assert_eq!(c_identifier(""), "font");
/// ```
pub fn c_identifier(name: &str) -> String {
    if name.is_empty() {
        return FALLBACK_PREFIX.to_string();
    }
    let ident = non_ident_regex().replace_all(name, "_");
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", ident)
    } else {
        ident.into_owned()
    }
}

/// Escapes a glyph name for use inside a `// "..."` comment.
pub fn escape_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Estimated memory footprint in bytes: the bitstream plus one offset word
/// and four geometry bytes per descriptor.
pub fn estimated_memory_bytes(engine: &SymbolEngine) -> usize {
    engine.bitstream_size() + engine.descriptor_count() * (4 + std::mem::size_of::<usize>())
}

/// Descriptors whose values do not fit the generated struct fields.
pub fn oversized_descriptors(engine: &SymbolEngine) -> Vec<&GlyphDescriptor> {
    engine
        .descriptors()
        .iter()
        .filter(|d| {
            u32::try_from(d.offset()).is_err()
                || d.width() > u8::MAX as u32
                || d.height() > u8::MAX as u32
                || d.padding_horizontal() > u8::MAX as u32
                || d.padding_vertical() > u8::MAX as u32
        })
        .collect()
}

/// Generates the C source for a packed font.
///
/// # Errors
/// [`CodegenError::GlyphErrors`] when the engine counted any error.
pub fn generate_c_source(
    fontname: &str,
    engine: &SymbolEngine,
    options: &CodegenOptions,
) -> Result<String, CodegenError> {
    if engine.has_errors() {
        return Err(CodegenError::GlyphErrors {
            count: engine.error_count(),
        });
    }

    let prefix = c_identifier(fontname);
    let macro_name = format!("{}_PROGMEM", prefix.to_ascii_uppercase());
    let mut out = String::new();

    if let Some(generator) = &options.generator {
        out.push_str(&format!(
            "/* Generated by {} from font \"{}\". */\n\n",
            generator,
            escape_name(fontname)
        ));
    }

    out.push_str("#include <stdint.h>\n\n");
    out.push_str(&format!(
        "#define {} /* place program-memory attribute here */\n\n",
        macro_name
    ));
    out.push_str("typedef struct {\n");
    out.push_str("    uint32_t offset;\n");
    out.push_str("    uint8_t width;\n");
    out.push_str("    uint8_t height;\n");
    out.push_str("    uint8_t paddingHorizontal;\n");
    out.push_str("    uint8_t paddingVertical;\n");
    out.push_str(&format!("}} {}_descriptor_t;\n\n", prefix));

    out.push_str(&format!("uint8_t {}_data[] = {{\n", prefix));
    out.push_str(&data_lines(engine.bitstream(), options.bytes_per_line));
    out.push_str(&format!("}} {};\n\n", macro_name));

    out.push_str(&format!(
        "{}_descriptor_t {}_descriptors[] = {{\n",
        prefix, prefix
    ));
    out.push_str(&descriptor_lines(engine.descriptors()));
    out.push_str(&format!("}} {};\n", macro_name));

    Ok(out)
}

fn data_lines(bytes: &[u8], bytes_per_line: usize) -> String {
    let lines: Vec<String> = bytes
        .chunks(bytes_per_line.max(1))
        .map(|chunk| {
            let values: Vec<String> = chunk.iter().map(|b| format!("0x{:02x}", b)).collect();
            format!("    {}", values.join(", "))
        })
        .collect();

    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join(",\n"))
    }
}

fn descriptor_lines(descriptors: &[GlyphDescriptor]) -> String {
    let mut out = String::new();
    for (i, d) in descriptors.iter().enumerate() {
        let separator = if i + 1 == descriptors.len() { ' ' } else { ',' };
        let _ = writeln!(
            out,
            "    {{ {:>4}, {:>4}, {:>4}, {:>4}, {:>4} }}{} // \"{}\"",
            d.offset(),
            d.width(),
            d.height(),
            d.padding_horizontal(),
            d.padding_vertical(),
            separator,
            escape_name(d.name())
        );
    }
    out
}
