//! ASCII previews of packed glyphs.
//!
//! Pixels are read back from the packed bitstream, not from the source rows,
//! so a preview shows exactly what the generated arrays contain.

use glyphpack_engine::{EngineError, GlyphDescriptor, SymbolEngine};
use thiserror::Error;

/// Character drawn for the frame around a glyph.
pub const FRAME: char = '*';
/// Character drawn for a set pixel.
pub const SET_PIXEL: char = '#';
/// Largest padding drawn, the same bound as the generated `uint8_t` fields.
pub const MAX_PREVIEW_PADDING: u32 = u8::MAX as u32;

/// Why a glyph could not be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The glyph's pixels could not be read back.
    #[error(transparent)]
    Bits(#[from] EngineError),

    /// The glyph's padding is too large to draw.
    #[error("padding {horizontal}x{vertical} exceeds the preview limit of {limit}")]
    PaddingTooLarge {
        horizontal: u32,
        vertical: u32,
        limit: u32,
    },
}

impl RenderError {
    /// Stable code shown next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            RenderError::Bits(e) => e.code(),
            RenderError::PaddingTooLarge { .. } => "RENDER_001",
        }
    }
}

/// Header line naming a glyph and its geometry.
pub fn glyph_header(descriptor: &GlyphDescriptor) -> String {
    format!(
        "Glyph: \"{}\" ({}, {}, {}, {}):",
        descriptor.name(),
        descriptor.width(),
        descriptor.height(),
        descriptor.padding_horizontal(),
        descriptor.padding_vertical()
    )
}

/// Draws a glyph inside a frame, with its padding shown as blank space.
///
/// Every line, including the last, ends with a newline.
///
/// # Errors
/// [`RenderError::PaddingTooLarge`] when either padding exceeds
/// [`MAX_PREVIEW_PADDING`], and [`RenderError::Bits`] when the glyph's pixels
/// lie past the end of the bitstream, which happens for glyphs declared
/// without data.
pub fn render_glyph(engine: &SymbolEngine, descriptor: &GlyphDescriptor) -> Result<String, RenderError> {
    if descriptor.padding_horizontal() > MAX_PREVIEW_PADDING
        || descriptor.padding_vertical() > MAX_PREVIEW_PADDING
    {
        return Err(RenderError::PaddingTooLarge {
            horizontal: descriptor.padding_horizontal(),
            vertical: descriptor.padding_vertical(),
            limit: MAX_PREVIEW_PADDING,
        });
    }
    let bitmap = engine.glyph_bitmap(descriptor)?;

    let width = descriptor.width() as usize;
    let pad_h = descriptor.padding_horizontal() as usize;
    let inner = width + 2 * pad_h;

    let border: String = std::iter::repeat(FRAME).take(inner + 2).collect();
    let blank = format!("{}{}{}", FRAME, " ".repeat(inner), FRAME);
    let side_pad = " ".repeat(pad_h);

    let mut lines = Vec::with_capacity(bitmap.len() + 2 * descriptor.padding_vertical() as usize + 2);
    lines.push(border.clone());
    for _ in 0..descriptor.padding_vertical() {
        lines.push(blank.clone());
    }
    for row in &bitmap {
        let pixels: String = row
            .iter()
            .map(|&set| if set { SET_PIXEL } else { ' ' })
            .collect();
        lines.push(format!("{}{}{}{}{}", FRAME, side_pad, pixels, side_pad, FRAME));
    }
    for _ in 0..descriptor.padding_vertical() {
        lines.push(blank.clone());
    }
    lines.push(border);

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}
