//! glyphpack engine
//!
//! Packs monochrome pixel-art glyphs into one contiguous MSB-first bitstream
//! and builds the descriptor table that locates each glyph in it.
//!
//! The engine is the pure core of glyphpack: it does no I/O and never fails
//! to build. Glyphs whose rows disagree with their geometry are counted as
//! errors and left out of the descriptor table; callers decide whether to emit
//! anything when [`SymbolEngine::has_errors`] is true.

pub mod bits;
pub mod descriptor;
pub mod engine;
pub mod error;

pub use bits::{read_bit, BitWriter};
pub use descriptor::{compare_names, GlyphDescriptor};
pub use engine::{DiagnosticKind, GlyphDiagnostic, SymbolEngine};
pub use error::EngineError;
