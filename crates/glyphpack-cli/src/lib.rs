//! glyphpack CLI library.
//!
//! This crate provides the core functionality for the glyphpack CLI:
//! loading font documents, emitting C source, rendering previews, and the
//! command implementations used by the `glyphpack` binary.

pub mod codegen;
pub mod commands;
pub mod input;
pub mod render;
