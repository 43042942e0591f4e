//! glyphpack End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the full pipeline:
//!
//! - Generation: font document -> C header and report
//! - Determinism: byte-identical bitstreams and headers across runs
//! - Properties: offsets, ordering, and bit layout for arbitrary fonts
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p glyphpack-tests
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use glyphpack_tests::determinism::verify_determinism;
//!
//! let result = verify_determinism(|| pack(&doc).bitstream().to_vec(), 3);
//! result.assert_deterministic();
//! ```

pub mod determinism;
pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use determinism::{
    assert_deterministic, compute_hash, verify_determinism, verify_hash_determinism,
    DeterminismResult, DiffInfo,
};
pub use fixtures::FontFixture;
pub use harness::{GenerateRun, TestHarness};
