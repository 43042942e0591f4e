//! Determinism verification.
//!
//! Packing and code generation must be pure functions of the font document:
//! the same document packs to the same bitstream and the same header text on
//! every run. These helpers run a generator several times and compare the
//! outputs byte for byte.

use std::fmt;

/// Result of a determinism check.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the first run's output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// The first difference found, if any.
    pub diff_info: Option<DiffInfo>,
}

/// The first byte where a run disagreed with the first run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    /// Byte offset of the difference.
    pub offset: usize,
    /// Byte from the first run, or `None` if the first run ended earlier.
    pub expected: Option<u8>,
    /// Byte from the differing run, or `None` if that run ended earlier.
    pub actual: Option<u8>,
    /// Index of the differing run.
    pub run_index: usize,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |b: Option<u8>| match b {
            Some(b) => format!("0x{:02X}", b),
            None => "end of output".to_string(),
        };
        write!(
            f,
            "Difference at byte {}: expected {}, got {} (run {})",
            self.offset,
            show(self.expected),
            show(self.actual),
            self.run_index
        )
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff_info {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Output size: {} bytes\n\
                 Hash: {}\n\
                 {}",
                self.runs, self.output_size, self.hash, diff
            );
        }
    }
}

/// Runs `generate_fn` `runs` times and compares every output to the first.
///
/// # Panics
/// When `runs` is less than 2.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<[u8]>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference = reference.as_ref();
    let hash = compute_hash(reference);

    for run_index in 1..runs {
        let output = generate_fn();
        if let Some(diff) = first_difference(reference, output.as_ref(), run_index) {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                output_size: reference.len(),
                hash,
                diff_info: Some(diff),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        output_size: reference.len(),
        hash,
        diff_info: None,
    }
}

fn first_difference(expected: &[u8], actual: &[u8], run_index: usize) -> Option<DiffInfo> {
    let len = expected.len().max(actual.len());
    (0..len)
        .find(|&i| expected.get(i) != actual.get(i))
        .map(|offset| DiffInfo {
            offset,
            expected: expected.get(offset).copied(),
            actual: actual.get(offset).copied(),
            run_index,
        })
}

/// True when every hash equals the first (or the slice is empty).
pub fn verify_hash_determinism(hashes: &[String]) -> bool {
    hashes.windows(2).all(|pair| pair[0] == pair[1])
}

/// Compute BLAKE3 hash of data.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Panics unless `generate_fn` returns the same bytes on each of `runs` runs.
pub fn assert_deterministic<F>(runs: usize, generate_fn: F)
where
    F: Fn() -> Vec<u8>,
{
    verify_determinism(&generate_fn, runs).assert_deterministic();
}
