//! Engine errors.

use thiserror::Error;

/// Errors returned by engine queries.
///
/// Building an engine never fails; only lookups into the finished bitstream
/// can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Bit offset lies past the end of the packed bitstream.
    #[error("bit offset {offset} is out of range (bitstream holds {available} bits)")]
    OutOfRange {
        /// Requested bit offset.
        offset: usize,
        /// Number of addressable bits.
        available: usize,
    },
}

impl EngineError {
    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::OutOfRange { .. } => "ENGINE_001",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = EngineError::OutOfRange {
            offset: 17,
            available: 16,
        };
        assert_eq!(
            err.to_string(),
            "bit offset 17 is out of range (bitstream holds 16 bits)"
        );
        assert_eq!(err.code(), "ENGINE_001");
    }
}
