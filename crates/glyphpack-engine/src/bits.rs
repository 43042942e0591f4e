//! MSB-first bit packing.
//!
//! Bit `n` of a packed stream lives in byte `n / 8` at mask `0x80 >> (n % 8)`.

/// Appends single bits to a byte buffer, most significant bit first.
///
/// A byte is sealed into the buffer as soon as its eighth bit is written.
/// [`BitWriter::finish`] seals a trailing partial byte with its unwritten
/// low bits left at zero.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    pending: u8,
    filled: u8,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one bit.
    pub fn push(&mut self, bit: bool) {
        if bit {
            self.pending |= 0x80 >> self.filled;
        }
        self.filled += 1;

        if self.filled == 8 {
            self.bytes.push(self.pending);
            self.pending = 0;
            self.filled = 0;
        }
    }

    /// Total number of bits appended so far.
    pub fn bits_written(&self) -> usize {
        self.bytes.len() * 8 + self.filled as usize
    }

    /// Bytes sealed so far, excluding the pending partial byte.
    pub fn sealed(&self) -> &[u8] {
        &self.bytes
    }

    /// Seals the pending partial byte, if any, and returns the buffer.
    pub fn finish(mut self) -> Vec<u8> {
        if self.filled != 0 {
            self.bytes.push(self.pending);
        }
        self.bytes
    }
}

/// Reads bit `offset` from an MSB-first packed buffer.
///
/// Returns `None` when `offset` lies past the end of `bytes`.
pub fn read_bit(bytes: &[u8], offset: usize) -> Option<bool> {
    let byte = bytes.get(offset / 8)?;
    Some(byte & (0x80 >> (offset % 8)) != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(bits: &[u8]) -> Vec<u8> {
        let mut writer = BitWriter::new();
        for &bit in bits {
            writer.push(bit != 0);
        }
        writer.finish()
    }

    #[test]
    fn test_msb_first() {
        assert_eq!(pack(&[1]), vec![0b1000_0000]);
        assert_eq!(pack(&[0, 0, 0, 0, 0, 0, 0, 1]), vec![0b0000_0001]);
        assert_eq!(pack(&[1, 0, 1, 0, 1, 0]), vec![0b1010_1000]);
    }

    #[test]
    fn test_seals_on_eighth_bit() {
        let mut writer = BitWriter::new();
        for _ in 0..7 {
            writer.push(true);
        }
        assert!(writer.sealed().is_empty());
        assert_eq!(writer.bits_written(), 7);

        writer.push(true);
        assert_eq!(writer.sealed(), &[0xFF]);
        assert_eq!(writer.bits_written(), 8);

        writer.push(true);
        assert_eq!(writer.sealed(), &[0xFF]);
        assert_eq!(writer.finish(), vec![0xFF, 0x80]);
    }

    #[test]
    fn test_finish_on_byte_boundary_adds_nothing() {
        assert_eq!(pack(&[1, 1, 1, 1, 0, 0, 0, 0]), vec![0xF0]);
        assert_eq!(pack(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_read_bit() {
        let bytes = [0b1010_0000, 0b0000_0001];
        assert_eq!(read_bit(&bytes, 0), Some(true));
        assert_eq!(read_bit(&bytes, 1), Some(false));
        assert_eq!(read_bit(&bytes, 2), Some(true));
        assert_eq!(read_bit(&bytes, 15), Some(true));
        assert_eq!(read_bit(&bytes, 16), None);
    }

    #[test]
    fn test_read_back_what_was_written() {
        let bits = [1u8, 1, 0, 1, 0, 0, 1, 0, 1, 1, 1, 0, 0];
        let bytes = pack(&bits);
        assert_eq!(bytes.len(), 2);
        for (offset, &bit) in bits.iter().enumerate() {
            assert_eq!(read_bit(&bytes, offset), Some(bit != 0), "bit {}", offset);
        }
        // Padding bits of the sealed partial byte read as zero.
        for offset in bits.len()..16 {
            assert_eq!(read_bit(&bytes, offset), Some(false));
        }
    }
}
