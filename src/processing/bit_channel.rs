//! # LSB Bit Channel
//!
//! Maps a flat sequence of channel values (R, G, B, R, G, B, ...) to a flat
//! bit sequence and back. Each channel carries exactly one bit in its least
//! significant position; bytes are laid out most-significant bit first.

/// Write `bytes` into the LSBs of `channels`, MSB first.
///
/// Every channel is touched exactly once: channels past the end of the data
/// receive a zero bit, and bits that do not fit in `channels` are dropped.
/// The upper seven bits of each channel are preserved.
pub fn embed_bits(channels: &mut [u8], bytes: &[u8]) {
    let mut bits = bytes
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1));

    for channel in channels.iter_mut() {
        let bit = bits.next().unwrap_or(0);
        *channel = (*channel & 0xFE) | bit;
    }
}

/// Sequential reader over the LSBs of a borrowed channel buffer.
///
/// Bits are pulled lazily so a failed parse never materializes the whole
/// bitstream.
#[derive(Debug)]
pub struct BitReader<'a> {
    channels: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first channel.
    pub fn new(channels: &'a [u8]) -> Self {
        Self { channels, pos: 0 }
    }

    /// Number of unread bits.
    pub fn remaining(&self) -> usize {
        self.channels.len() - self.pos
    }

    /// Read the next 8 bits as one byte, or `None` if fewer remain.
    pub fn read_byte(&mut self) -> Option<u8> {
        let end = self.pos.checked_add(8)?;
        let group = self.channels.get(self.pos..end)?;
        self.pos = end;
        Some(pack_byte(group))
    }

    /// Read the next `count` bytes, or `None` (consuming nothing) if the
    /// buffer is too short.
    pub fn read_bytes(&mut self, count: usize) -> Option<Vec<u8>> {
        let bits = count.checked_mul(8)?;
        if bits > self.remaining() {
            return None;
        }
        let bytes = self.channels[self.pos..self.pos + bits]
            .chunks_exact(8)
            .map(pack_byte)
            .collect();
        self.pos += bits;
        Some(bytes)
    }
}

/// Pack the LSBs of eight channels into a byte, first channel in the MSB.
fn pack_byte(group: &[u8]) -> u8 {
    group.iter().fold(0u8, |acc, channel| (acc << 1) | (channel & 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_writes_msb_first() {
        let mut channels = vec![0u8; 8];
        embed_bits(&mut channels, &[0b1010_0001]);
        assert_eq!(channels, vec![1, 0, 1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_embed_preserves_upper_bits_and_pads_with_zero() {
        let mut channels = vec![0xFF; 12];
        embed_bits(&mut channels, &[0x00]);

        // data bits clear the LSB, padding bits clear it too
        assert!(channels.iter().all(|&c| c == 0xFE));
    }

    #[test]
    fn test_embed_drops_bits_beyond_buffer() {
        let mut channels = vec![0u8; 4];
        embed_bits(&mut channels, &[0xFF, 0xFF]);
        assert_eq!(channels, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_reader_reads_back_embedded_bytes() {
        let mut channels: Vec<u8> = (0..40).map(|i| (i * 37 % 256) as u8).collect();
        embed_bits(&mut channels, &[0xDE, 0xAD, 0xBE]);

        let mut reader = BitReader::new(&channels);
        assert_eq!(reader.read_byte(), Some(0xDE));
        assert_eq!(reader.read_bytes(2), Some(vec![0xAD, 0xBE]));
        assert_eq!(reader.remaining(), 16);
        assert_eq!(reader.read_bytes(2), Some(vec![0, 0]));
        assert_eq!(reader.read_byte(), None);
    }

    #[test]
    fn test_reader_short_read_consumes_nothing() {
        let channels = vec![1u8; 15];
        let mut reader = BitReader::new(&channels);

        assert_eq!(reader.read_bytes(2), None);
        assert_eq!(reader.remaining(), 15);
        assert_eq!(reader.read_byte(), Some(0xFF));
        assert_eq!(reader.read_byte(), None);
        assert_eq!(reader.remaining(), 7);
    }
}
