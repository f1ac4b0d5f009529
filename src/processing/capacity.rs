//! Capacity calculation.
//!
//! Capacity is the number of bytes left after reserving the message length
//! header. The extension field is not reserved here, and the encoder's
//! admission check compares the whole frame against this figure.

use crate::common::config::CodecConfig;

/// Embeddable bytes for an image with `channel_count` channels.
///
/// Uses floor division, so images with fewer channels than the length header
/// needs yield a negative value. Callers clamp to 0 for display.
pub fn capacity(config: &CodecConfig, channel_count: usize) -> i64 {
    let available_bits = channel_count as i64 - config.length_field_bits() as i64;
    available_bits.div_euclid(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_reserves_length_header() {
        let config = CodecConfig::default();
        // 100x100 RGB
        assert_eq!(capacity(&config, 30_000), 3746);
        // 200x200 RGB
        assert_eq!(capacity(&config, 120_000), 14996);
    }

    #[test]
    fn test_capacity_floors_partial_bytes() {
        let config = CodecConfig::default();
        assert_eq!(capacity(&config, 32), 0);
        assert_eq!(capacity(&config, 39), 0);
        assert_eq!(capacity(&config, 40), 1);
    }

    #[test]
    fn test_capacity_negative_for_tiny_images() {
        let config = CodecConfig::default();
        assert_eq!(capacity(&config, 31), -1);
        assert_eq!(capacity(&config, 3), -4);
        assert_eq!(capacity(&config, 0), -4);
    }

    #[test]
    fn test_capacity_follows_length_field_width() {
        let config = CodecConfig::new(2, 255).unwrap();
        assert_eq!(capacity(&config, 30_000), 3748);
    }
}
