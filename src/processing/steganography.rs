//! # LSB Steganography Codec
//!
//! Hides a document (payload bytes plus its file extension) in the least
//! significant bit of every R, G and B channel of an image.
//!
//! ## Algorithm
//!
//! ### Encoding Process
//! 1. Build the frame: `[ext_len][ext][msg_len][message]`
//! 2. Check the frame against [`capacity`]
//! 3. Write the frame MSB first into the channel LSBs (R → G → B → next pixel)
//! 4. Clear the LSB of every remaining channel
//!
//! ### Decoding Process
//! 1. Read the extension length and extension
//! 2. Read the message length and validate it against the remaining bits
//! 3. Read the message bytes
//!
//! ### Capacity
//! An image can store `(width * height * 3 - 32) / 8` bytes of frame data.
//!
//! Example: A 200x200 image can store 14,996 bytes.

use image::RgbImage;

use crate::common::config::CodecConfig;
use crate::processing::bit_channel::{embed_bits, BitReader};
use crate::processing::frame::{build_frame, parse_frame};

pub use crate::processing::capacity::capacity;
pub use crate::processing::error::StegoError;

/// Embed `payload` into a copy of `channels`.
///
/// # Arguments
/// - `config`: Codec settings
/// - `payload`: Bytes to hide (may be empty)
/// - `channels`: Flat RGB channel values in scan order
/// - `extension`: Optional file extension, with or without a leading dot
///
/// # Returns
/// - `Ok(Vec<u8>)`: The modified channel values, same length and order
/// - `Err(StegoError::CapacityExceeded)`: The frame does not fit
///
/// # Example
/// ```ignore
/// let stego = encode(&CodecConfig::default(), b"secret", &channels, Some("txt"))?;
/// ```
pub fn encode(
    config: &CodecConfig,
    payload: &[u8],
    channels: &[u8],
    extension: Option<&str>,
) -> Result<Vec<u8>, StegoError> {
    let mut output = channels.to_vec();
    encode_in_place(config, payload, &mut output, extension)?;
    Ok(output)
}

/// Embed `payload` by overwriting the LSBs of `channels`.
///
/// On error the buffer is left untouched.
pub fn encode_in_place(
    config: &CodecConfig,
    payload: &[u8],
    channels: &mut [u8],
    extension: Option<&str>,
) -> Result<(), StegoError> {
    let available = capacity(config, channels.len());
    let frame = build_frame(config, payload, extension);

    let representable = payload.len() as u64 <= config.max_message_len();
    if !representable || frame.len() as i64 > available {
        return Err(StegoError::CapacityExceeded {
            capacity: available,
            required: frame.len(),
        });
    }

    embed_bits(channels, &frame);
    Ok(())
}

/// Recover the payload and extension hidden in `channels`.
///
/// # Returns
/// - `Ok((payload, extension))`: `extension` is `None` when none was stored
/// - `Err(StegoError::MalformedFrame)`: No well-formed frame was found
pub fn decode(config: &CodecConfig, channels: &[u8]) -> Result<(Vec<u8>, Option<String>), StegoError> {
    let mut reader = BitReader::new(channels);
    let frame = parse_frame(config, &mut reader)?;
    Ok((frame.payload, frame.extension))
}

/// Hide `payload` in `image`, returning a new image of the same size.
pub fn hide_in_image(
    config: &CodecConfig,
    image: &RgbImage,
    payload: &[u8],
    extension: Option<&str>,
) -> Result<RgbImage, StegoError> {
    let mut output = image.clone();
    encode_in_place(config, payload, &mut output, extension)?;
    Ok(output)
}

/// Extract the payload and extension hidden in `image`.
pub fn extract_from_image(
    config: &CodecConfig,
    image: &RgbImage,
) -> Result<(Vec<u8>, Option<String>), StegoError> {
    decode(config, image.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient_channels(count: usize) -> Vec<u8> {
        (0..count).map(|i| ((i * 31 + 7) % 256) as u8).collect()
    }

    #[test]
    fn test_encode_decode_text() {
        let config = CodecConfig::default();
        let channels = gradient_channels(200 * 200 * 3);

        let encoded = encode(&config, b"Hello, World!", &channels, None).unwrap();
        assert_eq!(encoded.len(), channels.len());

        let (payload, extension) = decode(&config, &encoded).unwrap();
        assert_eq!(payload, b"Hello, World!".to_vec());
        assert_eq!(extension, None);
    }

    #[test]
    fn test_encode_only_touches_lsb() {
        let config = CodecConfig::default();
        let channels = gradient_channels(3000);

        let encoded = encode(&config, b"abc", &channels, Some("txt")).unwrap();
        for (before, after) in channels.iter().zip(&encoded) {
            assert_eq!(before & 0xFE, after & 0xFE);
        }
        // padding clears the LSB past the frame
        assert!(encoded[(1 + 3 + 4 + 3) * 8..].iter().all(|c| c & 1 == 0));
    }

    #[test]
    fn test_encode_in_place_matches_encode() {
        let config = CodecConfig::default();
        let channels = gradient_channels(900);
        let copied = encode(&config, b"in place", &channels, Some("md")).unwrap();

        let mut buffer = channels.clone();
        encode_in_place(&config, b"in place", &mut buffer, Some("md")).unwrap();
        assert_eq!(buffer, copied);
    }

    #[test]
    fn test_failed_encode_leaves_buffer_untouched() {
        let config = CodecConfig::default();
        let mut buffer = gradient_channels(300);
        let original = buffer.clone();

        let result = encode_in_place(&config, &[1u8; 64], &mut buffer, None);
        assert_eq!(
            result,
            Err(StegoError::CapacityExceeded {
                capacity: 33,
                required: 69
            })
        );
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_length_field_limit_counts_as_capacity() {
        let config = CodecConfig::new(1, 255).unwrap();
        let channels = gradient_channels(8 * 400);

        assert!(encode(&config, &[9u8; 255], &channels, None).is_ok());
        assert!(matches!(
            encode(&config, &[9u8; 256], &channels, None),
            Err(StegoError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_image_round_trip() {
        let config = CodecConfig::default();
        let image = RgbImage::from_fn(40, 30, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8]));

        let hidden = hide_in_image(&config, &image, b"report", Some(".csv")).unwrap();
        assert_eq!(hidden.dimensions(), (40, 30));

        let (payload, extension) = extract_from_image(&config, &hidden).unwrap();
        assert_eq!(payload, b"report".to_vec());
        assert_eq!(extension.as_deref(), Some("csv"));
    }
}
