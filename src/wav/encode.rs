//! PCM Encoder
//!
//! Serializes an audio buffer into a canonical uncompressed WAV byte
//! stream: a 44-byte RIFF/WAVE header followed by channel-interleaved
//! 16-bit signed PCM, little-endian throughout. The header is written by
//! hand so the byte layout is exact and testable; file reading goes
//! through hound elsewhere.

use crate::engine::buffer::AudioBuffer;
use crate::error::{Result, WaveclipError};

/// MIME tag for encoded assets
pub const WAV_MIME: &str = "audio/wav";

/// Default file name offered for a downloaded asset
pub const DEFAULT_EXPORT_NAME: &str = "edited_audio.wav";

/// Fixed header length: RIFF descriptor + fmt chunk + data chunk header
const HEADER_LEN: usize = 44;

/// Size of the fmt subchunk body for linear PCM
const FMT_CHUNK_LEN: u32 = 16;

/// AudioFormat tag for uncompressed linear PCM
const FORMAT_PCM: u16 = 1;

/// Output bit depth
const BITS_PER_SAMPLE: u16 = 16;

/// Bytes per encoded sample
const BYTES_PER_SAMPLE: usize = 2;

/// An encoded audio asset ready for playback or download
///
/// Produced once per encode request and handed to the caller; the core
/// keeps no copy.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAsset {
    /// Complete WAV file bytes
    pub bytes: Vec<u8>,
    /// MIME tag for the byte content
    pub mime: &'static str,
}

impl EncodedAsset {
    /// Total encoded size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the asset holds no bytes (never true for a valid encode)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode a buffer to complete WAV file bytes
///
/// # Arguments
/// * `buffer` - The audio to serialize; samples outside [-1.0, 1.0] are
///   clamped here, never upstream
///
/// # Returns
/// A byte vector of `44 + frames * channels * 2` bytes. A zero-frame
/// buffer encodes to a valid 44-byte file.
///
/// # Errors
/// `EncodingFailure` for a zero-channel buffer or one whose shape
/// exceeds the 16-bit/32-bit header fields;
/// `InconsistentChannelLength` if the channels disagree in length.
pub fn encode(buffer: &AudioBuffer) -> Result<Vec<u8>> {
    buffer.check_consistent()?;

    let num_channels = buffer.num_channels();
    let num_frames = buffer.len();
    if num_channels == 0 {
        return Err(WaveclipError::EncodingFailure {
            reason: "buffer has no channels".to_string(),
        });
    }
    // BlockAlign (channels * 2) must fit its 16-bit field
    if num_channels > (u16::MAX / BYTES_PER_SAMPLE as u16) as usize {
        return Err(WaveclipError::EncodingFailure {
            reason: format!("{} channels exceed the WAV header fields", num_channels),
        });
    }

    let data_len = num_frames * num_channels * BYTES_PER_SAMPLE;
    if data_len > (u32::MAX as usize) - 36 {
        return Err(WaveclipError::EncodingFailure {
            reason: format!("{} data bytes exceed the RIFF size field", data_len),
        });
    }

    let sample_rate = buffer.sample_rate();
    let byte_rate = sample_rate as u64 * num_channels as u64 * BYTES_PER_SAMPLE as u64;
    if byte_rate > u32::MAX as u64 {
        return Err(WaveclipError::EncodingFailure {
            reason: format!("byte rate {} exceeds the WAV header field", byte_rate),
        });
    }
    let byte_rate = byte_rate as u32;
    let block_align = (num_channels * BYTES_PER_SAMPLE) as u16;

    let mut bytes = Vec::with_capacity(HEADER_LEN + data_len);

    // RIFF descriptor
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len as u32).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    // fmt subchunk
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    bytes.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    bytes.extend_from_slice(&(num_channels as u16).to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data subchunk
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&(data_len as u32).to_le_bytes());

    for frame in 0..num_frames {
        for channel in buffer.channels() {
            bytes.extend_from_slice(&quantize(channel[frame]).to_le_bytes());
        }
    }

    Ok(bytes)
}

/// Encode a buffer into an [`EncodedAsset`] tagged `audio/wav`
pub fn encode_asset(buffer: &AudioBuffer) -> Result<EncodedAsset> {
    let bytes = encode(buffer)?;
    Ok(EncodedAsset {
        bytes,
        mime: WAV_MIME,
    })
}

/// Quantize one float sample to 16-bit signed PCM
///
/// Clamps to [-1.0, 1.0], then scales negatives by 32768 and
/// non-negatives by 32767, truncating toward zero. The asymmetric scale
/// is the canonical 16-bit full-scale convention: -1.0 maps to -32768
/// and +1.0 to +32767.
#[inline]
fn quantize(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(0.0, 0 ; "zero")]
    #[test_case(1.0, 32767 ; "positive full scale")]
    #[test_case(-1.0, -32768 ; "negative full scale")]
    #[test_case(0.5, 16383 ; "positive half truncates")]
    #[test_case(-0.5, -16384 ; "negative half")]
    #[test_case(1.5, 32767 ; "overrange clamps high")]
    #[test_case(-1.5, -32768 ; "overrange clamps low")]
    fn test_quantize(input: f32, expected: i16) {
        assert_eq!(quantize(input), expected);
    }

    #[test]
    fn test_header_layout_exact() {
        // 2 channels, 44100 Hz, 10 zero frames: 84 bytes total,
        // dataSize = 40, ChunkSize = 76
        let buffer = AudioBuffer::silence(2, 10, 44100);
        let bytes = encode(&buffer).unwrap();
        assert_eq!(bytes.len(), 84);

        let mut expected = Vec::new();
        expected.extend_from_slice(b"RIFF");
        expected.extend_from_slice(&76u32.to_le_bytes());
        expected.extend_from_slice(b"WAVE");
        expected.extend_from_slice(b"fmt ");
        expected.extend_from_slice(&16u32.to_le_bytes());
        expected.extend_from_slice(&1u16.to_le_bytes()); // linear PCM
        expected.extend_from_slice(&2u16.to_le_bytes()); // channels
        expected.extend_from_slice(&44100u32.to_le_bytes());
        expected.extend_from_slice(&176400u32.to_le_bytes()); // byte rate
        expected.extend_from_slice(&4u16.to_le_bytes()); // block align
        expected.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
        expected.extend_from_slice(b"data");
        expected.extend_from_slice(&40u32.to_le_bytes());
        assert_eq!(&bytes[..44], expected.as_slice());

        // Silence encodes to all-zero data
        assert!(bytes[44..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_interleaved_channel_order() {
        // Distinct per-channel values: data must read L0 R0 L1 R1
        let buffer =
            AudioBuffer::from_channels(vec![vec![0.25, 0.5], vec![-0.25, -0.5]], 8000).unwrap();
        let bytes = encode(&buffer).unwrap();
        let data = &bytes[44..];

        let sample = |i: usize| i16::from_le_bytes([data[2 * i], data[2 * i + 1]]);
        assert_eq!(sample(0), quantize(0.25));
        assert_eq!(sample(1), quantize(-0.25));
        assert_eq!(sample(2), quantize(0.5));
        assert_eq!(sample(3), quantize(-0.5));
    }

    #[test]
    fn test_empty_buffer_encodes_header_only() {
        let buffer = AudioBuffer::silence(1, 0, 44100);
        let bytes = encode(&buffer).unwrap();
        assert_eq!(bytes.len(), 44);
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 36);
    }

    #[test]
    fn test_zero_channels_rejected() {
        let buffer = AudioBuffer::from_channels(Vec::new(), 44100).unwrap();
        let result = encode(&buffer);
        assert!(matches!(
            result,
            Err(WaveclipError::EncodingFailure { .. })
        ));
    }

    #[test]
    fn test_encode_asset_mime() {
        let buffer = AudioBuffer::silence(1, 4, 22050);
        let asset = encode_asset(&buffer).unwrap();
        assert_eq!(asset.mime, WAV_MIME);
        assert_eq!(asset.len(), 44 + 8);
        assert!(!asset.is_empty());
    }

    #[test]
    fn test_sample_rate_carried_through() {
        let buffer = AudioBuffer::silence(1, 1, 96000);
        let bytes = encode(&buffer).unwrap();
        assert_eq!(
            u32::from_le_bytes(bytes[24..28].try_into().unwrap()),
            96000
        );
        // byte rate = 96000 * 1 * 2
        assert_eq!(
            u32::from_le_bytes(bytes[28..32].try_into().unwrap()),
            192000
        );
    }
}
