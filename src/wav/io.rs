//! Audio file I/O
//!
//! Reads WAV files into buffers using the hound crate and writes encoded
//! assets back to disk. The source sample rate and channel count are
//! preserved exactly; there is no resampling and no channel conversion.

use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::engine::buffer::AudioBuffer;
use crate::error::{Result, WaveclipError};
use crate::wav::encode::EncodedAsset;

/// MIME types the editing pipeline accepts as upload sources
const ACCEPTED_MIME_TYPES: [&str; 4] = ["audio/wav", "audio/mpeg", "audio/mp3", "audio/ogg"];

/// Check whether an uploaded file's MIME type is an accepted source
pub fn is_supported_mime(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime)
}

/// Import a WAV file into an audio buffer
///
/// Accepts 8/16/24-bit and 32-bit integer or 32-bit float WAV data;
/// everything is normalized to f32 in [-1.0, 1.0] and de-interleaved.
///
/// # Arguments
/// * `path` - Path to the WAV file
///
/// # Errors
/// * `ReadError` if the file cannot be opened or its samples decoded
/// * `UnsupportedSourceFormat` for bit depths hound reads but this
///   pipeline does not accept
pub fn import_wav(path: &Path) -> Result<AudioBuffer> {
    let reader = WavReader::open(path).map_err(|e| WaveclipError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let spec = reader.spec();
    let num_channels = spec.channels as usize;
    let sample_rate = spec.sample_rate;

    let interleaved = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format, path)?;

    AudioBuffer::from_interleaved(&interleaved, num_channels, sample_rate)
}

/// Write an encoded asset's bytes to a file
///
/// The asset already holds complete WAV bytes; this is a plain write,
/// not a re-encode.
pub fn write_asset(asset: &EncodedAsset, path: &Path) -> Result<()> {
    std::fs::write(path, &asset.bytes)?;
    Ok(())
}

/// Read samples from a WAV reader and convert to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
    path: &Path,
) -> Result<Vec<f32>> {
    let read_err = |e: hound::Error| WaveclipError::ReadError {
        path: path.display().to_string(),
        source: e,
    };

    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(read_err),
        SampleFormat::Int => match bits_per_sample {
            8 => reader
                .samples::<i8>()
                .map(|s| s.map(|v| v as f32 / 128.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(read_err),
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / 32768.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(read_err),
            24 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 8388608.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(read_err),
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 2147483648.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(read_err),
            other => Err(WaveclipError::UnsupportedSourceFormat {
                format: format!("{}-bit integer WAV", other),
            }),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
