//! Buffer Transform Engine
//!
//! Pure trim/excise operations over audio buffers. Both operations read
//! the source buffer and build a fresh contiguous copy; the source is
//! never modified and no storage is shared with the result, so either a
//! complete valid buffer is returned or the caller's state is untouched.

use crate::engine::buffer::AudioBuffer;
use crate::error::{Result, WaveclipError};

/// Keep only the selected frame range, discarding the rest
///
/// # Arguments
/// * `buffer` - Source buffer (left untouched)
/// * `start_frame` - First frame to keep (inclusive)
/// * `end_frame` - End of the kept range (exclusive)
///
/// # Returns
/// A new buffer of `end_frame - start_frame` frames with the same channel
/// count and sample rate, where `result[i] == source[start_frame + i]`
/// for every channel.
///
/// # Errors
/// `InvalidRange` unless `start_frame < end_frame <= buffer.len()`;
/// `InconsistentChannelLength` if the source fails the defensive
/// channel-length check.
pub fn extract_range(
    buffer: &AudioBuffer,
    start_frame: usize,
    end_frame: usize,
) -> Result<AudioBuffer> {
    check_range(buffer, start_frame, end_frame)?;

    let channels: Vec<Vec<f32>> = buffer
        .channels()
        .iter()
        .map(|channel| channel[start_frame..end_frame].to_vec())
        .collect();

    AudioBuffer::from_channels(channels, buffer.sample_rate())
}

/// Excise the selected frame range, concatenating what remains
///
/// # Arguments
/// * `buffer` - Source buffer (left untouched)
/// * `start_frame` - First frame to remove (inclusive)
/// * `end_frame` - End of the removed range (exclusive)
///
/// # Returns
/// A new buffer of `buffer.len() - (end_frame - start_frame)` frames:
/// frames `[0, start_frame)` followed immediately by frames
/// `[end_frame, buffer.len())`, with no gap. Removing the full range
/// yields a valid zero-frame buffer.
///
/// # Errors
/// Same conditions as [`extract_range`].
pub fn exclude_range(
    buffer: &AudioBuffer,
    start_frame: usize,
    end_frame: usize,
) -> Result<AudioBuffer> {
    check_range(buffer, start_frame, end_frame)?;

    let kept = buffer.len() - (end_frame - start_frame);
    let channels: Vec<Vec<f32>> = buffer
        .channels()
        .iter()
        .map(|channel| {
            let mut out = Vec::with_capacity(kept);
            out.extend_from_slice(&channel[..start_frame]);
            out.extend_from_slice(&channel[end_frame..]);
            out
        })
        .collect();

    AudioBuffer::from_channels(channels, buffer.sample_rate())
}

/// Shared precondition guard for both transforms
///
/// The bounds check and the channel-consistency check live here so the
/// two operations cannot drift apart in what they accept.
fn check_range(buffer: &AudioBuffer, start_frame: usize, end_frame: usize) -> Result<()> {
    buffer.check_consistent()?;
    if start_frame >= end_frame || end_frame > buffer.len() {
        return Err(WaveclipError::InvalidRange {
            start: start_frame,
            end: end_frame,
            len: buffer.len(),
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Stereo buffer whose samples encode their own channel and index,
    /// so copies can be checked positionally.
    fn indexed_buffer(num_frames: usize) -> AudioBuffer {
        let left: Vec<f32> = (0..num_frames).map(|i| i as f32).collect();
        let right: Vec<f32> = (0..num_frames).map(|i| -(i as f32)).collect();
        AudioBuffer::from_channels(vec![left, right], 44100).unwrap()
    }

    // ------------------------------------------------------------------------
    // extract_range
    // ------------------------------------------------------------------------

    #[test]
    fn test_extract_copies_selected_span() {
        let buffer = indexed_buffer(100);
        let result = extract_range(&buffer, 10, 30).unwrap();

        assert_eq!(result.len(), 20);
        assert_eq!(result.num_channels(), 2);
        assert_eq!(result.sample_rate(), 44100);
        for i in 0..result.len() {
            assert_eq!(result.get_sample(0, i), buffer.get_sample(0, 10 + i));
            assert_eq!(result.get_sample(1, i), buffer.get_sample(1, 10 + i));
        }
    }

    #[test]
    fn test_extract_full_range_is_identity() {
        let buffer = indexed_buffer(50);
        let result = extract_range(&buffer, 0, buffer.len()).unwrap();
        assert_eq!(result, buffer);
    }

    #[test]
    fn test_extract_leaves_source_untouched() {
        let buffer = indexed_buffer(50);
        let before = buffer.clone();
        let _ = extract_range(&buffer, 5, 25).unwrap();
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_extract_rejects_reversed_range() {
        let buffer = indexed_buffer(50);
        let result = extract_range(&buffer, 30, 10);
        assert!(matches!(
            result,
            Err(WaveclipError::InvalidRange {
                start: 30,
                end: 10,
                len: 50,
            })
        ));
    }

    #[test]
    fn test_extract_rejects_out_of_bounds() {
        let buffer = indexed_buffer(50);
        assert!(extract_range(&buffer, 0, 51).is_err());
        assert!(extract_range(&buffer, 10, 10).is_err());
    }

    // ------------------------------------------------------------------------
    // exclude_range
    // ------------------------------------------------------------------------

    #[test]
    fn test_exclude_concatenates_remainder() {
        let buffer = indexed_buffer(100);
        let result = exclude_range(&buffer, 10, 30).unwrap();

        assert_eq!(result.len(), 80);
        // First 10 frames unchanged
        for i in 0..10 {
            assert_eq!(result.get_sample(0, i), buffer.get_sample(0, i));
        }
        // Remainder follows with no gap
        for i in 10..80 {
            assert_eq!(result.get_sample(0, i), buffer.get_sample(0, i + 20));
            assert_eq!(result.get_sample(1, i), buffer.get_sample(1, i + 20));
        }
    }

    #[test]
    fn test_exclude_leading_span() {
        let buffer = indexed_buffer(40);
        let result = exclude_range(&buffer, 0, 15).unwrap();
        assert_eq!(result.len(), 25);
        assert_eq!(result.get_sample(0, 0), buffer.get_sample(0, 15));
    }

    #[test]
    fn test_exclude_trailing_span() {
        let buffer = indexed_buffer(40);
        let result = exclude_range(&buffer, 25, 40).unwrap();
        assert_eq!(result.len(), 25);
        assert_eq!(result.get_sample(0, 24), buffer.get_sample(0, 24));
    }

    #[test]
    fn test_exclude_full_range_yields_empty() {
        let buffer = indexed_buffer(40);
        let result = exclude_range(&buffer, 0, 40).unwrap();
        assert_eq!(result.len(), 0);
        assert_eq!(result.num_channels(), 2);
        assert!(result.is_empty());
    }

    #[test]
    fn test_exclude_rejects_out_of_bounds() {
        let buffer = indexed_buffer(40);
        assert!(exclude_range(&buffer, 0, 41).is_err());
        assert!(exclude_range(&buffer, 20, 20).is_err());
    }

    #[test]
    fn test_transforms_preserve_sample_rate() {
        let buffer = AudioBuffer::silence(1, 100, 96000);
        assert_eq!(extract_range(&buffer, 0, 50).unwrap().sample_rate(), 96000);
        assert_eq!(exclude_range(&buffer, 0, 50).unwrap().sample_rate(), 96000);
    }
}
