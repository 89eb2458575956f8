//! Audio Buffer Management
//!
//! Provides the core audio buffer type for Waveclip. Audio is stored as
//! non-interleaved 32-bit float samples, one Vec per channel, with the
//! source sample rate carried alongside and preserved through every
//! transform.
//!
//! A buffer is immutable once constructed: there is no mutating access to
//! the sample data, so a transform can never alias or corrupt the buffer
//! it reads from. New content always means a new buffer.

use crate::error::{Result, WaveclipError};

/// Core audio buffer type for all processing in Waveclip
///
/// Stores audio as non-interleaved 32-bit floating point samples.
/// Each channel is a separate Vec<f32> of identical length.
///
/// # Example
/// ```
/// use waveclip::engine::buffer::AudioBuffer;
///
/// // One second of stereo silence at 44.1kHz
/// let buffer = AudioBuffer::silence(2, 44100, 44100);
/// assert_eq!(buffer.num_channels(), 2);
/// assert_eq!(buffer.len(), 44100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Sample data: outer Vec is channels, inner Vec is frames
    channels: Vec<Vec<f32>>,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a silent buffer with the given shape
    ///
    /// # Arguments
    /// * `num_channels` - Number of channels
    /// * `num_frames` - Number of frames (samples per channel)
    /// * `sample_rate` - Sample rate in Hz
    pub fn silence(num_channels: usize, num_frames: usize, sample_rate: u32) -> Self {
        Self {
            channels: vec![vec![0.0_f32; num_frames]; num_channels],
            sample_rate,
        }
    }

    /// Create a buffer from per-channel sample data
    ///
    /// # Arguments
    /// * `channels` - One Vec of samples per channel, all equal length
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Errors
    /// `InconsistentChannelLength` if any channel's length differs from
    /// the first channel's.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        let expected = channels.first().map(|ch| ch.len()).unwrap_or(0);
        for (index, channel) in channels.iter().enumerate() {
            if channel.len() != expected {
                return Err(WaveclipError::InconsistentChannelLength {
                    channel: index,
                    expected,
                    actual: channel.len(),
                });
            }
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Create a buffer from interleaved sample data
    ///
    /// # Arguments
    /// * `interleaved` - Samples in frame order (L, R, L, R, ... for stereo)
    /// * `num_channels` - Number of channels to de-interleave into
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Errors
    /// `InconsistentChannelLength` if the data length is not divisible by
    /// the channel count.
    pub fn from_interleaved(
        interleaved: &[f32],
        num_channels: usize,
        sample_rate: u32,
    ) -> Result<Self> {
        if num_channels == 0 {
            return Ok(Self {
                channels: Vec::new(),
                sample_rate,
            });
        }
        if interleaved.len() % num_channels != 0 {
            return Err(WaveclipError::InconsistentChannelLength {
                channel: num_channels - 1,
                expected: interleaved.len() / num_channels + 1,
                actual: interleaved.len() / num_channels,
            });
        }

        let num_frames = interleaved.len() / num_channels;
        let mut channels = vec![Vec::with_capacity(num_frames); num_channels];
        for frame in interleaved.chunks_exact(num_channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                channels[ch].push(sample);
            }
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Create a mono sine-wave buffer (test and fixture helper)
    ///
    /// # Arguments
    /// * `frequency` - Frequency in Hz
    /// * `duration_secs` - Duration in seconds
    /// * `sample_rate` - Sample rate in Hz
    pub fn sine(frequency: f32, duration_secs: f32, sample_rate: u32) -> Self {
        let num_frames = (duration_secs * sample_rate as f32) as usize;
        let angular_freq = 2.0 * std::f32::consts::PI * frequency / sample_rate as f32;
        let samples: Vec<f32> = (0..num_frames)
            .map(|i| (angular_freq * i as f32).sin())
            .collect();
        Self {
            channels: vec![samples],
            sample_rate,
        }
    }

    /// Get the number of channels
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Get the number of frames (samples per channel)
    #[inline]
    pub fn len(&self) -> usize {
        self.channels.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// Check if the buffer holds no frames
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the sample rate in Hz
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    /// Get immutable access to all channels
    #[inline]
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Get immutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Get a sample at the specified channel and frame
    ///
    /// Returns None if either index is out of bounds.
    #[inline]
    pub fn get_sample(&self, channel: usize, frame: usize) -> Option<f32> {
        self.channels
            .get(channel)
            .and_then(|ch| ch.get(frame).copied())
    }

    /// Convert the buffer to interleaved format
    ///
    /// # Returns
    /// A Vec<f32> with samples in frame order (L, R, L, R, ... for stereo)
    pub fn to_interleaved(&self) -> Vec<f32> {
        let num_channels = self.num_channels();
        let num_frames = self.len();
        if num_channels == 0 || num_frames == 0 {
            return Vec::new();
        }

        let mut interleaved = Vec::with_capacity(num_channels * num_frames);
        for frame in 0..num_frames {
            for channel in &self.channels {
                interleaved.push(channel[frame]);
            }
        }
        interleaved
    }

    /// Consume the buffer, yielding its channel vectors
    ///
    /// Used at the encode boundary, where ownership of the sample data
    /// moves into the request instead of being copied.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    /// Verify that all channels hold the same number of frames
    ///
    /// Constructors already enforce this; consumers that receive a buffer
    /// across an API boundary re-check defensively before indexing all
    /// channels with one frame range.
    pub fn check_consistent(&self) -> Result<()> {
        let expected = self.len();
        for (index, channel) in self.channels.iter().enumerate() {
            if channel.len() != expected {
                return Err(WaveclipError::InconsistentChannelLength {
                    channel: index,
                    expected,
                    actual: channel.len(),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
