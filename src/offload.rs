//! Encoding Offload Channel
//!
//! Serializing a large buffer is CPU-bound, so encode requests run on a
//! worker thread instead of the interactive thread. The contract is
//! request/response: the request takes ownership of the channel sample
//! data (moved, not copied), and exactly one response comes back — the
//! encoded asset or an error payload with a human-readable message.
//! Failures inside the worker, including panics, are caught at the
//! boundary and become the error payload; a response is never silently
//! dropped.
//!
//! No affinity is promised: a fresh worker thread serves each request.
//! Dropping the job handle discards the eventual response, which is the
//! whole cancellation story — a superseded export is simply ignored.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::engine::buffer::AudioBuffer;
use crate::error::{Result, WaveclipError};
use crate::wav::encode::{encode_asset, EncodedAsset};

/// What crosses the channel: either the asset or a message
type Response = std::result::Result<EncodedAsset, String>;

/// An encode request: owned channel data plus the sample rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeRequest {
    /// Non-interleaved sample data, one Vec per channel
    pub channels: Vec<Vec<f32>>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl EncodeRequest {
    /// Build a request by consuming a buffer
    ///
    /// Ownership of the sample vectors moves into the request and then
    /// into the worker; nothing is copied.
    pub fn from_buffer(buffer: AudioBuffer) -> Self {
        let sample_rate = buffer.sample_rate();
        Self {
            channels: buffer.into_channels(),
            sample_rate,
        }
    }
}

/// Handle to an in-flight encode request
///
/// Wait for the response with [`EncodeJob::wait`], or poll with
/// [`EncodeJob::try_wait`] from an event loop. Dropping the handle
/// abandons the response.
#[derive(Debug)]
pub struct EncodeJob {
    rx: mpsc::Receiver<Response>,
}

impl EncodeJob {
    /// Block until the worker responds
    ///
    /// # Errors
    /// `EncodingFailure` carrying the worker's message, or a
    /// disconnect message if the worker died without responding
    /// (guarded against, but normalized here rather than trusted).
    pub fn wait(self) -> Result<EncodedAsset> {
        match self.rx.recv() {
            Ok(response) => into_result(response),
            Err(mpsc::RecvError) => Err(disconnected()),
        }
    }

    /// Poll for the response without blocking
    ///
    /// Returns None while the worker is still encoding.
    pub fn try_wait(&self) -> Option<Result<EncodedAsset>> {
        match self.rx.try_recv() {
            Ok(response) => Some(into_result(response)),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(disconnected())),
        }
    }
}

/// Dispatch an encode request to a worker thread
///
/// Returns immediately with the job handle; the worker sends exactly
/// one response and exits.
pub fn request_encode(request: EncodeRequest) -> EncodeJob {
    let (tx, rx) = mpsc::channel::<Response>();
    thread::spawn(move || {
        let frames = request.channels.first().map(|ch| ch.len()).unwrap_or(0);
        tracing::debug!(
            channels = request.channels.len(),
            frames,
            sample_rate = request.sample_rate,
            "encode worker started"
        );
        let outcome = catch_unwind(AssertUnwindSafe(|| run_encode(request)));
        let response: Response = match outcome {
            Ok(Ok(asset)) => Ok(asset),
            Ok(Err(err)) => Err(err.to_string()),
            Err(panic) => Err(panic_message(&panic)),
        };
        if let Err(ref reason) = response {
            tracing::warn!(reason = %reason, "encode worker failed");
        }
        let _ = tx.send(response);
    });
    EncodeJob { rx }
}

/// Worker body: rebuild the buffer (re-validating consistency) and encode
fn run_encode(request: EncodeRequest) -> Result<EncodedAsset> {
    let buffer = AudioBuffer::from_channels(request.channels, request.sample_rate)?;
    encode_asset(&buffer)
}

fn into_result(response: Response) -> Result<EncodedAsset> {
    response.map_err(|message| WaveclipError::EncodingFailure { reason: message })
}

fn disconnected() -> WaveclipError {
    WaveclipError::EncodingFailure {
        reason: "encode worker disconnected without responding".to_string(),
    }
}

/// Render a caught panic payload as the error message
fn panic_message(panic: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("encoder panicked: {}", message)
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("encoder panicked: {}", message)
    } else {
        "encoder panicked".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::encode;

    #[test]
    fn test_offload_matches_direct_encode() {
        let buffer = AudioBuffer::sine(440.0, 0.2, 44100);
        let direct = encode(&buffer).unwrap();

        let job = request_encode(EncodeRequest::from_buffer(buffer));
        let asset = job.wait().unwrap();
        assert_eq!(asset.bytes, direct);
        assert_eq!(asset.mime, "audio/wav");
    }

    #[test]
    fn test_malformed_request_yields_one_error_response() {
        let request = EncodeRequest {
            channels: vec![vec![0.0; 10], vec![0.0; 9]],
            sample_rate: 44100,
        };
        let result = request_encode(request).wait();
        assert!(matches!(
            result,
            Err(WaveclipError::EncodingFailure { .. })
        ));
    }

    #[test]
    fn test_zero_channel_request_fails() {
        let request = EncodeRequest {
            channels: Vec::new(),
            sample_rate: 44100,
        };
        let result = request_encode(request).wait();
        assert!(result.is_err());
    }

    #[test]
    fn test_try_wait_eventually_delivers() {
        let buffer = AudioBuffer::silence(1, 64, 8000);
        let job = request_encode(EncodeRequest::from_buffer(buffer));

        let mut polled = None;
        for _ in 0..500 {
            if let Some(result) = job.try_wait() {
                polled = Some(result);
                break;
            }
            thread::sleep(std::time::Duration::from_millis(1));
        }
        let asset = polled.expect("worker never responded").unwrap();
        assert_eq!(asset.len(), 44 + 64 * 2);
    }

    #[test]
    fn test_independent_requests_run_in_parallel() {
        let a = request_encode(EncodeRequest::from_buffer(AudioBuffer::silence(1, 100, 8000)));
        let b = request_encode(EncodeRequest::from_buffer(AudioBuffer::silence(2, 50, 8000)));

        let asset_a = a.wait().unwrap();
        let asset_b = b.wait().unwrap();
        assert_eq!(asset_a.len(), 44 + 200);
        assert_eq!(asset_b.len(), 44 + 200);
    }
}
