//! Waveclip - Sample-Accurate Audio Clip Editing Engine
//!
//! Waveclip takes decoded multi-channel PCM, lets a host shell select a
//! span of it, and produces a new playable asset by either trimming
//! (keep the span) or removing (excise the span), serialized losslessly
//! to 16-bit PCM WAV.
//!
//! # Architecture
//!
//! The pipeline is a chain of exclusively-owned values:
//! decode (host) → [`EditSession`] → transform → encode worker → asset.
//! Buffers are immutable once built; every transform constructs a new
//! buffer, and encoding runs on a worker thread behind a
//! request/response channel so the interactive thread never blocks.

pub mod engine;
pub mod error;
pub mod offload;
pub mod selection;
pub mod session;
pub mod wav;

// Re-export commonly used types
pub use engine::buffer::AudioBuffer;
pub use engine::transform::{exclude_range, extract_range};
pub use error::{Result, WaveclipError};
pub use offload::{request_encode, EncodeJob, EncodeRequest};
pub use selection::{Edge, ResolvedSelection, SelectionModel, SelectionRange};
pub use session::EditSession;
pub use wav::{EncodedAsset, DEFAULT_EXPORT_NAME, WAV_MIME};
