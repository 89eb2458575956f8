//! WAV Container Support
//!
//! Hand-written canonical 16-bit PCM encoding plus hound-backed file
//! import for sourcing buffers.

pub mod encode;
pub mod io;

pub use encode::{encode, encode_asset, EncodedAsset, DEFAULT_EXPORT_NAME, WAV_MIME};
pub use io::{import_wav, is_supported_mime, write_asset};
