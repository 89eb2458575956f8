//! Edit Session
//!
//! The orchestration surface a host shell drives: owns the current
//! buffer and selection, applies trim/remove against the resolved
//! selection, and dispatches exports through the offload channel.
//!
//! Ownership is linear: load takes the decoded buffer, each transform
//! replaces the held buffer with its result, and the previous buffer is
//! dropped. Any failing operation leaves the session exactly as it was.
//! Dropping the session discards everything; nothing persists.

use crate::engine::buffer::AudioBuffer;
use crate::engine::transform::{exclude_range, extract_range};
use crate::error::Result;
use crate::offload::{request_encode, EncodeJob, EncodeRequest};
use crate::selection::{Edge, ResolvedSelection, SelectionModel, SelectionRange};
use crate::wav::encode::EncodedAsset;

/// One editing session over a single loaded buffer
#[derive(Debug)]
pub struct EditSession {
    buffer: AudioBuffer,
    selection: SelectionModel,
}

impl EditSession {
    /// Start a session over a decoded buffer, selecting everything
    pub fn new(buffer: AudioBuffer) -> Self {
        let selection = SelectionModel::new(buffer.duration_secs());
        tracing::debug!(
            channels = buffer.num_channels(),
            frames = buffer.len(),
            sample_rate = buffer.sample_rate(),
            "session started"
        );
        Self { buffer, selection }
    }

    /// Replace the session's audio with a newly decoded buffer
    ///
    /// The selection resets to the full range and the minimum selection
    /// width is recomputed from the new duration. The previous buffer is
    /// dropped.
    pub fn load(&mut self, buffer: AudioBuffer) {
        self.selection.set_duration(buffer.duration_secs());
        self.buffer = buffer;
        tracing::debug!(frames = self.buffer.len(), "new source loaded");
    }

    /// The currently held audio
    pub fn buffer(&self) -> &AudioBuffer {
        &self.buffer
    }

    /// The current selection state
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Move a selection handle; returns the corrected range
    pub fn drag_edge(&mut self, edge: Edge, position: f64) -> SelectionRange {
        self.selection.drag_edge(edge, position)
    }

    /// The selection resolved against the current buffer
    ///
    /// Hosts use the second bounds for playback clamping; trim and
    /// remove use the frame bounds. Both come from the same conversion.
    pub fn resolved_selection(&self) -> ResolvedSelection {
        self.selection.resolve(&self.buffer)
    }

    /// Keep only the selected span
    ///
    /// On success the held buffer is replaced and the selection resets
    /// to the full range of the shorter result. On error the session is
    /// unchanged.
    pub fn trim(&mut self) -> Result<()> {
        let resolved = self.resolved_selection();
        let trimmed = extract_range(&self.buffer, resolved.start_frame, resolved.end_frame)?;
        tracing::info!(
            kept = trimmed.len(),
            dropped = self.buffer.len() - trimmed.len(),
            "trim applied"
        );
        self.replace(trimmed);
        Ok(())
    }

    /// Excise the selected span, keeping what surrounds it
    ///
    /// Same replacement semantics as [`EditSession::trim`]. Removing the
    /// full range leaves a valid empty buffer.
    pub fn remove(&mut self) -> Result<()> {
        let resolved = self.resolved_selection();
        let remaining = exclude_range(&self.buffer, resolved.start_frame, resolved.end_frame)?;
        tracing::info!(
            kept = remaining.len(),
            dropped = self.buffer.len() - remaining.len(),
            "remove applied"
        );
        self.replace(remaining);
        Ok(())
    }

    /// Dispatch the current buffer to the encode worker
    ///
    /// The session stays editable, so the request carries a copy of the
    /// channel data; the copy moves across the thread boundary without
    /// further copies. Use [`EncodeRequest::from_buffer`] directly with
    /// [`EditSession::into_buffer`] for a pure move when done editing.
    pub fn export_job(&self) -> EncodeJob {
        request_encode(EncodeRequest::from_buffer(self.buffer.clone()))
    }

    /// Encode the current buffer, blocking until the asset is ready
    pub fn export(&self) -> Result<EncodedAsset> {
        self.export_job().wait()
    }

    /// End the session, yielding the edited buffer
    pub fn into_buffer(self) -> AudioBuffer {
        self.buffer
    }

    fn replace(&mut self, buffer: AudioBuffer) {
        self.selection.set_duration(buffer.duration_secs());
        self.buffer = buffer;
    }
}

// ============================================================================
// Tests
// ============================================================================
