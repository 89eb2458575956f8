//! Selection Model
//!
//! Tracks the user's selected span as a normalized percentage range over
//! the loaded audio, enforcing a minimum selection width once the
//! duration is known. Interactions are corrected, never rejected: when a
//! drag would shrink the selection below the minimum, the edge that was
//! not being dragged stays pinned and the dragged edge is pushed back out.
//!
//! The model is also the single place where a percentage range becomes
//! absolute frame indices. The companion time bounds are derived from
//! those same frame indices, so the playback clamp and the transform
//! always agree and repeated trims cannot drift.

use serde::{Deserialize, Serialize};

use crate::engine::buffer::AudioBuffer;

/// Minimum selection width in seconds, once the duration allows it
pub const MIN_SELECTION_SECS: f64 = 5.0;

/// Full percentage scale
const FULL_RANGE: f64 = 100.0;

/// Normalized selection span in percentage units, 0 <= start < end <= 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: f64,
    pub end: f64,
}

impl SelectionRange {
    /// The full selection covering the whole buffer
    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: FULL_RANGE,
        }
    }

    /// Width of the range in percentage units
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

impl Default for SelectionRange {
    fn default() -> Self {
        Self::full()
    }
}

/// Which selection handle an interaction moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Start,
    End,
}

/// Selection resolved against a concrete buffer
///
/// Frame bounds are computed with `floor`; the second bounds are derived
/// from those frames, not recomputed from percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSelection {
    /// First selected frame (inclusive)
    pub start_frame: usize,
    /// End of the selected span (exclusive)
    pub end_frame: usize,
    /// Playback clamp start in seconds
    pub start_secs: f64,
    /// Playback clamp end in seconds
    pub end_secs: f64,
}

/// Percentage selection over audio of a known duration
///
/// Holds no reference to the audio itself; the session feeds it the
/// duration on load and the buffer length at resolution time. State is
/// discarded with the model; nothing persists across loads.
#[derive(Debug, Clone)]
pub struct SelectionModel {
    range: SelectionRange,
    duration_secs: f64,
    min_secs: f64,
}

impl SelectionModel {
    /// Create a model for audio of the given duration, selecting everything
    pub fn new(duration_secs: f64) -> Self {
        Self::with_minimum(duration_secs, MIN_SELECTION_SECS)
    }

    /// Create a model with a non-default minimum selection width
    pub fn with_minimum(duration_secs: f64, min_secs: f64) -> Self {
        Self {
            range: SelectionRange::full(),
            duration_secs: duration_secs.max(0.0),
            min_secs: min_secs.max(0.0),
        }
    }

    /// Current selection range
    pub fn range(&self) -> SelectionRange {
        self.range
    }

    /// Duration of the underlying audio in seconds
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Selected span in seconds
    pub fn selected_secs(&self) -> f64 {
        self.duration_secs * self.range.width() / FULL_RANGE
    }

    /// Minimum selection width in percentage units
    ///
    /// When the whole clip is shorter than the minimum duration, the
    /// minimum is the full range: every selection is the widest
    /// achievable one.
    pub fn min_width_percent(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return FULL_RANGE;
        }
        (self.min_secs / self.duration_secs * FULL_RANGE).min(FULL_RANGE)
    }

    /// Reset the selection to the full range
    pub fn reset(&mut self) {
        self.range = SelectionRange::full();
    }

    /// Adopt a new duration (a new buffer was loaded) and reset
    pub fn set_duration(&mut self, duration_secs: f64) {
        self.duration_secs = duration_secs.max(0.0);
        self.reset();
    }

    /// Move one selection handle, correcting to keep the minimum width
    ///
    /// The edge that did not move stays pinned. If the proposed position
    /// would shrink the selection below the minimum width, the dragged
    /// edge is forced to `pinned ∓ minimum`, clamped to [0, 100]. The
    /// corrected range is returned and becomes the current selection.
    ///
    /// # Arguments
    /// * `edge` - Which handle the interaction moved
    /// * `position` - Proposed handle position in percentage units
    pub fn drag_edge(&mut self, edge: Edge, position: f64) -> SelectionRange {
        let min_width = self.min_width_percent();
        let proposed = position.clamp(0.0, FULL_RANGE);

        match edge {
            Edge::Start => {
                let pinned = self.range.end;
                let mut start = proposed.min(pinned);
                if pinned - start < min_width {
                    start = (pinned - min_width).max(0.0);
                }
                if start != proposed {
                    tracing::debug!(proposed, corrected = start, "selection start corrected");
                }
                self.range.start = start;
            }
            Edge::End => {
                let pinned = self.range.start;
                let mut end = proposed.max(pinned);
                if end - pinned < min_width {
                    end = (pinned + min_width).min(FULL_RANGE);
                }
                if end != proposed {
                    tracing::debug!(proposed, corrected = end, "selection end corrected");
                }
                self.range.end = end;
            }
        }
        self.range
    }

    /// Resolve the selection against a buffer into absolute bounds
    ///
    /// This is the only place percentages become frame indices:
    /// `frame = floor(percent / 100 * len)`. The second bounds come from
    /// the frame indices divided by the sample rate.
    pub fn resolve(&self, buffer: &AudioBuffer) -> ResolvedSelection {
        let len = buffer.len();
        let rate = buffer.sample_rate();
        let start_frame = frame_at_percent(self.range.start, len);
        let end_frame = frame_at_percent(self.range.end, len);
        let secs_per_frame = if rate == 0 { 0.0 } else { 1.0 / rate as f64 };
        ResolvedSelection {
            start_frame,
            end_frame,
            start_secs: start_frame as f64 * secs_per_frame,
            end_secs: end_frame as f64 * secs_per_frame,
        }
    }
}

/// The one percent-to-frame conversion
#[inline]
fn frame_at_percent(percent: f64, len: usize) -> usize {
    ((percent / FULL_RANGE) * len as f64).floor() as usize
}

// ============================================================================
// Tests
// ============================================================================
