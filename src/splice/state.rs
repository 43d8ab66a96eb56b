//! Per-track states of the splice pass and the report it produces.

use crate::playlist::Track;

/// Where a track is in the splice sequence.
///
/// `Pending → Selecting → AwaitingConfirmation → {Confirmed | Aborted} → Exported → Cleaned`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpliceState {
    /// Not reached yet.
    Pending,
    /// Initial selection and zoom are being set up.
    Selecting,
    /// Blocked on the operator.
    AwaitingConfirmation,
    /// Boundary confirmed; splitting.
    Confirmed,
    /// Never attempted because the operator stopped the run.
    Aborted,
    /// Export command issued.
    Exported,
    /// Clip removed and timeline realigned; the next track may start.
    Cleaned,
}

impl SpliceState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Aborted | Self::Cleaned)
    }
}

/// A track together with the state the splice pass left it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplicedTrack {
    pub track: Track,
    pub state: SpliceState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpliceReport {
    /// Every input track, in index order.
    pub tracks: Vec<SplicedTrack>,
    /// Index of the track whose prompt was answered with abort.
    pub aborted_at: Option<usize>,
}

impl SpliceReport {
    /// Report for a run stopped before the first track (e.g. at the import handshake).
    pub fn aborted_before_start(tracks: Vec<Track>) -> Self {
        Self {
            tracks: tracks
                .into_iter()
                .map(|track| SplicedTrack {
                    track,
                    state: SpliceState::Aborted,
                })
                .collect(),
            aborted_at: None,
        }
    }

    pub fn was_aborted(&self) -> bool {
        self.tracks.iter().any(|t| t.state == SpliceState::Aborted)
    }

    pub fn attempted(&self) -> usize {
        self.tracks
            .iter()
            .filter(|t| t.state == SpliceState::Cleaned)
            .count()
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks.into_iter().map(|t| t.track).collect()
    }
}

/// Human-facing `m:ss` rendering of a declared duration.
pub fn duration_hint(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
