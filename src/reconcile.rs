//! Post-splice verification.
//!
//! The editor cannot be trusted to report failed exports, so the file on disk
//! is the only evidence. Every track ends up either verified and tagged, or in
//! the failure set with the reason it failed.

mod tagger;

use std::path::PathBuf;

use tracing::{info, warn};

use crate::playlist::Track;

pub use tagger::*;

/// Why a track did not make it into the output playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportFailure {
    /// The editor was never asked to export it (the run was aborted first).
    NeverAttempted,
    /// The export was requested but no file exists at `path`.
    ExportFailed { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTrack {
    pub track: Track,
    pub reason: ExportFailure,
}

/// The partition of a run's tracks. Both lists are in index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub exported: Vec<Track>,
    pub failed: Vec<FailedTrack>,
}

/// Verify each track's export and tag the ones that exist.
///
/// A tagging error stops the reconciliation: an untagged file would be a
/// silently wrong success.
pub fn reconcile<G: Tagger + ?Sized>(
    mut tracks: Vec<Track>,
    tagger: &mut G,
) -> Result<Reconciliation, TagError> {
    tracks.sort_by_key(Track::index);
    let mut result = Reconciliation::default();

    for track in tracks {
        let Some(path) = track.exported_path().map(PathBuf::from) else {
            warn!(
                index = track.index(),
                title = track.title(),
                "track was never exported"
            );
            result.failed.push(FailedTrack {
                track,
                reason: ExportFailure::NeverAttempted,
            });
            continue;
        };

        if !path.is_file() {
            warn!(
                index = track.index(),
                title = track.title(),
                path = %path.display(),
                "exported file is missing"
            );
            result.failed.push(FailedTrack {
                track,
                reason: ExportFailure::ExportFailed { path },
            });
            continue;
        }

        let track = track.verified();
        tagger.tag(&path, &TrackTags::of(&track))?;
        info!(index = track.index(), path = %path.display(), "export verified and tagged");
        result.exported.push(track);
    }

    Ok(result)
}
