use std::path::PathBuf;

use tracing::{debug, info};

use crate::editor::{CommandTransport, Confirmation, EditorError, EditorSession, Operator};
use crate::filename::FilenamePolicy;
use crate::playlist::Track;

use super::state::{SpliceReport, SpliceState, SplicedTrack, duration_hint};

/// Tunables of the per-track command sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceOptions {
    /// `ZoomIn` steps after zooming to the selection. Seven brings the track
    /// boundary to a resolution the operator can act on.
    pub zoom_depth: u32,
    /// Channel count of the exported files.
    pub channels: u16,
    /// Answer that stops the run, shown in the prompt.
    pub abort_token: String,
}

impl Default for SpliceOptions {
    fn default() -> Self {
        Self {
            zoom_depth: 7,
            channels: 2,
            abort_token: crate::editor::DEFAULT_ABORT_TOKEN.to_string(),
        }
    }
}

/// Runs the select → confirm → split → export → cleanup sequence for every track.
///
/// Tracks are handled strictly in index order: each boundary is placed
/// relative to a timeline from which the previous track was already deleted
/// and realigned to zero.
pub struct SpliceOrchestrator<'s, T: CommandTransport, O: Operator> {
    session: &'s mut EditorSession<T, O>,
    names: FilenamePolicy,
    output_dir: PathBuf,
    options: SpliceOptions,
}

impl<'s, T: CommandTransport, O: Operator> SpliceOrchestrator<'s, T, O> {
    pub fn new(
        session: &'s mut EditorSession<T, O>,
        names: FilenamePolicy,
        output_dir: impl Into<PathBuf>,
        options: SpliceOptions,
    ) -> Self {
        Self {
            session,
            names,
            output_dir: output_dir.into(),
            options,
        }
    }

    /// Splice every track. An operator abort ends the pass early but is not an
    /// error: the remaining tracks are reported as `Aborted`.
    pub fn run(mut self, mut tracks: Vec<Track>) -> Result<SpliceReport, EditorError> {
        tracks.sort_by_key(Track::index);
        let total = tracks.len();
        let mut report = SpliceReport::default();

        for track in tracks {
            if report.aborted_at.is_some() {
                debug!(index = track.index(), "not attempted after abort");
                report.tracks.push(SplicedTrack {
                    track,
                    state: SpliceState::Aborted,
                });
                continue;
            }

            let spliced = self.splice_track(track, total)?;
            debug_assert!(spliced.state.is_terminal());
            if spliced.state == SpliceState::Aborted {
                info!(
                    index = spliced.track.index(),
                    "splice run stopped by operator"
                );
                report.aborted_at = Some(spliced.track.index());
            }
            report.tracks.push(spliced);
        }

        Ok(report)
    }

    fn splice_track(&mut self, track: Track, total: usize) -> Result<SplicedTrack, EditorError> {
        let index = track.index();
        let duration = track.duration_secs();
        let mut state = SpliceState::Pending;

        state = transition(index, state, SpliceState::Selecting);
        self.session.select_range(0, duration)?;
        self.session.zoom_to_selection()?;
        self.session.zoom_in(self.options.zoom_depth)?;
        self.session.move_cursor_to_selection_end()?;

        state = transition(index, state, SpliceState::AwaitingConfirmation);
        let prompt = format!(
            "Track {index}/{total} \"{} - {}\": edit the end of the song (~{}) with the cursor, \
             press Enter when done or '{}' to quit: ",
            track.artist(),
            track.title(),
            duration_hint(duration),
            self.options.abort_token,
        );
        if self.session.await_human_boundary_confirmation(&prompt)? == Confirmation::Abort {
            let state = transition(index, state, SpliceState::Aborted);
            return Ok(SplicedTrack { track, state });
        }

        state = transition(index, state, SpliceState::Confirmed);
        self.session.snap_selection_start_to_previous_boundary()?;
        self.session.split_at_selection()?;

        let file_name = self.names.assign(&track);
        let path = self.output_dir.join(file_name);
        self.session
            .export_selection_as_audio(&path, self.options.channels)?;
        state = transition(index, state, SpliceState::Exported);

        self.session.delete_selection()?;
        self.session.realign_timeline_start()?;
        let state = transition(index, state, SpliceState::Cleaned);

        info!(index, path = %path.display(), "track exported");
        Ok(SplicedTrack {
            track: track.exported_to(path),
            state,
        })
    }
}

fn transition(index: usize, from: SpliceState, to: SpliceState) -> SpliceState {
    debug!(index, ?from, ?to, "splice state");
    to
}
