//! One splice run, from an already parsed playlist to the written manifests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::config::Settings;
use crate::editor::{CommandTransport, Confirmation, EditorSession, Operator};
use crate::error::{Result, SpliceError};
use crate::filename::FilenamePolicy;
use crate::playlist::{ManifestWriter, Playlist};
use crate::reconcile::{Reconciliation, Tagger, reconcile};
use crate::splice::{SpliceOrchestrator, SpliceReport, duration_hint};

#[derive(Debug)]
pub struct RunSummary {
    pub total: usize,
    /// Set when the operator stopped the run, either at the import handshake or at a track prompt.
    pub aborted: bool,
    pub reconciliation: Reconciliation,
    pub success_manifest: PathBuf,
    pub failure_manifest: Option<PathBuf>,
}

/// Import the recording, splice every track, verify and tag the exports and
/// write the manifests into `output_dir`.
pub fn execute<T, O, G>(
    playlist: Playlist,
    session: &mut EditorSession<T, O>,
    tagger: &mut G,
    output_dir: &Path,
    recording: Option<&Path>,
    settings: &Settings,
) -> Result<RunSummary>
where
    T: CommandTransport,
    O: Operator,
    G: Tagger + ?Sized,
{
    let Playlist { format, tracks } = playlist;
    let total = tracks.len();

    let settle = Duration::from_millis(settings.editor.settle_ms);
    let report = match session.import_audio(recording, settle)? {
        Confirmation::Abort => {
            info!("run stopped at the import prompt");
            SpliceReport::aborted_before_start(tracks)
        }
        Confirmation::Confirmed => SpliceOrchestrator::new(
            session,
            FilenamePolicy::new(settings.export.extension.as_str()),
            output_dir,
            settings.splice_options(),
        )
        .run(tracks)?,
    };
    session.close()?;
    info!(
        attempted = report.attempted(),
        total,
        "splice pass finished"
    );

    let aborted = report.was_aborted();
    let reconciliation = reconcile(report.into_tracks(), tagger)?;

    let success_name = settings.output.success_manifest.as_str();
    let failure_name = settings.output.failure_manifest.as_str();
    let writer = ManifestWriter::new(format, output_dir, success_name, failure_name);
    let success_manifest =
        writer
            .write_success(&reconciliation.exported)
            .map_err(|source| SpliceError::Write {
                path: output_dir.join(success_name),
                source,
            })?;
    let failure_manifest =
        writer
            .write_failures(&reconciliation.failed)
            .map_err(|source| SpliceError::Write {
                path: output_dir.join(failure_name),
                source,
            })?;

    Ok(RunSummary {
        total,
        aborted,
        reconciliation,
        success_manifest,
        failure_manifest,
    })
}

/// Per-track failures are already logged by the reconciler; this is the closing summary.
pub fn log_summary(summary: &RunSummary) {
    info!(
        exported = summary.reconciliation.exported.len(),
        total = summary.total,
        aborted = summary.aborted,
        "splice run finished"
    );
    if let Some(path) = &summary.failure_manifest {
        warn!(
            "{} failed track export(s) saved to playlist file: {}",
            summary.reconciliation.failed.len(),
            path.display()
        );
    }
    info!(
        "generated playlist file: {}",
        summary.success_manifest.display()
    );
}

/// One line per track describing what a run would export, for `--dry-run`.
pub fn describe_plan(playlist: &Playlist, settings: &Settings) -> Vec<String> {
    let mut names = FilenamePolicy::new(settings.export.extension.as_str());
    playlist
        .tracks
        .iter()
        .map(|track| {
            format!(
                "{:>3}. [~{}] {} - {} -> {}",
                track.index(),
                duration_hint(track.duration_secs()),
                track.artist(),
                track.title(),
                names.assign(track)
            )
        })
        .collect()
}
