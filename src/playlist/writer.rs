use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::reconcile::{ExportFailure, FailedTrack};

use super::manifest::{ManifestEntry, ManifestFormat, serialize};
use super::model::Track;

/// Location written for tracks the editor was never asked to export.
pub const NEVER_EXPORTED_SENTINEL: &str = "NOT_EXPORTED";

/// Writes the manifests that close a run into its output folder.
pub struct ManifestWriter<'a> {
    format: ManifestFormat,
    output_dir: &'a Path,
    success_name: &'a str,
    failure_name: &'a str,
}

impl<'a> ManifestWriter<'a> {
    pub fn new(
        format: ManifestFormat,
        output_dir: &'a Path,
        success_name: &'a str,
        failure_name: &'a str,
    ) -> Self {
        Self {
            format,
            output_dir,
            success_name,
            failure_name,
        }
    }

    /// Write the success manifest. It is produced even when `tracks` is empty.
    pub fn write_success(&self, tracks: &[Track]) -> io::Result<PathBuf> {
        let entries = success_entries(tracks);
        let count = entries.len();

        let path = self.output_dir.join(self.success_name);
        fs::write(&path, serialize(self.format, entries))?;
        info!(path = %path.display(), count, "wrote playlist");
        Ok(path)
    }

    /// Write the failure manifest, or nothing at all when `failed` is empty.
    pub fn write_failures(&self, failed: &[FailedTrack]) -> io::Result<Option<PathBuf>> {
        if failed.is_empty() {
            return Ok(None);
        }

        let mut ordered: Vec<&FailedTrack> = failed.iter().collect();
        ordered.sort_by_key(|f| f.track.index());

        let entries = ordered.into_iter().map(|f| match &f.reason {
            ExportFailure::NeverAttempted => ManifestEntry::new(&f.track, NEVER_EXPORTED_SENTINEL),
            ExportFailure::ExportFailed { path } => ManifestEntry::at_path(&f.track, path),
        });

        let path = self.output_dir.join(self.failure_name);
        fs::write(&path, serialize(self.format, entries))?;
        info!(path = %path.display(), count = failed.len(), "wrote failed export playlist");
        Ok(Some(path))
    }
}

/// Verified exports in track order, one entry per line pair of the success manifest.
pub(crate) fn success_entries(tracks: &[Track]) -> Vec<ManifestEntry<'_>> {
    let mut ordered: Vec<&Track> = tracks.iter().filter(|t| t.exported_ok()).collect();
    ordered.sort_by_key(|t| t.index());

    ordered
        .into_iter()
        .filter_map(|track| {
            track
                .exported_path()
                .map(|path| ManifestEntry::at_path(track, path))
        })
        .collect()
}
