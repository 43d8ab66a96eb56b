use std::path::{Path, PathBuf};

/// One playlist entry and its progress through a splice run.
///
/// Fields are private: the record is built by the manifest parser and only
/// advanced through the `exported_to` / `verified` steps, which belong to the
/// splice orchestrator and the export reconciler respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    index: usize,
    title: String,
    artist: String,
    duration_secs: u64,
    exported_path: Option<PathBuf>,
    exported_ok: bool,
}

impl Track {
    pub fn new(
        index: usize,
        artist: impl Into<String>,
        title: impl Into<String>,
        duration_secs: u64,
    ) -> Self {
        Self {
            index,
            title: title.into(),
            artist: artist.into(),
            duration_secs,
            exported_path: None,
            exported_ok: false,
        }
    }

    /// 1-based position in the source manifest.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Duration declared by the manifest. Only a hint once the editor is involved.
    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn exported_path(&self) -> Option<&Path> {
        self.exported_path.as_deref()
    }

    pub fn exported_ok(&self) -> bool {
        self.exported_ok
    }

    /// Record the path the editor was asked to export this track to.
    pub(crate) fn exported_to(self, path: PathBuf) -> Self {
        Self {
            exported_path: Some(path),
            ..self
        }
    }

    /// Mark the export as verified on disk. Has no effect on a track that was never exported.
    pub(crate) fn verified(self) -> Self {
        let exported_ok = self.exported_path.is_some();
        Self {
            exported_ok,
            ..self
        }
    }
}
