//! Fatal errors of a splice run.
//!
//! Operator aborts and per-track export failures are not errors; they are
//! reported through `SpliceReport` and `Reconciliation`.

use std::path::PathBuf;

use thiserror::Error;

use crate::editor::EditorError;
use crate::playlist::FormatError;
use crate::reconcile::TagError;

pub type Result<T> = std::result::Result<T, SpliceError>;

#[derive(Debug, Error)]
pub enum SpliceError {
    /// The manifest cannot be trusted; nothing was sent to the editor.
    #[error("invalid playlist manifest: {0}")]
    Format(#[from] FormatError),

    /// The editor command channel failed.
    #[error("editor session failed: {0}")]
    Transport(#[from] EditorError),

    /// An exported file could not be tagged.
    #[error("tagging failed: {0}")]
    Tagging(#[from] TagError),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
