//! Editor command vocabulary and shared error/answer types.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Close the current project so the run starts from an empty timeline.
    CloseProject,
    /// Import audio, either through the editor's file dialog or from a path.
    Import(Option<PathBuf>),
    /// Select `start..end` seconds on the timeline.
    SelectRange { start_secs: u64, end_secs: u64 },
    /// Zoom the view to the current selection.
    ZoomToSelection,
    /// Zoom in one step.
    ZoomIn,
    /// Move the cursor to the end of the selection.
    CursorToSelectionEnd,
    /// Extend the selection back to the previous clip boundary.
    SnapToPreviousBoundary,
    /// Split the clip at the selection edges.
    Split,
    /// Export the selection to `path`.
    Export { path: PathBuf, channels: u16 },
    /// Delete the selection.
    DeleteSelection,
    /// Move the remaining audio so it starts at zero.
    AlignStartToZero,
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CloseProject => f.write_str("Close:"),
            Self::Import(None) => f.write_str("ImportAudio:"),
            Self::Import(Some(path)) => {
                let path = quoted(&path.display().to_string());
                write!(f, "Import2: Filename={path}")
            }
            Self::SelectRange {
                start_secs,
                end_secs,
            } => write!(f, "Select: Start={start_secs} End={end_secs}"),
            Self::ZoomToSelection => f.write_str("ZoomSel:"),
            Self::ZoomIn => f.write_str("ZoomIn:"),
            Self::CursorToSelectionEnd => f.write_str("SkipSelEnd:"),
            Self::SnapToPreviousBoundary => f.write_str("SelPrevClipBoundaryToCursor:"),
            Self::Split => f.write_str("Split:"),
            Self::Export { path, channels } => write!(
                f,
                "Export2: Filename={} NumChannels={channels}",
                quoted(&path.display().to_string())
            ),
            Self::DeleteSelection => f.write_str("Delete:"),
            Self::AlignStartToZero => f.write_str("Align_StartToZero:"),
        }
    }
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

/// The operator's answer to a prompt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Abort,
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(
        "editor pipe {} is not available; is Audacity running with mod-script-pipe enabled?",
        .path.display()
    )]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("editor pipe I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("editor session is closed")]
    Closed,

    #[error("a recording has already been imported into this session")]
    AlreadyImported,

    #[error("no recording has been imported yet")]
    NotImported,

    #[error("failed to read operator input: {0}")]
    Operator(#[source] io::Error),
}
