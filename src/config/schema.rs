use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::editor::{DEFAULT_ABORT_TOKEN, PipePaths};
use crate::filename::DEFAULT_EXTENSION;
use crate::splice::SpliceOptions;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playsplice/config.toml` or `~/.config/playsplice/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYSPLICE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub editor: EditorSettings,
    pub export: ExportSettings,
    pub output: OutputSettings,
    pub prompt: PromptSettings,
}

impl Settings {
    pub fn splice_options(&self) -> SpliceOptions {
        SpliceOptions {
            zoom_depth: self.editor.zoom_depth,
            channels: self.export.channels,
            abort_token: self.prompt.abort_token.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Command pipe into the editor. Defaults to the `mod-script-pipe` name for this user.
    pub to_pipe: Option<PathBuf>,
    /// Reply pipe from the editor.
    pub from_pipe: Option<PathBuf>,
    /// Pause after closing the open project before importing (milliseconds).
    pub settle_ms: u64,
    /// Zoom-in steps applied after zooming to each track's selection.
    pub zoom_depth: u32,
}

impl EditorSettings {
    /// Pipe locations: configured paths win over the platform defaults.
    pub fn pipe_paths(&self) -> Option<PipePaths> {
        let defaults = PipePaths::platform_default();
        let to_editor = self
            .to_pipe
            .clone()
            .or_else(|| defaults.as_ref().map(|d| d.to_editor.clone()))?;
        let from_editor = self
            .from_pipe
            .clone()
            .or_else(|| defaults.as_ref().map(|d| d.from_editor.clone()))?;
        Some(PipePaths {
            to_editor,
            from_editor,
        })
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            to_pipe: None,
            from_pipe: None,
            settle_ms: 1000,
            zoom_depth: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Extension of exported files; the editor picks the format from it.
    pub extension: String,
    /// Channel count of exported files.
    pub channels: u16,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            channels: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Prefix of the per-run output folder.
    pub folder_prefix: String,
    /// chrono format string appended to `folder_prefix`.
    pub timestamp_format: String,
    /// File name of the playlist of exported tracks.
    pub success_manifest: String,
    /// File name of the playlist of failed tracks.
    pub failure_manifest: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            folder_prefix: "spliced_".to_string(),
            timestamp_format: "%H_%M_%S".to_string(),
            success_manifest: "playlist.m3u8".to_string(),
            failure_manifest: "failed_export_songs.m3u8".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PromptSettings {
    /// Answer that stops the run at a boundary prompt.
    pub abort_token: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            abort_token: DEFAULT_ABORT_TOKEN.to_string(),
        }
    }
}
