//! Input validation and the per-run output folder.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, ensure};
use chrono::Local;

use crate::config::OutputSettings;

const PLAYLIST_EXTENSIONS: &[&str] = &["m3u", "m3u8"];

pub fn validate_playlist_path(path: &Path) -> anyhow::Result<()> {
    ensure!(
        path.is_file(),
        "playlist file does not exist: {}",
        path.display()
    );

    let has_playlist_ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            PLAYLIST_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false);
    ensure!(
        has_playlist_ext,
        "playlist doesn't appear to be an M3U/M3U8 file: {}",
        path.display()
    );
    Ok(())
}

pub fn validate_output_root(path: &Path) -> anyhow::Result<()> {
    ensure!(
        path.is_dir(),
        "output directory does not exist: {}",
        path.display()
    );
    Ok(())
}

pub fn validate_recording(path: &Path) -> anyhow::Result<()> {
    ensure!(
        path.is_file(),
        "recording does not exist: {}",
        path.display()
    );
    Ok(())
}

/// Name of this run's output folder, e.g. `spliced_14_03_59`.
pub fn output_folder_name(output: &OutputSettings) -> anyhow::Result<String> {
    let mut name = output.folder_prefix.clone();
    let format = &output.timestamp_format;
    write!(name, "{}", Local::now().format(format))
        .map_err(|_| anyhow!("invalid output.timestamp_format `{format}`"))?;
    Ok(name)
}

/// Create a fresh output folder under `root` and return its absolute path.
///
/// An existing folder with the same name is an error so that two runs never
/// mix their exports.
pub fn create_output_dir(root: &Path, output: &OutputSettings) -> anyhow::Result<PathBuf> {
    let dir = root.join(output_folder_name(output)?);
    fs::create_dir(&dir)
        .with_context(|| format!("couldn't create output directory: {}", dir.display()))?;
    let dir = fs::canonicalize(&dir)
        .with_context(|| format!("couldn't resolve output directory: {}", dir.display()))?;
    Ok(dir)
}
