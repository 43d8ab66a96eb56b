use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::cli::Cli;
use crate::editor::{ConsoleOperator, EditorSession, PipeTransport};
use crate::playlist::{self, ManifestFormat, Playlist};
use crate::reconcile::LoftyTagger;

mod paths;
mod pipeline;
mod settings;

use pipeline::{describe_plan, execute, log_summary};

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = settings::load_settings();

    if cli.print_config {
        print!("{}", settings.to_toml().context("failed to render config")?);
        return Ok(());
    }

    let playlist_path = cli
        .playlist
        .as_deref()
        .context("a playlist file is required")?;
    let playlist = load_playlist(playlist_path)?;

    if cli.dry_run {
        if playlist.tracks.is_empty() {
            println!("Dry run: the playlist has no tracks.");
        } else {
            println!("Dry run: would export {} track(s):", playlist.tracks.len());
            for line in describe_plan(&playlist, &settings) {
                println!("{line}");
            }
        }
        return Ok(());
    }

    paths::validate_output_root(&cli.output_root)?;
    if let Some(recording) = cli.recording.as_deref() {
        paths::validate_recording(recording)?;
    }

    let pipes = settings.editor.pipe_paths().context(
        "cannot determine the editor pipe locations; set editor.to_pipe and editor.from_pipe",
    )?;
    let transport = PipeTransport::connect(&pipes)?;

    let output_dir = paths::create_output_dir(&cli.output_root, &settings.output)?;
    info!("selected output directory: {}", output_dir.display());

    let operator = ConsoleOperator::stdio(settings.prompt.abort_token.clone());
    let mut session = EditorSession::new(transport, operator);
    let summary = execute(
        playlist,
        &mut session,
        &mut LoftyTagger,
        &output_dir,
        cli.recording.as_deref(),
        &settings,
    )
    .with_context(|| format!("failed to splice '{}'", playlist_path.display()))?;

    log_summary(&summary);
    Ok(())
}

/// Check, read and parse the playlist. Runs before anything touches the editor
/// or the output root.
fn load_playlist(path: &Path) -> anyhow::Result<Playlist> {
    paths::validate_playlist_path(path)?;
    info!("selected playlist file: {}", path.display());

    let text = fs::read_to_string(path)
        .with_context(|| format!("unable to open file: {}", path.display()))?;
    let playlist = playlist::parse(&text, ManifestFormat::M3U)
        .with_context(|| format!("failed to read playlist '{}'", path.display()))?;
    info!(tracks = playlist.tracks.len(), "playlist loaded");
    Ok(playlist)
}
