use std::path::PathBuf;

use clap::Parser;

/// Split a recording of a whole playlist into tagged per-track files with Audacity.
///
/// Audacity must be running with mod-script-pipe enabled. For every track the
/// selection is pre-set from the playlist duration; move the cursor to where
/// the song really ends and press Enter.
#[derive(Debug, Parser)]
#[command(name = "playsplice", version, about)]
pub struct Cli {
    /// Playlist describing the recording (.m3u / .m3u8)
    #[arg(value_name = "PLAYLIST", required_unless_present = "print_config")]
    pub playlist: Option<PathBuf>,

    /// Directory in which the per-run output folder is created
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_root: PathBuf,

    /// Import this recording by path instead of through Audacity's file dialog
    #[arg(short, long, value_name = "FILE")]
    pub recording: Option<PathBuf>,

    /// Parse the playlist and show the planned exports without touching the editor
    #[arg(long)]
    pub dry_run: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
