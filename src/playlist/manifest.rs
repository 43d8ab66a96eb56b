//! M3U manifest grammar.
//!
//! A manifest is a header line followed by free-form lines; only lines that
//! start with the track marker are interpreted:
//!
//! ```text
//! #EXTM3U
//! #EXTINF:185,Artist X - Song One
//! /music/song_one.wav
//! ```
//!
//! The text after the first `,` is split at the last ` - `, so an artist that
//! itself contains ` - ` is mis-split. That is a limitation of the format.

use std::fmt::Write as _;
use std::path::Path;

use thiserror::Error;

use super::model::Track;

/// Literal tokens of a manifest dialect.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ManifestFormat {
    /// Required first line.
    pub header: &'static str,
    /// Prefix of a track declaration line.
    pub marker: &'static str,
}

impl ManifestFormat {
    /// Extended M3U, as written by most players and expected by this tool.
    pub const M3U: ManifestFormat = ManifestFormat {
        header: "#EXTM3U",
        marker: "#EXTINF:",
    };
}

impl Default for ManifestFormat {
    fn default() -> Self {
        Self::M3U
    }
}

const ARTIST_TITLE_SEPARATOR: &str = " - ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("manifest does not start with the `{expected}` header (found `{found}`)")]
    Header {
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: {reason}")]
    Entry { line: usize, reason: String },
}

/// A parsed manifest: the dialect it was read with and its tracks in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub format: ManifestFormat,
    pub tracks: Vec<Track>,
}

/// One serialized block: a track declaration and the location line under it.
#[derive(Debug, Clone)]
pub struct ManifestEntry<'a> {
    pub track: &'a Track,
    pub location: String,
}

impl<'a> ManifestEntry<'a> {
    pub fn new(track: &'a Track, location: impl Into<String>) -> Self {
        Self {
            track,
            location: location.into(),
        }
    }

    pub fn at_path(track: &'a Track, path: &Path) -> Self {
        Self::new(track, path.display().to_string())
    }
}

/// Parse manifest `text`. The header is checked before any track line is read.
pub fn parse(text: &str, format: ManifestFormat) -> Result<Playlist, FormatError> {
    let mut lines = text.lines();

    let first = lines.next().unwrap_or_default();
    let first = first.strip_prefix('\u{feff}').unwrap_or(first);
    let first = first.strip_suffix('\r').unwrap_or(first);
    if first != format.header {
        return Err(FormatError::Header {
            expected: format.header,
            found: first.to_string(),
        });
    }

    let mut tracks = Vec::new();
    // Line 1 is the header.
    for (line_no, line) in lines.enumerate().map(|(i, l)| (i + 2, l)) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let Some(declaration) = line.strip_prefix(format.marker) else {
            continue;
        };

        let track = parse_declaration(declaration, tracks.len() + 1)
            .map_err(|reason| FormatError::Entry {
                line: line_no,
                reason,
            })?;
        tracks.push(track);
    }

    Ok(Playlist { format, tracks })
}

fn parse_declaration(declaration: &str, index: usize) -> Result<Track, String> {
    let (duration, rest) = declaration
        .split_once(',')
        .ok_or_else(|| "expected `duration,artist - title`".to_string())?;

    let duration_secs = duration
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid duration `{}`", duration.trim()))?;

    let (artist, title) = rest
        .rsplit_once(ARTIST_TITLE_SEPARATOR)
        .ok_or_else(|| format!("missing `{ARTIST_TITLE_SEPARATOR}` between artist and title"))?;

    let artist = artist.trim();
    let title = title.trim();
    if artist.is_empty() {
        return Err("artist is empty".to_string());
    }
    if title.is_empty() {
        return Err("title is empty".to_string());
    }

    Ok(Track::new(index, artist, title, duration_secs))
}

/// Render `entries` as a manifest. `parse` reads the result back to the same tracks.
pub fn serialize<'a>(
    format: ManifestFormat,
    entries: impl IntoIterator<Item = ManifestEntry<'a>>,
) -> String {
    let mut out = String::new();
    out.push_str(format.header);
    out.push('\n');

    for entry in entries {
        let track = entry.track;
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{}{},{}{}{}",
            format.marker,
            track.duration_secs(),
            track.artist(),
            ARTIST_TITLE_SEPARATOR,
            track.title()
        );
        out.push_str(&entry.location);
        out.push('\n');
    }

    out
}
