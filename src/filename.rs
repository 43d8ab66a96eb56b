//! Export file naming.
//!
//! Titles are reduced to a lowercase ASCII stem made of letters, digits, `-`
//! and `_`. Stems that would name a Windows device, or that start with `n`
//! and would read as `\n` after a Windows path separator, get a leading `_`.
//! Names already claimed during a run get the track index appended.

use std::collections::HashSet;

use crate::playlist::Track;

pub const DEFAULT_EXTENSION: &str = "wav";

const FALLBACK_STEM: &str = "track";
const ESCAPE: char = '_';
/// After the `\` of a Windows export path this would read as a newline escape.
const NEWLINE_LEAD: char = 'n';

const RESERVED_DEVICE_NAMES: &[&str] = &[
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8",
    "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Derives unique, filesystem-safe export names for the tracks of one run.
#[derive(Debug, Clone)]
pub struct FilenamePolicy {
    extension: String,
    claimed: HashSet<String>,
}

impl Default for FilenamePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

impl FilenamePolicy {
    pub fn new(extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_ascii_lowercase(),
            claimed: HashSet::new(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Name for `title`, ignoring names already handed out.
    pub fn derive_filename(&self, title: &str) -> String {
        format!("{}.{}", derive_stem(title), self.extension)
    }

    /// Name for `track`, unique among every name this policy has assigned so far.
    pub fn assign(&mut self, track: &Track) -> String {
        let mut candidate = self.derive_filename(track.title());
        let mut attempt = 0usize;
        while self.claimed.contains(&candidate) {
            let stem = derive_stem(track.title());
            let ext = self.extension();
            candidate = if attempt == 0 {
                format!("{stem}_{}.{ext}", track.index())
            } else {
                format!("{stem}_{}_{attempt}.{ext}", track.index())
            };
            attempt += 1;
        }

        self.claimed.insert(candidate.clone());
        candidate
    }
}

/// Map arbitrary text to a safe file stem (no extension).
pub fn derive_stem(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    // Pending separator for the run of characters currently being skipped.
    let mut pending: Option<char> = None;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            if let Some(sep) = pending.take() {
                if !stem.is_empty() {
                    stem.push(sep);
                }
            }
            stem.push(c);
        } else if c.is_whitespace() {
            // Whitespace wins over punctuation in a mixed run.
            pending = Some('_');
        } else if pending.is_none() {
            pending = Some('-');
        }
    }

    let stem = stem.trim_matches(|c| c == '-' || c == '_');
    if stem.is_empty() {
        return FALLBACK_STEM.to_string();
    }

    if stem.starts_with(NEWLINE_LEAD) || is_reserved_device_name(stem) {
        format!("{ESCAPE}{stem}")
    } else {
        stem.to_string()
    }
}

fn is_reserved_device_name(stem: &str) -> bool {
    RESERVED_DEVICE_NAMES
        .iter()
        .any(|reserved| stem.eq_ignore_ascii_case(reserved))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(index: usize, title: &str) -> Track {
        Track::new(index, "Artist", title, 180)
    }

    #[test]
    fn derive_stem_lowercases_and_replaces_spaces() {
        assert_eq!(derive_stem("Song One"), "song_one");
        assert_eq!(derive_stem("  Hello   World  "), "hello_world");
        assert_eq!(derive_stem("Don't Stop Me Now!"), "don-t_stop_me_now");
        assert_eq!(derive_stem("already-safe_name"), "already-safe_name");
    }

    #[test]
    fn derive_stem_drops_non_ascii_and_control_characters() {
        assert_eq!(derive_stem("Café del Mar"), "caf_del_mar");
        assert_eq!(derive_stem("Beyoncé"), "beyonc");
        assert_eq!(derive_stem("line\nbreak"), "line_break");
        assert_eq!(derive_stem("a/b\\c:d"), "a-b-c-d");
    }

    #[test]
    fn derive_stem_falls_back_when_nothing_survives() {
        assert_eq!(derive_stem(""), "track");
        assert_eq!(derive_stem("???"), "track");
        assert_eq!(derive_stem("日本語"), "track");
    }

    #[test]
    fn derive_stem_escapes_reserved_device_names() {
        assert_eq!(derive_stem("CON"), "_con");
        assert_eq!(derive_stem("nul"), "_nul");
        assert_eq!(derive_stem("Com1"), "_com1");
        assert_eq!(derive_stem("Console"), "console");
    }

    #[test]
    fn derive_stem_escapes_a_leading_n() {
        assert_eq!(derive_stem("Nothing Else Matters"), "_nothing_else_matters");
        assert_eq!(derive_stem("  new day"), "_new_day");
        assert_eq!(derive_stem("Intro n"), "intro_n");

        let policy = FilenamePolicy::default();
        let name = policy.derive_filename("Nothing Else Matters");
        assert!(name.starts_with('_'));
        let stem = name.strip_suffix(".wav").unwrap();
        assert_eq!(derive_stem(stem), stem);
    }

    #[test]
    fn derive_filename_is_idempotent() {
        let policy = FilenamePolicy::default();
        let first = policy.derive_filename("Song One");
        let second = policy.derive_filename("Song One");
        assert_eq!(first, "song_one.wav");
        assert_eq!(first, second);
    }

    #[test]
    fn extension_is_normalized() {
        let policy = FilenamePolicy::new(".FLAC");
        assert_eq!(policy.extension(), "flac");
        assert_eq!(policy.derive_filename("x"), "x.flac");
    }

    #[test]
    fn assign_disambiguates_collisions_with_track_index() {
        let mut policy = FilenamePolicy::default();
        assert_eq!(policy.assign(&track(1, "Intro")), "intro.wav");
        assert_eq!(policy.assign(&track(2, "Song")), "song.wav");
        assert_eq!(policy.assign(&track(3, "INTRO")), "intro_3.wav");
        assert_eq!(policy.assign(&track(4, "intro!")), "intro_4.wav");
    }

    #[test]
    fn assign_never_reuses_a_name_even_if_the_indexed_form_is_taken() {
        let mut policy = FilenamePolicy::default();
        assert_eq!(policy.assign(&track(1, "Intro 3")), "intro_3.wav");
        assert_eq!(policy.assign(&track(2, "Intro")), "intro.wav");
        assert_eq!(policy.assign(&track(3, "Intro")), "intro_3_1.wav");
    }
}
