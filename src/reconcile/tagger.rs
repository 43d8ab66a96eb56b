use std::path::{Path, PathBuf};

use lofty::config::WriteOptions;
use lofty::error::LoftyError;
use lofty::prelude::*;
use lofty::tag::Tag;
use thiserror::Error;

use crate::playlist::Track;

/// Metadata written into every exported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackTags<'a> {
    pub artist: &'a str,
    pub title: &'a str,
    pub number: u32,
}

impl<'a> TrackTags<'a> {
    pub fn of(track: &'a Track) -> Self {
        Self {
            artist: track.artist(),
            title: track.title(),
            number: u32::try_from(track.index()).unwrap_or(u32::MAX),
        }
    }
}

#[derive(Debug, Error)]
pub enum TagError {
    #[error("failed to tag {}: {source}", .path.display())]
    Lofty {
        path: PathBuf,
        #[source]
        source: LoftyError,
    },

    #[error("{} has no writable tag format", .path.display())]
    Unsupported { path: PathBuf },
}

/// Writes artist/title/track number into an audio file.
pub trait Tagger {
    fn tag(&mut self, path: &Path, tags: &TrackTags<'_>) -> Result<(), TagError>;
}

/// Tags files in place with lofty, using the file's primary tag format
/// (ID3v2 for WAV).
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagger;

impl Tagger for LoftyTagger {
    fn tag(&mut self, path: &Path, tags: &TrackTags<'_>) -> Result<(), TagError> {
        let lofty_err = |source: LoftyError| TagError::Lofty {
            path: path.to_path_buf(),
            source,
        };

        let mut tagged = lofty::read_from_path(path).map_err(lofty_err)?;
        if tagged.primary_tag().is_none() {
            let tag_type = tagged.primary_tag_type();
            tagged.insert_tag(Tag::new(tag_type));
        }

        let Some(tag) = tagged.primary_tag_mut() else {
            return Err(TagError::Unsupported {
                path: path.to_path_buf(),
            });
        };

        tag.set_artist(tags.artist.to_string());
        tag.set_title(tags.title.to_string());
        tag.set_track(tags.number);
        tag.save_to_path(path, WriteOptions::default())
            .map_err(lofty_err)
    }
}
