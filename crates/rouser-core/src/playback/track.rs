use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where a track's audio actually comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackSource {
    /// A local audio file.
    File { path: PathBuf },
    /// An item in the device media library, addressed by its library id.
    Library { item_id: String },
}

/// A playable track. Metadata only; decoding belongs to the audio engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    /// Duration in seconds, 0 when unknown.
    #[serde(default)]
    pub duration_secs: u64,
    /// `None` means the item has no resolvable audio source and is skipped
    /// when queues are built.
    #[serde(default)]
    pub source: Option<TrackSource>,
}

impl Track {
    pub fn is_playable(&self) -> bool {
        self.source.is_some()
    }

    /// Convenience constructor for a local audio file; the file stem doubles
    /// as the title.
    pub fn from_file(path: PathBuf) -> Self {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            id: path.to_string_lossy().into_owned(),
            title,
            artist: String::new(),
            duration_secs: 0,
            source: Some(TrackSource::File { path }),
        }
    }
}

/// Ordered, owned track list used as a playback session's content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackQueue {
    tracks: Vec<Track>,
}

impl TrackQueue {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_file_uses_stem_as_title() {
        let t = Track::from_file(PathBuf::from("/music/morning mix.flac"));
        assert_eq!(t.title, "morning mix");
        assert!(t.is_playable());
    }

    #[test]
    fn sourceless_track_is_not_playable() {
        let t = Track {
            id: "x".into(),
            title: "ghost".into(),
            artist: String::new(),
            duration_secs: 0,
            source: None,
        };
        assert!(!t.is_playable());
    }
}
