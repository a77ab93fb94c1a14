//! Playlists and track-id resolution.
//!
//! The library is the source a fired alarm's track-id list is resolved
//! against. An alarm with no track ids of its own plays the currently
//! selected playlist, so an alarm scheduled before any playlist was picked
//! still wakes somebody up.

use serde::{Deserialize, Serialize};

use crate::playback::{Track, TrackQueue};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            tracks,
        }
    }

    /// Tracks with a resolvable audio source, in playlist order.
    pub fn playable_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(|t| t.is_playable())
    }

    pub fn has_playable_tracks(&self) -> bool {
        self.playable_tracks().next().is_some()
    }
}

/// The set of known playlists plus the user's current selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    playlists: Vec<Playlist>,
    selected: Option<usize>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a playlist. The first playlist with playable tracks becomes
    /// the selection if nothing is selected yet.
    pub fn add_playlist(&mut self, playlist: Playlist) {
        if self.selected.is_none() && playlist.has_playable_tracks() {
            self.selected = Some(self.playlists.len());
        }
        self.playlists.push(playlist);
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn selected(&self) -> Option<&Playlist> {
        self.playlists.get(self.selected?)
    }

    /// Select a playlist by name. Returns false if no such playlist exists.
    pub fn select(&mut self, name: &str) -> bool {
        match self.playlists.iter().position(|p| p.name == name) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    fn find_track(&self, id: &str) -> Option<&Track> {
        self.playlists
            .iter()
            .flat_map(|p| p.tracks.iter())
            .find(|t| t.id == id)
    }

    /// Resolve a track-id list into a playable queue.
    ///
    /// An empty id list means "the selected playlist". Ids that are unknown
    /// or point at unplayable tracks are dropped; the caller decides what an
    /// empty result means.
    pub fn resolve_queue(&self, track_ids: &[String]) -> TrackQueue {
        if track_ids.is_empty() {
            let tracks = self
                .selected()
                .map(|p| p.playable_tracks().cloned().collect())
                .unwrap_or_default();
            return TrackQueue::new(tracks);
        }
        let tracks = track_ids
            .iter()
            .filter_map(|id| self.find_track(id))
            .filter(|t| t.is_playable())
            .cloned()
            .collect();
        TrackQueue::new(tracks)
    }
}
