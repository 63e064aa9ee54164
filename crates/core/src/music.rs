//! Control surface over an external audio player.
//!
//! The panel only forwards commands and mirrors what the player reports back;
//! it never assumes a command succeeded until the matching event arrives.

use std::collections::VecDeque;

pub const NO_TRACK_TITLE: &str = "Nothing playing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Play,
    Pause,
    Finish,
    /// Playback advanced; the current title may have changed.
    Progress,
}

/// The external player the panel drives.
pub trait MusicBackend {
    fn is_ready(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn next(&mut self);
    fn prev(&mut self);
    fn current_title(&self) -> Option<String>;
    fn poll_events(&mut self) -> Vec<PlayerEvent>;
}

#[derive(Debug, Clone)]
pub struct MusicPanel<B> {
    backend: B,
    playing: bool,
    track_title: String,
}

impl<B: MusicBackend> MusicPanel<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            playing: false,
            track_title: NO_TRACK_TITLE.to_string(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn track_title(&self) -> &str {
        &self.track_title
    }

    pub fn is_ready(&self) -> bool {
        self.backend.is_ready()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Returns `false` when the player is not ready and the command was dropped.
    pub fn toggle_play_pause(&mut self) -> bool {
        if !self.ensure_ready("play/pause") {
            return false;
        }
        if self.playing {
            self.backend.pause();
        } else {
            self.backend.play();
        }
        self.sync();
        true
    }

    pub fn next_track(&mut self) -> bool {
        if !self.ensure_ready("next") {
            return false;
        }
        self.backend.next();
        self.sync();
        true
    }

    pub fn previous_track(&mut self) -> bool {
        if !self.ensure_ready("prev") {
            return false;
        }
        self.backend.prev();
        self.sync();
        true
    }

    /// Drain player events into the displayed state.
    pub fn sync(&mut self) {
        for event in self.backend.poll_events() {
            match event {
                PlayerEvent::Play => self.playing = true,
                PlayerEvent::Pause | PlayerEvent::Finish => self.playing = false,
                PlayerEvent::Progress => {
                    if let Some(title) = self.backend.current_title() {
                        self.track_title = title;
                    }
                }
            }
        }
    }

    fn ensure_ready(&self, command: &str) -> bool {
        if self.backend.is_ready() {
            return true;
        }
        tracing::debug!(command, "music player not ready, ignoring command");
        false
    }
}

/// In-memory player over a fixed set of track titles. Wraps at both ends.
#[derive(Debug, Clone)]
pub struct PlaylistDeck {
    playlist_url: String,
    tracks: Vec<String>,
    cursor: usize,
    playing: bool,
    events: VecDeque<PlayerEvent>,
}

impl PlaylistDeck {
    pub fn new<T: Into<String>>(playlist_url: T, tracks: Vec<String>) -> Self {
        let tracks = tracks
            .into_iter()
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .collect();
        Self {
            playlist_url: playlist_url.into(),
            tracks,
            cursor: 0,
            playing: false,
            events: VecDeque::new(),
        }
    }

    pub fn playlist_url(&self) -> &str {
        &self.playlist_url
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// The set ran out, as a real player reports at the end of a playlist.
    pub fn finish(&mut self) {
        if self.playing {
            self.playing = false;
            self.events.push_back(PlayerEvent::Finish);
        }
    }

    fn step(&mut self, forward: bool) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
        self.events.push_back(PlayerEvent::Progress);
    }
}

impl MusicBackend for PlaylistDeck {
    fn is_ready(&self) -> bool {
        !self.tracks.is_empty()
    }

    fn play(&mut self) {
        if self.playing || self.tracks.is_empty() {
            return;
        }
        self.playing = true;
        self.events.push_back(PlayerEvent::Play);
        self.events.push_back(PlayerEvent::Progress);
    }

    fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        self.events.push_back(PlayerEvent::Pause);
    }

    fn next(&mut self) {
        self.step(true);
    }

    fn prev(&mut self) {
        self.step(false);
    }

    fn current_title(&self) -> Option<String> {
        self.tracks.get(self.cursor).cloned()
    }

    fn poll_events(&mut self) -> Vec<PlayerEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn deck() -> PlaylistDeck {
        PlaylistDeck::new(
            "https://example.com/set",
            vec!["First".into(), " ".into(), "Second".into(), "Third".into()],
        )
    }

    #[test]
    fn commands_are_dropped_until_player_is_ready() {
        let mut panel = MusicPanel::new(PlaylistDeck::new("https://example.com/set", Vec::new()));

        assert!(!panel.toggle_play_pause());
        assert!(!panel.next_track());
        assert!(!panel.previous_track());
        assert!(!panel.is_playing());
        assert_eq!(panel.track_title(), NO_TRACK_TITLE);
    }

    #[test]
    fn play_pause_follows_player_events() {
        let mut panel = MusicPanel::new(deck());
        assert_eq!(panel.backend().track_count(), 3);

        assert!(panel.toggle_play_pause());
        assert!(panel.is_playing());
        assert_eq!(panel.track_title(), "First");

        assert!(panel.toggle_play_pause());
        assert!(!panel.is_playing());
        assert_eq!(panel.track_title(), "First");
    }

    #[test]
    fn next_and_prev_wrap_and_update_title() {
        let mut panel = MusicPanel::new(deck());
        panel.previous_track();
        assert_eq!(panel.track_title(), "Third");

        panel.next_track();
        panel.next_track();
        assert_eq!(panel.track_title(), "Second");
    }

    #[test]
    fn finish_event_clears_playing_flag() {
        let mut panel = MusicPanel::new(deck());
        panel.toggle_play_pause();
        panel.backend_mut().finish();
        panel.sync();

        assert!(!panel.is_playing());
    }
}
