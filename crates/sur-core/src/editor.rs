//! Lyrics editor.
//!
//! A transient buffer over the displayed song's lyrics. Edits stay local
//! until [`LyricsEditor::save`] commits them through the session store.

use crate::session::SessionStore;
use crate::song::GeneratedSong;

/// Edit buffer for the current song.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricsEditor {
    buffer: String,
    editing: bool,
    /// Id and lyrics of the song the buffer was last loaded from.
    loaded_from: Option<(String, String)>,
}

impl LyricsEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Enters edit mode with the current song's lyrics.
    ///
    /// # Returns
    ///
    /// `false` if there is no current song.
    pub fn begin(&mut self, current: Option<&GeneratedSong>) -> bool {
        let Some(song) = current else {
            return false;
        };
        self.load(song);
        self.editing = true;
        true
    }

    /// Replaces every literal occurrence of `find` with `replace`.
    ///
    /// An empty `find` leaves the buffer unchanged.
    ///
    /// # Returns
    ///
    /// The number of occurrences replaced.
    pub fn find_replace_all(&mut self, find: &str, replace: &str) -> usize {
        if find.is_empty() {
            return 0;
        }
        let count = self.buffer.matches(find).count();
        if count > 0 {
            self.buffer = self.buffer.replace(find, replace);
        }
        count
    }

    /// Replaces the whole buffer.
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Commits the buffer as the current song's lyrics and leaves edit mode.
    ///
    /// # Returns
    ///
    /// `false` if there is no current song or it is no longer in history.
    /// Edit mode and the buffer are kept in that case so the draft can
    /// still be cancelled.
    pub fn save(&mut self, store: &mut SessionStore) -> bool {
        let Some(updated) = store
            .current_song()
            .map(|song| song.with_lyrics(self.buffer.clone()))
        else {
            return false;
        };

        if !store.update_song(updated.clone()) {
            return false;
        }
        self.loaded_from = Some((updated.id, updated.lyrics));
        self.editing = false;
        true
    }

    /// Discards edits and leaves edit mode.
    pub fn cancel(&mut self, current: Option<&GeneratedSong>) {
        match current {
            Some(song) => self.load(song),
            None => self.reset(),
        }
        self.editing = false;
    }

    /// Follows the displayed song.
    ///
    /// When its id or lyrics differ from what the buffer was loaded from, the
    /// buffer is reloaded and edit mode ends.
    pub fn sync(&mut self, current: Option<&GeneratedSong>) {
        let unchanged = match (current, &self.loaded_from) {
            (Some(song), Some((id, lyrics))) => song.id == *id && song.lyrics == *lyrics,
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }

        match current {
            Some(song) => self.load(song),
            None => self.reset(),
        }
        self.editing = false;
    }

    fn load(&mut self, song: &GeneratedSong) {
        self.buffer = song.lyrics.clone();
        self.loaded_from = Some((song.id.clone(), song.lyrics.clone()));
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.loaded_from = None;
    }
}
