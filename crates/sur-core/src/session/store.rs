//! Session store.
//!
//! Owns the per-session state (in-flight flag, error, current song, history)
//! and mirrors history into a durable slot after every change.

use std::sync::Arc;

use super::state::{HISTORY_LIMIT, SessionState, SessionStatus};
use super::storage::KeyValueStore;
use crate::error::{Result, SurError};
use crate::song::{GeneratedSong, SongRequest};

/// Storage key the history blob lives under.
pub const HISTORY_KEY: &str = "odia_sur_history";

/// Owns the session state and mirrors history into a [`KeyValueStore`].
///
/// `SessionStore` is responsible for:
/// - Tracking the in-flight generation (`submit` / `on_generation_result`)
/// - Keeping history most-recent-first and capped at [`HISTORY_LIMIT`]
/// - Selecting, updating and deleting history entries
/// - Persisting history after every change
///
/// All transitions are synchronous. Callers that await a generation between
/// `submit` and `on_generation_result` must not hold a lock on the store
/// across that await.
pub struct SessionStore {
    state: SessionState,
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Creates a store and restores history from `storage`.
    ///
    /// Construction never fails: a missing blob yields empty history and a
    /// malformed one is logged and discarded.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let history = match load_history(storage.as_ref()) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("Discarding stored history: {}", e);
                Vec::new()
            }
        };

        tracing::info!(entries = history.len(), "Session history loaded");

        Self {
            state: SessionState {
                history,
                ..SessionState::default()
            },
            storage,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn current_song(&self) -> Option<&GeneratedSong> {
        self.state.current_song.as_ref()
    }

    pub fn history(&self) -> &[GeneratedSong] {
        &self.state.history
    }

    /// Marks a generation as outstanding.
    ///
    /// # Errors
    ///
    /// - `Validation` if the request is invalid
    /// - `Busy` if a generation is already outstanding
    ///
    /// State is left untouched on error.
    pub fn submit(&mut self, request: &SongRequest) -> Result<()> {
        request.validate()?;
        if self.state.is_loading {
            return Err(SurError::Busy);
        }

        self.state.is_loading = true;
        self.state.error = None;
        tracing::info!(topic = %request.topic, "Generation started");
        Ok(())
    }

    /// Applies the outcome of the outstanding generation.
    ///
    /// Ignored when no generation is outstanding.
    pub fn on_generation_result(&mut self, result: Result<GeneratedSong>) {
        if !self.state.is_loading {
            tracing::warn!("Ignoring generation result with no generation outstanding");
            return;
        }
        self.state.is_loading = false;

        match result {
            Ok(song) => {
                tracing::info!(id = %song.id, title = %song.title, "Generation finished");
                self.state.history.insert(0, song.clone());
                self.state.history.truncate(HISTORY_LIMIT);
                self.state.current_song = Some(song);
                self.persist();
            }
            Err(e) => {
                tracing::info!("Generation failed: {}", e);
                self.state.error = Some(e.to_string());
            }
        }
    }

    /// Replaces the history entry with the same id and shows it.
    ///
    /// # Returns
    ///
    /// `false` (and no change) if no history entry has `song.id`.
    pub fn update_song(&mut self, song: GeneratedSong) -> bool {
        let Some(entry) = self.state.history.iter_mut().find(|s| s.id == song.id) else {
            tracing::debug!(id = %song.id, "update_song: id not in history");
            return false;
        };

        *entry = song.clone();
        self.state.current_song = Some(song);
        self.persist();
        true
    }

    /// Shows the history entry with `id`.
    ///
    /// # Returns
    ///
    /// `false` (and no change) if the id is not in history.
    pub fn select_history(&mut self, id: &str) -> bool {
        match self.state.find(id) {
            Some(song) => {
                self.state.current_song = Some(song.clone());
                true
            }
            None => false,
        }
    }

    /// Removes the history entry with `id`, unsetting the current song if it matched.
    ///
    /// # Returns
    ///
    /// `true` if an entry was removed.
    pub fn delete_song(&mut self, id: &str) -> bool {
        let before = self.state.history.len();
        self.state.history.retain(|song| song.id != id);
        let removed = self.state.history.len() != before;

        if self
            .state
            .current_song
            .as_ref()
            .is_some_and(|song| song.id == id)
        {
            self.state.current_song = None;
        }

        if removed {
            tracing::info!(id = %id, "Song deleted");
            self.persist();
        }
        removed
    }

    /// Empties history. The current song stays on display.
    pub fn clear_history(&mut self) {
        self.state.history.clear();
        tracing::info!("History cleared");
        self.persist();
    }

    /// Clears the error message of the last failed generation.
    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    /// Writes history to storage. Failures are logged, never surfaced.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.state.history) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize history: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.store(HISTORY_KEY, &json) {
            tracing::warn!("Failed to persist history: {}", e);
        }
    }
}

fn load_history(storage: &dyn KeyValueStore) -> Result<Vec<GeneratedSong>> {
    let Some(raw) = storage
        .load(HISTORY_KEY)
        .map_err(|e| SurError::PersistenceLoad(e.to_string()))?
    else {
        return Ok(Vec::new());
    };

    let mut history: Vec<GeneratedSong> =
        serde_json::from_str(&raw).map_err(|e| SurError::PersistenceLoad(e.to_string()))?;
    history.truncate(HISTORY_LIMIT);
    Ok(history)
}
