//! Session use case implementation.
//!
//! `SessionUseCase` coordinates the `SessionStore`, the `GenerationClient`
//! and the `LyricsEditor` so the front-end only deals with one handle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sur_core::editor::LyricsEditor;
use sur_core::error::{Result, SurError};
use sur_core::generation::GenerationClient;
use sur_core::session::{SessionState, SessionStore};
use sur_core::song::{GeneratedSong, SongRequest};
use sur_infrastructure::LyricsExporter;
use tokio::sync::RwLock;

/// Use case for generating, browsing and editing songs.
///
/// # Thread Safety
///
/// The store and editor sit behind `tokio::sync::RwLock`. Locks are taken
/// only around synchronous transitions, always store before editor, and never
/// held across the generation request. A second `generate` issued while one
/// is outstanding fails with `SurError::Busy` without contacting the endpoint.
#[derive(Clone)]
pub struct SessionUseCase {
    store: Arc<RwLock<SessionStore>>,
    editor: Arc<RwLock<LyricsEditor>>,
    client: GenerationClient,
    /// Directory used by `export` when no directory is given
    export_dir: PathBuf,
}

impl SessionUseCase {
    /// Creates a new `SessionUseCase`.
    ///
    /// # Arguments
    ///
    /// * `store` - Session store, already loaded from storage
    /// * `client` - Client wrapping the text generator
    /// * `export_dir` - Default export directory
    pub fn new(store: SessionStore, client: GenerationClient, export_dir: PathBuf) -> Self {
        let mut editor = LyricsEditor::new();
        editor.sync(store.current_song());

        Self {
            store: Arc::new(RwLock::new(store)),
            editor: Arc::new(RwLock::new(editor)),
            client,
            export_dir,
        }
    }

    /// Generates a song and makes it current.
    ///
    /// # Errors
    ///
    /// - `Validation` / `Busy` from submission (state unchanged)
    /// - the generation error, which is also recorded in the session state
    pub async fn generate(&self, request: SongRequest) -> Result<GeneratedSong> {
        self.store.write().await.submit(&request)?;

        let result = self.client.generate(&request).await;

        let mut store = self.store.write().await;
        store.on_generation_result(result.clone());
        self.editor.write().await.sync(store.current_song());
        result
    }

    /// Returns a copy of the session state.
    pub async fn snapshot(&self) -> SessionState {
        self.store.read().await.state().clone()
    }

    /// Returns a copy of the editor.
    pub async fn editor(&self) -> LyricsEditor {
        self.editor.read().await.clone()
    }

    /// Shows a history entry. `false` if the id is unknown.
    pub async fn select(&self, id: &str) -> bool {
        let mut store = self.store.write().await;
        let selected = store.select_history(id);
        self.editor.write().await.sync(store.current_song());
        selected
    }

    /// Deletes a history entry. `false` if the id is unknown.
    pub async fn delete(&self, id: &str) -> bool {
        let mut store = self.store.write().await;
        let deleted = store.delete_song(id);
        self.editor.write().await.sync(store.current_song());
        deleted
    }

    pub async fn clear_history(&self) {
        self.store.write().await.clear_history();
    }

    pub async fn dismiss_error(&self) {
        self.store.write().await.dismiss_error();
    }

    /// Enters edit mode on the current song.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no song is on display.
    pub async fn begin_edit(&self) -> Result<()> {
        let store = self.store.read().await;
        let mut editor = self.editor.write().await;
        if editor.is_editing() {
            return Ok(());
        }
        if editor.begin(store.current_song()) {
            Ok(())
        } else {
            Err(no_current_song())
        }
    }

    /// Replaces every occurrence of `find` in the edit buffer, entering
    /// edit mode first if needed.
    pub async fn replace_all(&self, find: &str, replace: &str) -> Result<usize> {
        self.begin_edit().await?;
        Ok(self.editor.write().await.find_replace_all(find, replace))
    }

    /// Replaces the edit buffer, entering edit mode first if needed.
    pub async fn set_buffer(&self, text: impl Into<String>) -> Result<()> {
        self.begin_edit().await?;
        self.editor.write().await.set_buffer(text);
        Ok(())
    }

    /// Commits the edit buffer to the current song.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no song is on display, or with the song's id if
    /// it is no longer in history. Edit mode is kept in the latter case.
    pub async fn save_edit(&self) -> Result<GeneratedSong> {
        let mut store = self.store.write().await;
        let mut editor = self.editor.write().await;
        let id = store
            .current_song()
            .map(|song| song.id.clone())
            .ok_or_else(no_current_song)?;
        if !editor.save(&mut store) {
            return Err(SurError::not_found("song", id));
        }
        store.current_song().cloned().ok_or_else(no_current_song)
    }

    /// Discards the edit buffer.
    pub async fn cancel_edit(&self) {
        let store = self.store.read().await;
        self.editor.write().await.cancel(store.current_song());
    }

    /// Writes the displayed lyrics (including unsaved edits) to a text file.
    ///
    /// # Arguments
    ///
    /// * `directory` - Target directory; the configured one when `None`
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub async fn export(&self, directory: Option<&Path>) -> Result<PathBuf> {
        let (title, lyrics) = {
            let store = self.store.read().await;
            let editor = self.editor.read().await;
            let song = store.current_song().ok_or_else(no_current_song)?;
            (song.title.clone(), editor.buffer().to_string())
        };

        let directory = directory.unwrap_or(self.export_dir.as_path());
        LyricsExporter::new(directory).export(&title, &lyrics)
    }
}

fn no_current_song() -> SurError {
    SurError::not_found("song", "current")
}
