//! Session state model.

use serde::{Deserialize, Serialize};

use crate::song::GeneratedSong;

/// Maximum number of songs kept in history.
pub const HISTORY_LIMIT: usize = 10;

/// Coarse status derived from a [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Snapshot of everything the user currently sees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// True only while a generation is outstanding
    pub is_loading: bool,
    /// User-facing message of the last failed generation
    pub error: Option<String>,
    /// The song on display
    pub current_song: Option<GeneratedSong>,
    /// Most-recent-first, at most [`HISTORY_LIMIT`] entries
    pub history: Vec<GeneratedSong>,
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        if self.is_loading {
            SessionStatus::Loading
        } else if self.error.is_some() {
            SessionStatus::Error
        } else if self.current_song.is_some() {
            SessionStatus::Ready
        } else {
            SessionStatus::Idle
        }
    }

    /// Finds a history entry by id.
    pub fn find(&self, id: &str) -> Option<&GeneratedSong> {
        self.history.iter().find(|song| song.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::{Genre, Mood, SongLength, SongRequest};

    #[test]
    fn test_status_precedence() {
        let mut state = SessionState::default();
        assert_eq!(state.status(), SessionStatus::Idle);

        let request = SongRequest::new("rain", Mood::Sad, Genre::Rap, SongLength::Short).unwrap();
        state.current_song = Some(GeneratedSong::new("t", "l", request));
        assert_eq!(state.status(), SessionStatus::Ready);

        state.error = Some("boom".to_string());
        assert_eq!(state.status(), SessionStatus::Error);

        state.is_loading = true;
        assert_eq!(state.status(), SessionStatus::Loading);
    }
}
