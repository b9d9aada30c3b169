//! Song domain models.
//!
//! Moods, genres and lengths are closed enums. They serialize as the
//! human-readable label shown to the user, which is also the format the
//! history blob has always been stored in, and parse case-insensitively from
//! either the short variant name (`"Sad"`) or the full label.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::error::{Result, SurError};

/// The emotion of the song.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(into = "String", try_from = "String")]
pub enum Mood {
    #[default]
    #[strum(to_string = "Romantic / Love", serialize = "Romantic")]
    Romantic,
    #[strum(to_string = "Sad / Heartbroken", serialize = "Sad")]
    Sad,
    #[strum(to_string = "Happy / Cheerful", serialize = "Happy")]
    Happy,
    #[strum(to_string = "Energetic / Excitement", serialize = "Energetic")]
    Energetic,
    #[strum(to_string = "Spiritual / Devotional", serialize = "Spiritual")]
    Spiritual,
    #[strum(to_string = "Inspirational / Motivating", serialize = "Inspirational")]
    Inspirational,
    #[strum(to_string = "Patriotic / Desha Bhakti", serialize = "Patriotic")]
    Patriotic,
    #[strum(to_string = "Funny / Comedy", serialize = "Funny")]
    Funny,
    #[strum(to_string = "Angry / Aggressive", serialize = "Angry")]
    Angry,
}

/// The musical style or arrangement of the song.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(into = "String", try_from = "String")]
pub enum Genre {
    #[default]
    #[strum(to_string = "Ollywood Commercial (Pop)", serialize = "Ollywood")]
    Ollywood,
    #[strum(to_string = "Sambalpuri (Folk)", serialize = "Sambalpuri")]
    Sambalpuri,
    #[strum(to_string = "Bhajana (Traditional)", serialize = "Bhajana")]
    Bhajana,
    #[strum(to_string = "Item Song (Dance Number)", serialize = "Item")]
    Item,
    #[strum(to_string = "Rap / Hip-Hop", serialize = "Rap")]
    Rap,
    #[strum(to_string = "Rock / Band Style", serialize = "Rock")]
    Rock,
    #[strum(to_string = "Lofi (Slow Reverb)", serialize = "Lofi")]
    Lofi,
    #[strum(to_string = "Ghazal / Shayari Style", serialize = "Ghazal")]
    Ghazal,
    #[strum(to_string = "Jatra (Opera Style)", serialize = "Jatra")]
    Jatra,
    #[strum(to_string = "Classic (Old School 90s)", serialize = "Classic")]
    Classic,
}

/// Target duration of the song. Selects the structure template.
///
/// Parsing never fails when going through [`SongLength::parse_lenient`] or
/// serde: anything unrecognized becomes [`SongLength::Short`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(into = "String", from = "String")]
pub enum SongLength {
    #[default]
    #[strum(to_string = "Short (1-2 mins)", serialize = "Short")]
    Short,
    #[strum(to_string = "Medium (3-4 mins)", serialize = "Medium")]
    Medium,
    #[strum(
        to_string = "Long (5 mins)",
        serialize = "Long",
        serialize = "Long (5+ mins)"
    )]
    Long,
    #[strum(to_string = "Extended (6+ mins)", serialize = "Extended")]
    Extended,
}

impl SongLength {
    /// Parses a length, falling back to `Short` for unknown input.
    pub fn parse_lenient(value: &str) -> Self {
        value.trim().parse().unwrap_or_default()
    }
}

macro_rules! label_conversions {
    ($($ty:ty),*) => {$(
        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.to_string()
            }
        }
    )*};
}

label_conversions!(Mood, Genre, SongLength);

impl TryFrom<String> for Mood {
    type Error = strum::ParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.trim().parse()
    }
}

impl TryFrom<String> for Genre {
    type Error = strum::ParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.trim().parse()
    }
}

impl From<String> for SongLength {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

/// Parameters the user submits to generate one song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRequest {
    pub topic: String,
    pub mood: Mood,
    pub genre: Genre,
    #[serde(default)]
    pub length: SongLength,
}

impl SongRequest {
    /// Creates a validated request.
    ///
    /// # Errors
    ///
    /// Returns `SurError::Validation` when the topic is empty or only whitespace.
    pub fn new(
        topic: impl Into<String>,
        mood: Mood,
        genre: Genre,
        length: SongLength,
    ) -> Result<Self> {
        let request = Self {
            topic: topic.into(),
            mood,
            genre,
            length,
        };
        request.validate()?;
        Ok(request)
    }

    /// Checks the request before it is handed to the generation client.
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(SurError::validation("Song topic must not be empty"));
        }
        Ok(())
    }
}

/// One generated song as shown to the user and stored in history.
///
/// Only `lyrics` changes after creation, through the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSong {
    /// Unique song identifier (UUID format)
    pub id: String,
    /// Title derived from the first line of the generated text
    pub title: String,
    /// Full generated (or edited) body
    pub lyrics: String,
    /// Creation time as Unix milliseconds
    pub created_at: i64,
    /// The request that produced this song
    pub metadata: SongRequest,
}

impl GeneratedSong {
    /// Creates a song with a fresh id stamped with the current time.
    pub fn new(title: impl Into<String>, lyrics: impl Into<String>, metadata: SongRequest) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            lyrics: lyrics.into(),
            created_at: Utc::now().timestamp_millis(),
            metadata,
        }
    }

    /// Returns a copy of this song carrying different lyrics.
    pub fn with_lyrics(&self, lyrics: impl Into<String>) -> Self {
        Self {
            lyrics: lyrics.into(),
            ..self.clone()
        }
    }

    /// Creation time as a UTC timestamp.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }
}
