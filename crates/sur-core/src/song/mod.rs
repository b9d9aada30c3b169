//! Song domain module.
//!
//! # Module Structure
//!
//! - `model`: request parameters (`SongRequest`, `Mood`, `Genre`, `SongLength`)
//!   and the generated result (`GeneratedSong`)

mod model;

pub use model::{GeneratedSong, Genre, Mood, SongLength, SongRequest};
