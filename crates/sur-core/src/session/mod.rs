//! Client-side session state.
//!
//! - `state`: `SessionState` snapshot and derived `SessionStatus`
//! - `storage`: `KeyValueStore` trait and the in-memory `MemoryStore`
//! - `store`: `SessionStore`, the single owner of history and the current song

mod state;
mod storage;
mod store;

pub use state::{HISTORY_LIMIT, SessionState, SessionStatus};
pub use storage::{KeyValueStore, MemoryStore};
pub use store::{HISTORY_KEY, SessionStore};
