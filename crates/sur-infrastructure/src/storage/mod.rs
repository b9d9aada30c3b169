//! Storage layer for file-based persistence.
//!
//! - `atomic`: tmp-file + fsync + rename writes under an exclusive lock
//! - `toml_file`: typed TOML documents (`config.toml`)
//! - `json_file_store`: the `KeyValueStore` used for session history

mod atomic;
mod json_file_store;
mod toml_file;

pub use atomic::{read_optional, write_atomic};
pub use json_file_store::JsonFileStore;
pub use toml_file::AtomicTomlFile;
