pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod generation;
pub mod prompt;
pub mod session;
pub mod song;

// Re-export common error type
pub use error::SurError;
