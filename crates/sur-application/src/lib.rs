//! Application layer for Sur.
//!
//! Coordinates the domain and infrastructure layers behind one use case.

pub mod session_usecase;

pub use session_usecase::SessionUseCase;
