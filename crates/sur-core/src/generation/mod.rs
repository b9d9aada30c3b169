//! Lyric generation.
//!
//! - `generator`: the `TextGenerator` trait implemented by API agents
//! - `client`: `GenerationClient`, title extraction and failure classification

mod client;
mod generator;

pub use client::{GenerationClient, classify_failure, extract_title};
pub use generator::{EndpointError, EndpointErrorKind, SamplingConfig, TextGenerator};
