//! Prompt construction for lyric generation.
//!
//! - `template`: per-length structure templates (`StructureTemplate`, `Section`)
//! - `builder`: renders a `SongRequest` into the final prompt text (`PromptBuilder`)

mod builder;
mod template;

pub use builder::{Prompt, PromptBuilder};
pub use template::{LineRange, RhymeScheme, Section, SectionKind, StructureTemplate, template_for};
