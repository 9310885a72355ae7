//! Content generation adapter.
//!
//! Turns a topic into draft slides by calling an OpenAI-compatible
//! chat-completions endpoint. The API layer only sees the
//! [`ContentGenerator`] trait, so tests can swap in [`StaticGenerator`].

pub mod client;
pub mod draft;
pub mod error;
pub mod generator;
pub mod prompt;

pub use draft::DraftSlide;
pub use error::GenerationError;
pub use generator::{
    ContentGenerator, DeckRequest, LlmGenerator, RegenerateRequest, SlideRequest, StaticGenerator,
};
