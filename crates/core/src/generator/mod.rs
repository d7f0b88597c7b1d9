//! Slide text generation.
//!
//! A [`SlideGenerator`] turns a topic into a short list of carousel slides.
//! The default implementation calls an OpenAI-compatible chat-completions
//! endpoint in JSON mode; [`CarouselKind`] selects the prompt and the
//! expected slide count.

mod config;
mod error;
mod openai;
mod traits;
mod types;

pub use config::GeneratorConfig;
pub use error::GenerationError;
pub use openai::OpenAiGenerator;
pub use traits::SlideGenerator;
pub use types::{CarouselKind, GenerationRequest, Slide, SlideBody};
