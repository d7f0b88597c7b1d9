//! Slide rendering.
//!
//! Rendering is delegated to an external command; this module only shapes
//! the per-slide payload, runs the command, and collects the produced
//! artifacts. One bad slide never fails the whole batch: [`SlideRenderer`]
//! returns a per-slide `Result`.

mod command;
mod config;
mod error;
mod theme;
mod traits;
mod types;

pub use command::CommandRenderer;
pub use config::RendererConfig;
pub use error::RenderError;
pub use theme::{Palette, Theme};
pub use traits::SlideRenderer;
pub use types::Artifact;
