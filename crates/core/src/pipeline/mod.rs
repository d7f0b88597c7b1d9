//! Posting pipeline: generate -> render -> source -> publish.

mod config;
mod error;
mod run;
mod types;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use run::PostPipeline;
pub use types::{PublishOutcome, PublishReport};
