//! Supplementary image sourcing.
//!
//! Best-effort: sourcing failures never fail a pipeline run, the carousel
//! just ships without reference diagrams.

mod config;
mod error;
mod http;
mod traits;
mod types;

pub use config::SourcingConfig;
pub use error::SourcingError;
pub use http::HttpImageSourcer;
pub use traits::ImageSourcer;
pub use types::SourcedImage;
