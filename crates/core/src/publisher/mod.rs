//! Social-platform publishing.
//!
//! The default implementation talks to a Graph-API style endpoint with the
//! two-step container/publish flow. `Ok(false)` from [`Publisher::publish`]
//! means the platform rejected the post without a transport failure.

mod config;
mod error;
mod graph_api;
mod traits;

pub use config::PublisherConfig;
pub use error::PublishError;
pub use graph_api::GraphApiPublisher;
pub use traits::Publisher;
