//! Topic dispatching: claim pending topics and fan them out to a bounded
//! worker pool running the posting pipeline.

mod config;
mod dispatcher;
mod error;

pub use config::DispatcherConfig;
pub use dispatcher::TopicDispatcher;
pub use error::DispatchError;
