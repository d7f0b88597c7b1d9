//! Topic queue: the persistent unit of scheduled carousel work.
//!
//! A topic moves through `pending -> in_progress -> done | failed`;
//! `in_progress -> pending` only via the administrative [`TopicStore::reset_stuck`].

mod sqlite_store;
mod store;
mod types;

pub use sqlite_store::SqliteTopicStore;
pub use store::{TopicError, TopicStore};
pub use types::{Topic, TopicStatus};
