//! Core library for the postino carousel posting service.
//!
//! The topic queue ([`topic`]) hands pending topics to the dispatcher
//! ([`dispatch`]), which runs each through the posting pipeline
//! ([`pipeline`]): generate slide text, render images, source reference
//! diagrams and publish everything to the platform. Collaborators are
//! traits with HTTP- or command-backed default implementations and mocks
//! in [`testing`].

pub mod config;
pub mod dispatch;
pub mod generator;
pub mod metrics;
pub mod pipeline;
pub mod publisher;
pub mod renderer;
pub mod sourcing;
pub mod testing;
pub mod topic;
pub mod util;
