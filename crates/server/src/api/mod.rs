pub mod carousel;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod schedule;
pub mod topics;

pub use routes::create_router;
