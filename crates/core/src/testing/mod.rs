//! Mock collaborators for testing.

mod mock_generator;
mod mock_publisher;
mod mock_renderer;
mod mock_sourcer;

pub use mock_generator::MockGenerator;
pub use mock_publisher::{MockPublisher, RecordedPublish};
pub use mock_renderer::{MockRenderer, RecordedRender};
pub use mock_sourcer::MockSourcer;
