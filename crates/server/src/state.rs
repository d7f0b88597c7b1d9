use std::sync::Arc;

use postino_core::config::{Config, SanitizedConfig};
use postino_core::dispatch::TopicDispatcher;
use postino_core::publisher::Publisher;
use postino_core::topic::TopicStore;

/// Shared application state
///
/// The publisher and dispatcher are optional: without collaborator config
/// the service still serves the topic queue API, it just cannot publish
/// or schedule runs.
pub struct AppState {
    config: Config,
    store: Arc<dyn TopicStore>,
    publisher: Option<Arc<dyn Publisher>>,
    dispatcher: Option<Arc<TopicDispatcher>>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn TopicStore>,
        publisher: Option<Arc<dyn Publisher>>,
        dispatcher: Option<Arc<TopicDispatcher>>,
    ) -> Self {
        Self {
            config,
            store,
            publisher,
            dispatcher,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        self.config.sanitized()
    }

    pub fn store(&self) -> &dyn TopicStore {
        self.store.as_ref()
    }

    pub fn publisher(&self) -> Option<&Arc<dyn Publisher>> {
        self.publisher.as_ref()
    }

    pub fn dispatcher(&self) -> Option<&Arc<TopicDispatcher>> {
        self.dispatcher.as_ref()
    }
}
