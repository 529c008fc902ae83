// src/application/state.rs

use std::sync::Arc;

use crate::application::controller::ViewController;
use crate::events::{register_activity_handlers, EventBus};
use crate::integrations::GameDataSource;
use crate::repositories::KeyValueRepository;
use crate::services::{SettingsStore, StatsStore};

/// Application state, built once in main.rs and owned by the driver loop.
/// Stores are loaded here; the controller owns them from then on.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub controller: ViewController,
}

impl AppState {
    pub fn new(repo: Arc<dyn KeyValueRepository>, data_source: Arc<dyn GameDataSource>) -> Self {
        let event_bus = Arc::new(EventBus::new());
        register_activity_handlers(&event_bus);

        let settings = SettingsStore::load(Arc::clone(&repo));
        let stats = StatsStore::load(repo);

        let controller = ViewController::new(settings, stats, data_source, Arc::clone(&event_bus));

        Self {
            event_bus,
            controller,
        }
    }
}
