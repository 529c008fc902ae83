// src/events/mod.rs
//
// Internal Event System - Public API
//
// EventHandler is internal to the bus and is not exported.

pub mod bus;
pub mod handlers;
pub mod types;

pub use bus::{EventBus, EventLogEntry, MAX_EVENT_LOG_ENTRIES};
pub use handlers::register_activity_handlers;
pub use types::{
    DomainEvent, GameLaunched, LaunchFailed, LibraryRefreshed, SettingsReset, SettingsSaved,
    ViewChanged,
};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
