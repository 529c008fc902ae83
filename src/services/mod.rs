// src/services/mod.rs
//
// Services Module - the application stores
//
// Each store owns one slice of application state. Stores never call each
// other; the ViewController orchestrates them.

pub mod library_model;
pub mod notification_queue;
pub mod settings_store;
pub mod stats_store;


pub use library_model::LibraryModel;
pub use notification_queue::NotificationQueue;
pub use settings_store::{SettingsStore, SETTINGS_KEY};
pub use stats_store::{StatsStore, STATS_KEY};
