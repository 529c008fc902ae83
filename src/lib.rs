// src/lib.rs
// GamePlayer - application state & persistence core of a retro game launcher
//
// Architecture:
// - Domain-centric: types and invariants live in `domain`
// - Stores own state: settings, stats, notifications, library
// - One controller: the ViewController is the only navigation state machine
// - Event-driven side effects: facts are published on the EventBus
// - Best-effort persistence: storage failures degrade, never crash

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod logger;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    format_file_size, format_play_time, ActiveTab, DomainError, DomainResult, Game,
    LaunchForm, LibraryDistribution, Notification, NotificationId, NotificationKind,
    NotificationPhase, Resolution, SettingField, SettingValue, Settings, Stats, System,
    ViewState,
};

// ============================================================================
// PUBLIC API - Errors and configuration
// ============================================================================

pub use config::AppConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, register_activity_handlers, DomainEvent, EventBus, EventLogEntry,
    GameLaunched, LaunchFailed, LibraryRefreshed, SettingsReset, SettingsSaved, ViewChanged,
};

// ============================================================================
// PUBLIC API - Persistence
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};
pub use repositories::{KeyValueRepository, SqliteKeyValueRepository};

// ============================================================================
// PUBLIC API - Stores
// ============================================================================

pub use services::{LibraryModel, NotificationQueue, SettingsStore, StatsStore};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppSnapshot, AppState, Command, ErrorResponse, ViewController};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    ConnectionStatus, DemoDataSource, GameDataSource, HttpDataSource, LaunchRequest,
    LaunchResponse,
};
