// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod format;
pub mod game;
pub mod notification;
pub mod settings;
pub mod statistics;
pub mod system;
pub mod view;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Library
pub use game::Game;
pub use system::System;

// Settings
pub use settings::{
    clamp_volume, Resolution, SettingField, SettingValue, Settings,
    SettingsPatch,
};

// Statistics
pub use statistics::{LibraryDistribution, Stats, PLAY_TIME_PER_LAUNCH_HOURS};

// Notifications
pub use notification::{
    Notification, NotificationId, NotificationKind, NotificationPhase, CLOSING_DURATION,
    DISPLAY_DURATION,
};

// Navigation
pub use view::{ActiveTab, LaunchForm, ViewState, DEFAULT_SAVE_SLOT};

// Presentation
pub use format::{format_file_size, format_play_time};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
