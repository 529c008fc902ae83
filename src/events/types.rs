// src/events/types.rs
//
// All domain events emitted by the controller.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::System;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ident) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($event)
            }
        }
    };
}

// ============================================================================
// NAVIGATION EVENTS
// ============================================================================

/// Emitted after every accepted screen transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub from: String,
    pub to: String,
    pub system: Option<System>,
}

impl ViewChanged {
    pub fn new(from: &str, to: &str, system: Option<System>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            from: from.to_string(),
            to: to.to_string(),
            system,
        }
    }
}

impl_domain_event!(ViewChanged);

// ============================================================================
// LIBRARY EVENTS
// ============================================================================

/// Emitted when a full library fetch has been swapped in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryRefreshed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub total_games: usize,
    pub system_count: usize,
}

impl LibraryRefreshed {
    pub fn new(total_games: usize, system_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            total_games,
            system_count,
        }
    }
}

impl_domain_event!(LibraryRefreshed);

// ============================================================================
// LAUNCH EVENTS
// ============================================================================

/// Emitted when the backend accepted a launch request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLaunched {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub system: System,
    pub filename: String,
    pub save_slot: u8,
    pub cheats: bool,
}

impl GameLaunched {
    pub fn new(system: System, filename: String, save_slot: u8, cheats: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            system,
            filename,
            save_slot,
            cheats,
        }
    }
}

impl_domain_event!(GameLaunched);

/// Emitted when a launch was refused or never reached the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub system: System,
    pub filename: String,
    pub reason: String,
}

impl LaunchFailed {
    pub fn new(system: System, filename: String, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            system,
            filename,
            reason,
        }
    }
}

impl_domain_event!(LaunchFailed);

// ============================================================================
// SETTINGS EVENTS
// ============================================================================

/// Emitted after the settings record was written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSaved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl SettingsSaved {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for SettingsSaved {
    fn default() -> Self {
        Self::new()
    }
}

impl_domain_event!(SettingsSaved);

/// Emitted after a confirmed reset to defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsReset {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl SettingsReset {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for SettingsReset {
    fn default() -> Self {
        Self::new()
    }
}

impl_domain_event!(SettingsReset);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(ViewChanged::new("SystemSelector", "GameList", Some(System::Nes)).event_type(), "ViewChanged");
        assert_eq!(LibraryRefreshed::new(8, 5).event_type(), "LibraryRefreshed");
        assert_eq!(SettingsReset::new().event_type(), "SettingsReset");
    }

    #[test]
    fn test_each_event_gets_its_own_id() {
        let a = GameLaunched::new(System::Nes, "game1.nes".to_string(), 1, false);
        let b = GameLaunched::new(System::Nes, "game1.nes".to_string(), 1, false);
        assert_ne!(a.event_id(), b.event_id());
        assert!(a.occurred_at() <= b.occurred_at());
    }
}
