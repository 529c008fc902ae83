// src/events/handlers/activity_handler.rs
//
// Activity Log Handler
//
// Writes a one-line activity record for user-visible facts.
// Does not contain business logic and never touches the stores.

use crate::events::types::{
    GameLaunched, LaunchFailed, LibraryRefreshed, SettingsReset, SettingsSaved,
};
use crate::events::EventBus;

/// Registers the activity log handlers with the event bus.
pub fn register_activity_handlers(bus: &EventBus) {
    bus.subscribe::<GameLaunched, _>(|event| {
        log::info!(
            "[ACTIVITY] Launched {}/{} (slot {}, cheats {})",
            event.system,
            event.filename,
            event.save_slot,
            if event.cheats { "on" } else { "off" }
        );
    });

    bus.subscribe::<LaunchFailed, _>(|event| {
        log::warn!(
            "[ACTIVITY] Launch of {}/{} failed: {}",
            event.system,
            event.filename,
            event.reason
        );
    });

    bus.subscribe::<LibraryRefreshed, _>(|event| {
        log::info!(
            "[ACTIVITY] Library holds {} games across {} systems",
            event.total_games,
            event.system_count
        );
    });

    bus.subscribe::<SettingsSaved, _>(|_| log::info!("[ACTIVITY] Settings saved"));
    bus.subscribe::<SettingsReset, _>(|_| log::info!("[ACTIVITY] Settings reset to defaults"));

    log::debug!("Activity handlers registered");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::System;

    #[test]
    fn test_registers_one_handler_per_event() {
        let bus = EventBus::new();
        register_activity_handlers(&bus);

        assert_eq!(bus.subscriber_count::<GameLaunched>(), 1);
        assert_eq!(bus.subscriber_count::<LaunchFailed>(), 1);
        assert_eq!(bus.subscriber_count::<LibraryRefreshed>(), 1);
        assert_eq!(bus.subscriber_count::<SettingsSaved>(), 1);
        assert_eq!(bus.subscriber_count::<SettingsReset>(), 1);

        bus.emit(LaunchFailed::new(
            System::Snes,
            "game1.smc".to_string(),
            "emulator missing".to_string(),
        ));
        assert_eq!(bus.get_event_log()[0].handler_count, 1);
    }
}
