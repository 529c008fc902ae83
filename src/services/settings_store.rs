// src/services/settings_store.rs
//
// Settings Store - user preferences with best-effort persistence
//
// RULES:
// - Load never fails: missing or malformed records fall back to defaults
// - Persisted records are partial and merged onto defaults leaf by leaf
// - Updates are pure in-memory mutations until save() is called

use std::sync::Arc;

use crate::domain::{SettingField, SettingValue, Settings, SettingsPatch};
use crate::error::AppResult;
use crate::repositories::KeyValueRepository;

/// Storage key of the persisted settings record
pub const SETTINGS_KEY: &str = "gamePlayerSettings";

pub struct SettingsStore {
    repo: Arc<dyn KeyValueRepository>,
    settings: Settings,
}

impl SettingsStore {
    /// Defaults merged with whatever partial record storage holds
    pub fn load(repo: Arc<dyn KeyValueRepository>) -> Self {
        let settings = read_persisted(repo.as_ref());
        Self { repo, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn get(&self, field: SettingField) -> SettingValue {
        self.settings.get(field)
    }

    /// Set one leaf. Nothing is written until [`SettingsStore::save`].
    pub fn update(&mut self, value: SettingValue) {
        log::debug!("Setting {} updated", value.field());
        self.settings.apply(value);
    }

    /// Set one leaf addressed by dotted path (or form control id) from an untyped value
    pub fn update_path(&mut self, path: &str, value: &serde_json::Value) -> AppResult<SettingValue> {
        let field: SettingField = path.parse()?;
        let typed = SettingValue::from_json(field, value)?;
        self.update(typed);
        Ok(typed)
    }

    /// Write the current record to storage
    pub fn save(&self) -> AppResult<()> {
        let json = serde_json::to_string(&self.settings)?;
        self.repo.set(SETTINGS_KEY, &json).map_err(|e| {
            log::error!("Failed to save settings: {}", e);
            e
        })?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Drop the persisted record and go back to defaults.
    ///
    /// Does nothing unless the user confirmed. Returns whether a reset happened.
    /// The in-memory record is reset even when the storage removal fails.
    pub fn reset(&mut self, confirmed: bool) -> AppResult<bool> {
        if !confirmed {
            return Ok(false);
        }

        let removed = self.repo.remove(SETTINGS_KEY);
        self.settings = Settings::default();
        removed?;

        log::info!("Settings reset to defaults");
        Ok(true)
    }
}

fn read_persisted(repo: &dyn KeyValueRepository) -> Settings {
    let defaults = Settings::default();

    let raw = match repo.get(SETTINGS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return defaults,
        Err(e) => {
            log::info!("Using default settings; cannot read {}: {}", SETTINGS_KEY, e);
            return defaults;
        }
    };

    match serde_json::from_str::<SettingsPatch>(&raw) {
        Ok(patch) => defaults.merged(&patch),
        Err(e) => {
            log::warn!("Using default settings; stored record is malformed: {}", e);
            defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Resolution;
    use crate::error::AppError;
    use crate::repositories::MockKeyValueRepository;
    use serde_json::json;

    fn repo_holding(value: Option<&'static str>) -> MockKeyValueRepository {
        let mut repo = MockKeyValueRepository::new();
        repo.expect_get()
            .returning(move |_| Ok(value.map(str::to_string)));
        repo
    }

    #[test]
    fn test_load_without_record_gives_defaults() {
        let store = SettingsStore::load(Arc::new(repo_holding(None)));
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_load_merges_partial_record() {
        let store = SettingsStore::load(Arc::new(repo_holding(Some(
            r#"{"display":{"resolution":"1280x720"},"audio":{"volume":20}}"#,
        ))));

        let s = store.settings();
        assert_eq!(s.display.resolution, Resolution::Hd);
        assert!(s.display.fullscreen);
        assert_eq!(s.audio.volume, 20);
        assert!(s.audio.enabled);
        assert!(s.input.gamepad_enabled);
    }

    #[test]
    fn test_load_malformed_record_gives_defaults() {
        let store = SettingsStore::load(Arc::new(repo_holding(Some("{not json"))));
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_load_read_failure_gives_defaults() {
        let mut repo = MockKeyValueRepository::new();
        repo.expect_get()
            .returning(|_| Err(AppError::Persistence("locked".to_string())));

        let store = SettingsStore::load(Arc::new(repo));
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_update_does_not_persist() {
        let mut repo = repo_holding(None);
        repo.expect_set().never();

        let mut store = SettingsStore::load(Arc::new(repo));
        store.update(SettingValue::Vsync(false));

        assert_eq!(store.get(crate::domain::SettingField::DisplayVsync), SettingValue::Vsync(false));
    }

    #[test]
    fn test_update_path_validates() {
        let mut store = SettingsStore::load(Arc::new(repo_holding(None)));

        assert_eq!(
            store.update_path("audio.volume", &json!(42)).unwrap(),
            SettingValue::Volume(42)
        );
        assert_eq!(store.settings().audio.volume, 42);

        assert!(store.update_path("audio.treble", &json!(1)).is_err());
        assert!(store.update_path("display.vsync", &json!(3)).is_err());
        assert_eq!(store.settings().audio.volume, 42);
    }

    #[test]
    fn test_save_writes_full_record() {
        let mut repo = repo_holding(None);
        repo.expect_set()
            .withf(|key, value| {
                key == SETTINGS_KEY && value.contains("\"volume\":5") && value.contains("\"input\"")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut store = SettingsStore::load(Arc::new(repo));
        store.update(SettingValue::Volume(5));
        store.save().unwrap();
    }

    #[test]
    fn test_save_failure_keeps_in_memory_change() {
        let mut repo = repo_holding(None);
        repo.expect_set()
            .returning(|_, _| Err(AppError::Persistence("disk full".to_string())));

        let mut store = SettingsStore::load(Arc::new(repo));
        store.update(SettingValue::Fullscreen(false));

        assert!(store.save().is_err());
        assert!(!store.settings().display.fullscreen);
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut repo = repo_holding(Some(r#"{"audio":{"volume":3}}"#));
        repo.expect_remove().never();

        let mut store = SettingsStore::load(Arc::new(repo));
        assert!(!store.reset(false).unwrap());
        assert_eq!(store.settings().audio.volume, 3);
    }

    #[test]
    fn test_confirmed_reset_clears_record() {
        let mut repo = MockKeyValueRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(r#"{"audio":{"volume":3}}"#.to_string())));
        repo.expect_remove()
            .withf(|key| key == SETTINGS_KEY)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut store = SettingsStore::load(Arc::new(repo));
        store.update(SettingValue::Vsync(false));

        assert!(store.reset(true).unwrap());
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_confirmed_reset_with_failed_removal_still_resets_memory() {
        let mut repo = repo_holding(Some(r#"{"audio":{"volume":3}}"#));
        repo.expect_remove()
            .times(1)
            .returning(|_| Err(AppError::Persistence("database is read-only".to_string())));

        let mut store = SettingsStore::load(Arc::new(repo));
        assert_eq!(store.settings().audio.volume, 3);

        let result = store.reset(true);
        assert!(matches!(result, Err(AppError::Persistence(_))));
        assert_eq!(store.settings(), &Settings::default());
    }
}
