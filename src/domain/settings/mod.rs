pub mod entity;
pub mod field;
pub mod invariants;

pub use entity::{
    AudioPatch, AudioSettings, DisplayPatch, DisplaySettings, InputPatch, InputSettings,
    Resolution, Settings, SettingsPatch,
};
pub use field::{SettingField, SettingValue};
pub use invariants::{clamp_volume, MAX_VOLUME, MIN_VOLUME};
