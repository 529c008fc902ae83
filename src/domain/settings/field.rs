use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::entity::{Resolution, Settings};
use super::invariants::clamp_volume;
use crate::domain::{DomainError, DomainResult};

/// Every leaf of [`Settings`] that the UI may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingField {
    DisplayFullscreen,
    DisplayResolution,
    DisplayVsync,
    AudioEnabled,
    AudioVolume,
    InputGamepadEnabled,
    InputAutoDetectGamepad,
}

impl SettingField {
    pub const ALL: [SettingField; 7] = [
        SettingField::DisplayFullscreen,
        SettingField::DisplayResolution,
        SettingField::DisplayVsync,
        SettingField::AudioEnabled,
        SettingField::AudioVolume,
        SettingField::InputGamepadEnabled,
        SettingField::InputAutoDetectGamepad,
    ];

    /// Dotted path of the leaf inside the persisted record
    pub fn path(&self) -> &'static str {
        match self {
            SettingField::DisplayFullscreen => "display.fullscreen",
            SettingField::DisplayResolution => "display.resolution",
            SettingField::DisplayVsync => "display.vsync",
            SettingField::AudioEnabled => "audio.enabled",
            SettingField::AudioVolume => "audio.volume",
            SettingField::InputGamepadEnabled => "input.gamepadEnabled",
            SettingField::InputAutoDetectGamepad => "input.autoDetectGamepad",
        }
    }

    /// Flat id of the settings-form control bound to this leaf
    pub fn control_id(&self) -> &'static str {
        match self {
            SettingField::DisplayFullscreen => "fullscreen",
            SettingField::DisplayResolution => "resolution",
            SettingField::DisplayVsync => "vsync",
            SettingField::AudioEnabled => "audioEnabled",
            SettingField::AudioVolume => "volume",
            SettingField::InputGamepadEnabled => "gamepadEnabled",
            SettingField::InputAutoDetectGamepad => "autoDetectGamepad",
        }
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for SettingField {
    type Err = DomainError;

    /// Accepts either the dotted path or the form control id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        SettingField::ALL
            .iter()
            .copied()
            .find(|field| field.path() == key || field.control_id() == key)
            .ok_or_else(|| DomainError::InvalidValue(format!("Unknown setting: {}", s)))
    }
}

/// A typed value for exactly one settings leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    Fullscreen(bool),
    Resolution(Resolution),
    Vsync(bool),
    AudioEnabled(bool),
    Volume(u8),
    GamepadEnabled(bool),
    AutoDetectGamepad(bool),
}

impl SettingValue {
    pub fn field(&self) -> SettingField {
        match self {
            SettingValue::Fullscreen(_) => SettingField::DisplayFullscreen,
            SettingValue::Resolution(_) => SettingField::DisplayResolution,
            SettingValue::Vsync(_) => SettingField::DisplayVsync,
            SettingValue::AudioEnabled(_) => SettingField::AudioEnabled,
            SettingValue::Volume(_) => SettingField::AudioVolume,
            SettingValue::GamepadEnabled(_) => SettingField::InputGamepadEnabled,
            SettingValue::AutoDetectGamepad(_) => SettingField::InputAutoDetectGamepad,
        }
    }

    /// Build a typed value for `field` from loosely typed input.
    ///
    /// Booleans accept JSON booleans; the resolution accepts one of the supported
    /// strings; the volume accepts an integer (or integer string) and is clamped to 0..=100.
    pub fn from_json(field: SettingField, value: &serde_json::Value) -> DomainResult<Self> {
        let expect_bool = || {
            value.as_bool().ok_or_else(|| {
                DomainError::InvalidValue(format!("{} expects true or false, got {}", field, value))
            })
        };

        Ok(match field {
            SettingField::DisplayFullscreen => SettingValue::Fullscreen(expect_bool()?),
            SettingField::DisplayVsync => SettingValue::Vsync(expect_bool()?),
            SettingField::AudioEnabled => SettingValue::AudioEnabled(expect_bool()?),
            SettingField::InputGamepadEnabled => SettingValue::GamepadEnabled(expect_bool()?),
            SettingField::InputAutoDetectGamepad => {
                SettingValue::AutoDetectGamepad(expect_bool()?)
            }
            SettingField::DisplayResolution => {
                let raw = value.as_str().ok_or_else(|| {
                    DomainError::InvalidValue(format!("{} expects a string, got {}", field, value))
                })?;
                SettingValue::Resolution(raw.parse()?)
            }
            SettingField::AudioVolume => {
                let volume = value
                    .as_i64()
                    .or_else(|| value.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
                    .ok_or_else(|| {
                        DomainError::InvalidValue(format!(
                            "{} expects an integer, got {}",
                            field, value
                        ))
                    })?;
                SettingValue::Volume(clamp_volume(volume))
            }
        })
    }
}

impl Settings {
    /// Read one leaf
    pub fn get(&self, field: SettingField) -> SettingValue {
        match field {
            SettingField::DisplayFullscreen => SettingValue::Fullscreen(self.display.fullscreen),
            SettingField::DisplayResolution => SettingValue::Resolution(self.display.resolution),
            SettingField::DisplayVsync => SettingValue::Vsync(self.display.vsync),
            SettingField::AudioEnabled => SettingValue::AudioEnabled(self.audio.enabled),
            SettingField::AudioVolume => SettingValue::Volume(self.audio.volume),
            SettingField::InputGamepadEnabled => {
                SettingValue::GamepadEnabled(self.input.gamepad_enabled)
            }
            SettingField::InputAutoDetectGamepad => {
                SettingValue::AutoDetectGamepad(self.input.auto_detect_gamepad)
            }
        }
    }

    /// Write one leaf; siblings are untouched
    pub fn apply(&mut self, value: SettingValue) {
        match value {
            SettingValue::Fullscreen(v) => self.display.fullscreen = v,
            SettingValue::Resolution(v) => self.display.resolution = v,
            SettingValue::Vsync(v) => self.display.vsync = v,
            SettingValue::AudioEnabled(v) => self.audio.enabled = v,
            SettingValue::Volume(v) => self.audio.volume = clamp_volume(i64::from(v)),
            SettingValue::GamepadEnabled(v) => self.input.gamepad_enabled = v,
            SettingValue::AutoDetectGamepad(v) => self.input.auto_detect_gamepad = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flipped(value: SettingValue) -> SettingValue {
        match value {
            SettingValue::Fullscreen(v) => SettingValue::Fullscreen(!v),
            SettingValue::Resolution(_) => SettingValue::Resolution(Resolution::Svga),
            SettingValue::Vsync(v) => SettingValue::Vsync(!v),
            SettingValue::AudioEnabled(v) => SettingValue::AudioEnabled(!v),
            SettingValue::Volume(_) => SettingValue::Volume(13),
            SettingValue::GamepadEnabled(v) => SettingValue::GamepadEnabled(!v),
            SettingValue::AutoDetectGamepad(v) => SettingValue::AutoDetectGamepad(!v),
        }
    }

    #[test]
    fn test_apply_then_get_leaves_siblings_untouched() {
        for field in SettingField::ALL {
            let original = Settings::default();
            let mut updated = original.clone();
            let value = flipped(original.get(field));

            updated.apply(value);

            assert_eq!(updated.get(field), value, "field {field}");
            for other in SettingField::ALL.iter().filter(|f| **f != field) {
                assert_eq!(updated.get(*other), original.get(*other), "sibling {other} of {field}");
            }
        }
    }

    #[test]
    fn test_field_parses_paths_and_control_ids() {
        assert_eq!("audio.volume".parse::<SettingField>().unwrap(), SettingField::AudioVolume);
        assert_eq!("volume".parse::<SettingField>().unwrap(), SettingField::AudioVolume);
        assert_eq!(
            "fullscreen".parse::<SettingField>().unwrap(),
            SettingField::DisplayFullscreen
        );
        assert_eq!(
            "input.autoDetectGamepad".parse::<SettingField>().unwrap(),
            SettingField::InputAutoDetectGamepad
        );
        assert!("audio.bass".parse::<SettingField>().is_err());
        assert!("".parse::<SettingField>().is_err());
    }

    #[test]
    fn test_value_from_json_validates_types() {
        assert_eq!(
            SettingValue::from_json(SettingField::DisplayVsync, &json!(false)).unwrap(),
            SettingValue::Vsync(false)
        );
        assert!(SettingValue::from_json(SettingField::DisplayVsync, &json!("no")).is_err());
        assert_eq!(
            SettingValue::from_json(SettingField::DisplayResolution, &json!("1280x720")).unwrap(),
            SettingValue::Resolution(Resolution::Hd)
        );
        assert!(SettingValue::from_json(SettingField::DisplayResolution, &json!("4k")).is_err());
    }

    #[test]
    fn test_volume_is_clamped() {
        let parse = |v| SettingValue::from_json(SettingField::AudioVolume, &v).unwrap();
        assert_eq!(parse(json!(55)), SettingValue::Volume(55));
        assert_eq!(parse(json!("70")), SettingValue::Volume(70));
        assert_eq!(parse(json!(180)), SettingValue::Volume(100));
        assert_eq!(parse(json!(-1)), SettingValue::Volume(0));
        assert!(SettingValue::from_json(SettingField::AudioVolume, &json!(4.5)).is_err());

        let mut settings = Settings::default();
        settings.apply(SettingValue::Volume(200));
        assert_eq!(settings.audio.volume, 100);
    }
}
