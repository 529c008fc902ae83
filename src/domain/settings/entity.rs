use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::invariants::clamp_volume;
use crate::domain::DomainError;

/// User preferences. Every leaf has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub display: DisplaySettings,
    pub audio: AudioSettings,
    pub input: InputSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    pub fullscreen: bool,
    pub resolution: Resolution,
    pub vsync: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fullscreen: true,
            resolution: Resolution::default(),
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSettings {
    pub enabled: bool,
    /// 0..=100
    pub volume: u8,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSettings {
    pub gamepad_enabled: bool,
    pub auto_detect_gamepad: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            gamepad_enabled: true,
            auto_detect_gamepad: true,
        }
    }
}

/// Output resolutions offered by the display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Resolution {
    #[serde(rename = "1920x1080")]
    #[default]
    FullHd,
    #[serde(rename = "1280x720")]
    Hd,
    #[serde(rename = "1024x768")]
    Xga,
    #[serde(rename = "800x600")]
    Svga,
}

impl Resolution {
    pub const ALL: [Resolution; 4] = [
        Resolution::FullHd,
        Resolution::Hd,
        Resolution::Xga,
        Resolution::Svga,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::FullHd => "1920x1080",
            Resolution::Hd => "1280x720",
            Resolution::Xga => "1024x768",
            Resolution::Svga => "800x600",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| DomainError::InvalidValue(format!("Unsupported resolution: {}", s)))
    }
}

// ============================================================================
// PERSISTED PARTIAL FORM
// ============================================================================

/// Partial settings record as found in storage.
/// Any branch or leaf may be missing; missing leaves keep their defaults on merge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputPatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullscreen: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vsync: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    // Wider than the stored type so out-of-range values are clamped instead of rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamepad_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_detect_gamepad: Option<bool>,
}

impl Settings {
    /// Overlay `patch` onto `self`, leaf by leaf. The patch wins wherever it has a value.
    pub fn merged(&self, patch: &SettingsPatch) -> Settings {
        let mut out = self.clone();

        if let Some(display) = &patch.display {
            if let Some(v) = display.fullscreen {
                out.display.fullscreen = v;
            }
            if let Some(v) = display.resolution {
                out.display.resolution = v;
            }
            if let Some(v) = display.vsync {
                out.display.vsync = v;
            }
        }

        if let Some(audio) = &patch.audio {
            if let Some(v) = audio.enabled {
                out.audio.enabled = v;
            }
            if let Some(v) = audio.volume {
                out.audio.volume = clamp_volume(v);
            }
        }

        if let Some(input) = &patch.input {
            if let Some(v) = input.gamepad_enabled {
                out.input.gamepad_enabled = v;
            }
            if let Some(v) = input.auto_detect_gamepad {
                out.input.auto_detect_gamepad = v;
            }
        }

        out
    }
}

impl From<&Settings> for SettingsPatch {
    fn from(settings: &Settings) -> Self {
        Self {
            display: Some(DisplayPatch {
                fullscreen: Some(settings.display.fullscreen),
                resolution: Some(settings.display.resolution),
                vsync: Some(settings.display.vsync),
            }),
            audio: Some(AudioPatch {
                enabled: Some(settings.audio.enabled),
                volume: Some(i64::from(settings.audio.volume)),
            }),
            input: Some(InputPatch {
                gamepad_enabled: Some(settings.input.gamepad_enabled),
                auto_detect_gamepad: Some(settings.input.auto_detect_gamepad),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch_from(json: &str) -> SettingsPatch {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.display.fullscreen);
        assert_eq!(s.display.resolution, Resolution::FullHd);
        assert!(s.display.vsync);
        assert!(s.audio.enabled);
        assert_eq!(s.audio.volume, 80);
        assert!(s.input.gamepad_enabled);
        assert!(s.input.auto_detect_gamepad);
    }

    #[test]
    fn test_partial_branch_keeps_sibling_defaults() {
        let merged = Settings::default().merged(&patch_from(r#"{"audio":{"volume":35}}"#));

        assert_eq!(merged.audio.volume, 35);
        assert!(merged.audio.enabled);
        assert_eq!(merged.display, DisplaySettings::default());
        assert_eq!(merged.input, InputSettings::default());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let defaults = Settings::default();
        let patches = [
            "{}",
            r#"{"display":{"resolution":"800x600"}}"#,
            r#"{"audio":{"enabled":false,"volume":0},"input":{"gamepadEnabled":false}}"#,
            r#"{"display":{"fullscreen":false,"vsync":false},"input":{"autoDetectGamepad":false}}"#,
        ];

        for raw in patches {
            let once = defaults.merged(&patch_from(raw));
            let twice = defaults.merged(&SettingsPatch::from(&once));
            assert_eq!(once, twice, "patch {raw}");
        }
    }

    #[test]
    fn test_out_of_range_volume_is_clamped_on_merge() {
        let loud = Settings::default().merged(&patch_from(r#"{"audio":{"volume":250}}"#));
        assert_eq!(loud.audio.volume, 100);

        let negative = Settings::default().merged(&patch_from(r#"{"audio":{"volume":-4}}"#));
        assert_eq!(negative.audio.volume, 0);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let patch = patch_from(r#"{"display":{"vsync":false,"hdr":true},"network":{}}"#);
        let merged = Settings::default().merged(&patch);
        assert!(!merged.display.vsync);
    }

    #[test]
    fn test_persisted_shape_is_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["display"]["resolution"], "1920x1080");
        assert_eq!(json["input"]["autoDetectGamepad"], true);
        assert_eq!(json["input"]["gamepadEnabled"], true);
    }
}
