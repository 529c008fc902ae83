use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// A supported game-hardware platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum System {
    Nes,
    Snes,
    Gameboy,
    Gba,
    Genesis,
}

impl System {
    /// Every supported system, in selector order
    pub const ALL: [System; 5] = [
        System::Nes,
        System::Snes,
        System::Gameboy,
        System::Gba,
        System::Genesis,
    ];

    /// Identifier used on the wire and in persisted stats
    pub fn id(&self) -> &'static str {
        match self {
            System::Nes => "nes",
            System::Snes => "snes",
            System::Gameboy => "gameboy",
            System::Gba => "gba",
            System::Genesis => "genesis",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            System::Nes => "Nintendo Entertainment System",
            System::Snes => "Super Nintendo",
            System::Gameboy => "Game Boy",
            System::Gba => "Game Boy Advance",
            System::Genesis => "Sega Genesis",
        }
    }

    /// Title shown above the game list of this system
    pub fn list_title(&self) -> &'static str {
        match self {
            System::Nes => "NES Games",
            System::Snes => "SNES Games",
            System::Gameboy => "Game Boy Games",
            System::Gba => "GBA Games",
            System::Genesis => "Genesis Games",
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for System {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        System::ALL
            .iter()
            .copied()
            .find(|system| system.id() == normalized)
            .ok_or_else(|| DomainError::InvalidValue(format!("Unknown system: {}", s)))
    }
}
