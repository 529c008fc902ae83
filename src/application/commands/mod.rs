// src/application/commands/mod.rs
//
// Typed user commands
//
// ARCHITECTURE:
// - Every user action becomes one Command value
// - Commands carry input only; the ViewController decides what they mean
// - The text form is parsed in `parser` and used by the headless driver

use serde::{Deserialize, Serialize};

use crate::domain::{ActiveTab, System};

pub mod parser;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    // Navigation
    SelectSystem { system: System },
    Back,
    Search { term: String },
    OpenGame { filename: String },
    /// Close button, Escape and backdrop click all map here
    Close,

    // Launch
    SetLaunchForm { save_slot: u8, cheats: bool },
    /// Options given here override the open form before launching
    Launch {
        save_slot: Option<u8>,
        cheats: Option<bool>,
    },

    // Data
    Refresh,
    CheckStatus,

    // Tabs and settings
    SwitchTab { tab: ActiveTab },
    UpdateSetting {
        path: String,
        value: serde_json::Value,
    },
    SaveSettings,
    ResetSettings { confirmed: bool },
    ResetStats,

    /// Render the current snapshot without changing anything
    Show,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SelectSystem { .. } => "select",
            Command::Back => "back",
            Command::Search { .. } => "search",
            Command::OpenGame { .. } => "open",
            Command::Close => "close",
            Command::SetLaunchForm { .. } => "form",
            Command::Launch { .. } => "launch",
            Command::Refresh => "refresh",
            Command::CheckStatus => "status",
            Command::SwitchTab { .. } => "tab",
            Command::UpdateSetting { .. } => "set",
            Command::SaveSettings => "save",
            Command::ResetSettings { .. } => "reset",
            Command::ResetStats => "reset-stats",
            Command::Show => "show",
        }
    }
}
