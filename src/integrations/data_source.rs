// src/integrations/data_source.rs
//
// Data source contract consumed by the library and the launch flow.
//
// Any transport satisfying these four operations is acceptable. The core
// treats the library response as a games collection keyed by system id,
// each value an ordered sequence of games.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{Game, System};
use crate::error::AppResult;

/// Full systems -> games mapping as returned by the backend
pub type LibraryCatalog = BTreeMap<System, Vec<Game>>;

/// Backend reachability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Last known backend reachability, as shown by the status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    #[default]
    Unknown,
    Online,
    Offline,
    /// The status request itself failed
    Error,
}

impl From<&SystemStatus> for ConnectionStatus {
    fn from(status: &SystemStatus) -> Self {
        if status.online {
            ConnectionStatus::Online
        } else {
            ConnectionStatus::Offline
        }
    }
}

/// Payload of a launch request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub system: System,
    /// The backend names the ROM file field `game`
    #[serde(rename = "game")]
    pub filename: String,
    pub save_slot: u8,
    pub cheats: bool,
}

impl LaunchRequest {
    pub fn new(game: &Game, save_slot: u8, cheats: bool) -> Self {
        Self {
            system: game.system,
            filename: game.filename.clone(),
            save_slot,
            cheats,
        }
    }
}

/// Launch outcome. A missing `success` field counts as failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaunchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LaunchResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            message: None,
        }
    }
}

/// Asynchronous request/response capability behind the library and launches
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameDataSource: Send + Sync {
    /// Every system's games
    async fn fetch_library(&self) -> AppResult<LibraryCatalog>;

    /// One system's games
    async fn fetch_games(&self, system: System) -> AppResult<Vec<Game>>;

    /// Online/offline status of the backend
    async fn fetch_status(&self) -> AppResult<SystemStatus>;

    /// Ask the backend to start a game
    async fn launch(&self, request: &LaunchRequest) -> AppResult<LaunchResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_request_wire_shape() {
        let game = Game::new("Contra", "contra.nes", System::Nes);
        let json = serde_json::to_value(LaunchRequest::new(&game, 2, true)).unwrap();

        assert_eq!(json["system"], "nes");
        assert_eq!(json["game"], "contra.nes");
        assert_eq!(json["saveSlot"], 2);
        assert_eq!(json["cheats"], true);
    }

    #[test]
    fn test_missing_success_counts_as_failure() {
        let response: LaunchResponse = serde_json::from_str(r#"{"message":"queued"}"#).unwrap();
        assert!(!response.success);

        let response: LaunchResponse =
            serde_json::from_str(r#"{"success":false,"error":"ROM not found"}"#).unwrap();
        assert_eq!(response.error.as_deref(), Some("ROM not found"));
    }

    #[test]
    fn test_catalog_keys_are_system_ids() {
        let catalog: LibraryCatalog = serde_json::from_str(
            r#"{"nes":[{"name":"Contra","filename":"contra.nes","system":"nes"}],"gba":[]}"#,
        )
        .unwrap();

        assert_eq!(catalog[&System::Nes].len(), 1);
        assert!(catalog[&System::Gba].is_empty());
        assert!(!catalog.contains_key(&System::Snes));
    }

    #[test]
    fn test_connection_status_from_status() {
        let online = SystemStatus { online: true, version: None };
        let offline = SystemStatus { online: false, version: Some("1.0".to_string()) };

        assert_eq!(ConnectionStatus::from(&online), ConnectionStatus::Online);
        assert_eq!(ConnectionStatus::from(&offline), ConnectionStatus::Offline);
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::Unknown);
    }
}
