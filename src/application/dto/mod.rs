// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are read-only snapshots for the rendering layer
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::{
    format_file_size, format_play_time, ActiveTab, Game, LaunchForm, LibraryDistribution,
    Notification, Settings, Stats, System, ViewState,
};
use crate::integrations::ConnectionStatus;

// ============================================================================
// LIBRARY DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    pub name: String,
    pub filename: String,
    pub system: System,
    /// Upper-case system badge ("NES")
    pub system_label: String,
    pub size: String,
}

impl From<&Game> for GameDto {
    fn from(game: &Game) -> Self {
        Self {
            name: game.name.clone(),
            filename: game.filename.clone(),
            system: game.system,
            system_label: game.system.id().to_uppercase(),
            size: display_size(game.size.as_deref()),
        }
    }
}

/// Backend sizes are either preformatted ("256KB") or raw byte counts
fn display_size(size: Option<&str>) -> String {
    match size {
        None => "Unknown".to_string(),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(bytes) => format_file_size(bytes),
            Err(_) => raw.to_string(),
        },
    }
}

/// One card of the system selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSummaryDto {
    pub system: System,
    pub name: String,
    pub game_count: usize,
}

// ============================================================================
// STATISTICS DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub total_games: u64,
    pub play_time: f64,
    pub play_time_label: String,
    pub favorite_games: u32,
    pub achievements: u32,
    /// Cumulative launches per system
    pub launches_per_system: Vec<(System, u64)>,
}

impl From<&Stats> for StatsDto {
    fn from(stats: &Stats) -> Self {
        Self {
            total_games: stats.total_games,
            play_time: stats.play_time,
            play_time_label: format_play_time(stats.play_time),
            favorite_games: stats.favorite_games,
            achievements: stats.achievements,
            launches_per_system: stats
                .system_distribution
                .iter()
                .map(|(system, count)| (*system, *count))
                .collect(),
        }
    }
}

// ============================================================================
// APPLICATION SNAPSHOT
// ============================================================================

/// Everything the rendering layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub view: ViewState,
    pub tab: ActiveTab,
    pub title: String,
    pub visible_games: Vec<GameDto>,
    pub selected_game: Option<GameDto>,
    pub launch_form: Option<LaunchForm>,
    pub systems: Vec<SystemSummaryDto>,
    pub settings: Settings,
    pub stats: StatsDto,
    /// Games currently indexed, not launches
    pub library: LibraryDistribution,
    pub notifications: Vec<Notification>,
    pub connection: ConnectionStatus,
}

/// Heading of the games tab for a given view
pub fn view_title(view: &ViewState, selected: Option<&Game>) -> String {
    match (view, selected) {
        (ViewState::GameDetail { .. }, Some(game)) => game.name.clone(),
        _ => match view.system() {
            Some(system) => system.list_title().to_string(),
            None => "Select a System".to_string(),
        },
    }
}
