use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{DomainError, DomainResult, System};

/// Save slot preselected when a game detail opens
pub const DEFAULT_SAVE_SLOT: u8 = 1;

/// Ephemeral launch options of the detail screen. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchForm {
    pub save_slot: u8,
    pub cheats_enabled: bool,
}

impl Default for LaunchForm {
    fn default() -> Self {
        Self {
            save_slot: DEFAULT_SAVE_SLOT,
            cheats_enabled: false,
        }
    }
}

/// Which screen of the games tab is showing. Exactly one is active.
///
/// The detail state refers to its game by filename; the game itself stays
/// owned by the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ViewState {
    SystemSelector,
    GameList {
        system: System,
        search_term: String,
    },
    GameDetail {
        system: System,
        search_term: String,
        filename: String,
        form: LaunchForm,
    },
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::SystemSelector
    }
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::SystemSelector => "SystemSelector",
            ViewState::GameList { .. } => "GameList",
            ViewState::GameDetail { .. } => "GameDetail",
        }
    }

    /// System currently being browsed, if any
    pub fn system(&self) -> Option<System> {
        match self {
            ViewState::SystemSelector => None,
            ViewState::GameList { system, .. } | ViewState::GameDetail { system, .. } => {
                Some(*system)
            }
        }
    }

    pub fn search_term(&self) -> &str {
        match self {
            ViewState::SystemSelector => "",
            ViewState::GameList { search_term, .. }
            | ViewState::GameDetail { search_term, .. } => search_term,
        }
    }

    pub fn selected_filename(&self) -> Option<&str> {
        match self {
            ViewState::GameDetail { filename, .. } => Some(filename),
            _ => None,
        }
    }

    pub fn launch_form(&self) -> Option<LaunchForm> {
        match self {
            ViewState::GameDetail { form, .. } => Some(*form),
            _ => None,
        }
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// SystemSelector --select(system)--> GameList(system, "")
    pub fn select_system(&self, system: System) -> DomainResult<ViewState> {
        match self {
            ViewState::SystemSelector => Ok(ViewState::GameList {
                system,
                search_term: String::new(),
            }),
            other => Err(invalid("select a system", other)),
        }
    }

    /// GameList --back--> SystemSelector (search term is dropped)
    pub fn back(&self) -> DomainResult<ViewState> {
        match self {
            ViewState::GameList { .. } => Ok(ViewState::SystemSelector),
            other => Err(invalid("go back", other)),
        }
    }

    /// GameList --search(term)--> GameList(system, term)
    pub fn search(&self, term: &str) -> DomainResult<ViewState> {
        match self {
            ViewState::GameList { system, .. } => Ok(ViewState::GameList {
                system: *system,
                search_term: term.to_string(),
            }),
            other => Err(invalid("search", other)),
        }
    }

    /// GameList --selectGame(game)--> GameDetail(system, term, game)
    pub fn select_game(&self, filename: &str) -> DomainResult<ViewState> {
        match self {
            ViewState::GameList {
                system,
                search_term,
            } => Ok(ViewState::GameDetail {
                system: *system,
                search_term: search_term.clone(),
                filename: filename.to_string(),
                form: LaunchForm::default(),
            }),
            other => Err(invalid("open a game", other)),
        }
    }

    /// GameDetail --close--> GameList(system, term); the launch form is discarded
    pub fn close(&self) -> DomainResult<ViewState> {
        match self {
            ViewState::GameDetail {
                system,
                search_term,
                ..
            } => Ok(ViewState::GameList {
                system: *system,
                search_term: search_term.clone(),
            }),
            other => Err(invalid("close the game detail", other)),
        }
    }

    /// Replace the ephemeral launch options of the open detail
    pub fn with_form(&self, new_form: LaunchForm) -> DomainResult<ViewState> {
        match self {
            ViewState::GameDetail {
                system,
                search_term,
                filename,
                ..
            } => Ok(ViewState::GameDetail {
                system: *system,
                search_term: search_term.clone(),
                filename: filename.clone(),
                form: new_form,
            }),
            other => Err(invalid("edit launch options", other)),
        }
    }
}

fn invalid(action: &str, state: &ViewState) -> DomainError {
    DomainError::InvalidStateTransition(format!("cannot {} from {}", action, state.name()))
}

/// Top-level navigation tab. Orthogonal to [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActiveTab {
    #[default]
    Games,
    Settings,
    Stats,
}

impl fmt::Display for ActiveTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveTab::Games => write!(f, "games"),
            ActiveTab::Settings => write!(f, "settings"),
            ActiveTab::Stats => write!(f, "stats"),
        }
    }
}

impl FromStr for ActiveTab {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "games" => Ok(ActiveTab::Games),
            "settings" => Ok(ActiveTab::Settings),
            "stats" => Ok(ActiveTab::Stats),
            other => Err(DomainError::InvalidValue(format!("Unknown tab: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_navigation_round_trip() {
        let start = ViewState::default();
        assert_eq!(start, ViewState::SystemSelector);

        let list = start.select_system(System::Nes).unwrap();
        assert_eq!(
            list,
            ViewState::GameList {
                system: System::Nes,
                search_term: String::new()
            }
        );

        let filtered = list.search("mario").unwrap();
        let detail = filtered.select_game("smb.nes").unwrap();
        assert_eq!(detail.system(), Some(System::Nes));
        assert_eq!(detail.search_term(), "mario");
        assert_eq!(detail.selected_filename(), Some("smb.nes"));
        assert_eq!(detail.launch_form(), Some(LaunchForm::default()));

        let closed = detail.close().unwrap();
        assert_eq!(closed, filtered);

        assert_eq!(closed.back().unwrap(), ViewState::SystemSelector);
    }

    #[test]
    fn test_close_discards_launch_form() {
        let detail = ViewState::SystemSelector
            .select_system(System::Snes)
            .unwrap()
            .select_game("zelda.smc")
            .unwrap()
            .with_form(LaunchForm {
                save_slot: 3,
                cheats_enabled: true,
            })
            .unwrap();

        let reopened = detail.close().unwrap().select_game("zelda.smc").unwrap();
        assert_eq!(reopened.launch_form(), Some(LaunchForm::default()));
    }

    #[test]
    fn test_undefined_transitions_are_rejected() {
        let selector = ViewState::SystemSelector;
        assert!(selector.back().is_err());
        assert!(selector.search("x").is_err());
        assert!(selector.close().is_err());
        assert!(selector.select_game("a.nes").is_err());

        let list = selector.select_system(System::Gba).unwrap();
        assert!(list.select_system(System::Nes).is_err());
        assert!(list.close().is_err());
        assert!(list.with_form(LaunchForm::default()).is_err());

        let detail = list.select_game("a.gba").unwrap();
        assert!(detail.back().is_err());
        assert!(detail.search("y").is_err());
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("Stats".parse::<ActiveTab>().unwrap(), ActiveTab::Stats);
        assert_eq!(ActiveTab::default(), ActiveTab::Games);
        assert!("library".parse::<ActiveTab>().is_err());
    }
}
