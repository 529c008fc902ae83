use serde::{Deserialize, Serialize};

use super::system::System;

/// A game as reported by the data source.
/// Immutable once fetched; identified by (system, filename).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    pub filename: String,
    pub system: System,
    /// Human-readable size ("256KB"), when the backend knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl Game {
    pub fn new(name: impl Into<String>, filename: impl Into<String>, system: System) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            system,
            size: None,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Case-insensitive substring match on the game name.
    /// An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term.to_lowercase())
    }

    pub fn is_same(&self, system: System, filename: &str) -> bool {
        self.system == system && self.filename == filename
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_is_case_insensitive() {
        let game = Game::new("Super Mario Bros", "smb.nes", System::Nes);
        assert!(game.matches("mario"));
        assert!(game.matches("MARIO"));
        assert!(game.matches(""));
        assert!(!game.matches("zelda"));
    }

    #[test]
    fn test_size_is_optional_on_the_wire() {
        let game: Game =
            serde_json::from_str(r#"{"name":"Tetris","filename":"tetris.gb","system":"gameboy"}"#)
                .unwrap();
        assert_eq!(game.size, None);
        assert!(game.is_same(System::Gameboy, "tetris.gb"));

        let json = serde_json::to_string(&game.with_size("32KB")).unwrap();
        assert!(json.contains("\"size\":\"32KB\""));
    }
}
