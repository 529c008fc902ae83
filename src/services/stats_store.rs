// src/services/stats_store.rs
//
// Stats Store - cumulative play counters
//
// RULES:
// - Load never fails: missing or malformed records fall back to zeroed stats
// - Launch accounting is a single in-memory step, persisted right after
// - A failed write is logged and never blocks the launch flow
// - Library distribution is derived on demand and never stored

use std::sync::Arc;

use crate::domain::{Game, LibraryDistribution, Stats};
use crate::error::AppResult;
use crate::repositories::KeyValueRepository;
use crate::services::library_model::LibraryModel;

/// Storage key of the persisted stats record
pub const STATS_KEY: &str = "gamePlayerStats";

pub struct StatsStore {
    repo: Arc<dyn KeyValueRepository>,
    stats: Stats,
}

impl StatsStore {
    pub fn load(repo: Arc<dyn KeyValueRepository>) -> Self {
        let stats = read_persisted(repo.as_ref());
        Self { repo, stats }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Count one launch of `game` and persist (fire-and-forget)
    pub fn record_launch(&mut self, game: &Game) {
        self.stats.count_launch(game.system);
        log::debug!(
            "Recorded launch of {} ({}), total launches {}",
            game.name,
            game.system,
            self.stats.total_games
        );

        if let Err(e) = self.save() {
            log::error!("Failed to save stats: {}", e);
        }
    }

    /// Current library size per system. Reads the library, mutates nothing.
    pub fn derive(&self, library: &LibraryModel) -> LibraryDistribution {
        let per_system = library
            .systems()
            .filter_map(|system| {
                let count = library.count_for(system);
                (count > 0).then_some((system, count))
            })
            .collect::<std::collections::BTreeMap<_, _>>();

        LibraryDistribution {
            total_games: per_system.values().sum(),
            per_system,
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let json = serde_json::to_string(&self.stats)?;
        self.repo.set(STATS_KEY, &json)
    }

    /// Explicit reset: the only operation that lowers counters
    pub fn reset(&mut self) -> AppResult<()> {
        self.stats = Stats::default();
        self.repo.remove(STATS_KEY)?;
        log::info!("Stats reset");
        Ok(())
    }
}

fn read_persisted(repo: &dyn KeyValueRepository) -> Stats {
    let raw = match repo.get(STATS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Stats::default(),
        Err(e) => {
            log::info!("Using empty stats; cannot read {}: {}", STATS_KEY, e);
            return Stats::default();
        }
    };

    serde_json::from_str::<Stats>(&raw).unwrap_or_else(|e| {
        log::warn!("Using empty stats; stored record is malformed: {}", e);
        Stats::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::System;
    use crate::error::AppError;
    use crate::repositories::MockKeyValueRepository;

    fn accepting_repo(initial: Option<&'static str>) -> MockKeyValueRepository {
        let mut repo = MockKeyValueRepository::new();
        repo.expect_get()
            .returning(move |_| Ok(initial.map(str::to_string)));
        repo.expect_set().returning(|_, _| Ok(()));
        repo.expect_remove().returning(|_| Ok(()));
        repo
    }

    #[test]
    fn test_load_partial_record() {
        let store = StatsStore::load(Arc::new(accepting_repo(Some(
            r#"{"totalGames":7,"systemDistribution":{"nes":7}}"#,
        ))));

        assert_eq!(store.stats().total_games, 7);
        assert_eq!(store.stats().launches_for(System::Nes), 7);
        assert_eq!(store.stats().achievements, 0);
    }

    #[test]
    fn test_load_malformed_record_gives_defaults() {
        let store = StatsStore::load(Arc::new(accepting_repo(Some(r#"{"totalGames":"many"}"#))));
        assert_eq!(store.stats(), &Stats::default());
    }

    #[test]
    fn test_record_launch_is_monotonic_across_systems() {
        let mut store = StatsStore::load(Arc::new(accepting_repo(Some(
            r#"{"totalGames":10,"systemDistribution":{"snes":4}}"#,
        ))));
        let nes = Game::new("Contra", "contra.nes", System::Nes);
        let snes = Game::new("F-Zero", "fzero.smc", System::Snes);

        let before_total = store.stats().total_games;
        let before_snes = store.stats().launches_for(System::Snes);

        for i in 0..6 {
            if i % 2 == 0 {
                store.record_launch(&snes);
            } else {
                store.record_launch(&nes);
            }
        }

        assert_eq!(store.stats().total_games, before_total + 6);
        assert_eq!(store.stats().launches_for(System::Snes), before_snes + 3);
        assert_eq!(store.stats().launches_for(System::Nes), 3);
        assert!((store.stats().play_time - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_launch_persists_each_time() {
        let mut repo = MockKeyValueRepository::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_set()
            .withf(|key, value| key == STATS_KEY && value.contains("\"totalGames\""))
            .times(2)
            .returning(|_, _| Ok(()));

        let mut store = StatsStore::load(Arc::new(repo));
        let game = Game::new("Tetris", "tetris.gb", System::Gameboy);
        store.record_launch(&game);
        store.record_launch(&game);
    }

    #[test]
    fn test_record_launch_survives_write_failure() {
        let mut repo = MockKeyValueRepository::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_set()
            .returning(|_, _| Err(AppError::Persistence("read-only".to_string())));

        let mut store = StatsStore::load(Arc::new(repo));
        store.record_launch(&Game::new("Tetris", "tetris.gb", System::Gameboy));

        assert_eq!(store.stats().total_games, 1);
        assert_eq!(store.stats().launches_for(System::Gameboy), 1);
    }

    #[test]
    fn test_derive_counts_library_not_launches() {
        let mut store = StatsStore::load(Arc::new(accepting_repo(None)));
        let mut library = LibraryModel::new();
        library.replace(crate::integrations::demo_catalog());

        store.record_launch(&Game::new("NES Game 1", "game1.nes", System::Nes));

        let derived = store.derive(&library);
        assert_eq!(derived.total_games, 8);
        assert_eq!(derived.per_system.get(&System::Nes), Some(&5));
        assert_eq!(derived.per_system.get(&System::Snes), Some(&3));
        assert!(!derived.per_system.contains_key(&System::Genesis));

        // Deriving leaves launch counters alone
        assert_eq!(store.stats().total_games, 1);
        assert_eq!(store.stats().launches_for(System::Nes), 1);
    }

    #[test]
    fn test_reset_zeroes_counters() {
        let mut store = StatsStore::load(Arc::new(accepting_repo(Some(r#"{"totalGames":3}"#))));
        store.reset().unwrap();
        assert_eq!(store.stats(), &Stats::default());
    }
}
