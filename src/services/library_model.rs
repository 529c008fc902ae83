// src/services/library_model.rs
//
// Library Model - the system -> games index
//
// RULES:
// - Owns every Game; everyone else refers to games by (system, filename)
// - Fetch first, then swap: a failed request leaves the index untouched
// - Filtering is a query, never a mutation

use crate::domain::{Game, System};
use crate::error::AppResult;
use crate::integrations::{GameDataSource, LibraryCatalog};

#[derive(Debug, Default)]
pub struct LibraryModel {
    catalog: LibraryCatalog,
}

impl LibraryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-fetch the whole library and swap it in
    pub async fn refresh(&mut self, source: &dyn GameDataSource) -> AppResult<()> {
        let catalog = source.fetch_library().await?;
        self.replace(catalog);
        log::info!(
            "Library refreshed: {} games across {} systems",
            self.total_games(),
            self.catalog.len()
        );
        Ok(())
    }

    /// Re-fetch one system's games, replacing only that entry
    pub async fn games_for(
        &mut self,
        system: System,
        source: &dyn GameDataSource,
    ) -> AppResult<&[Game]> {
        let games = source.fetch_games(system).await?;
        log::debug!("Fetched {} games for {}", games.len(), system);

        let slot = self.catalog.entry(system).or_default();
        *slot = games;
        Ok(slot.as_slice())
    }

    /// Swap in a complete catalog
    pub fn replace(&mut self, catalog: LibraryCatalog) {
        self.catalog = catalog;
    }

    pub fn games(&self, system: System) -> &[Game] {
        self.catalog.get(&system).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn count_for(&self, system: System) -> usize {
        self.games(system).len()
    }

    pub fn total_games(&self) -> usize {
        self.catalog.values().map(Vec::len).sum()
    }

    /// Systems with an entry in the index, in [`System::ALL`] order
    pub fn systems(&self) -> impl Iterator<Item = System> + '_ {
        self.catalog.keys().copied()
    }

    pub fn find(&self, system: System, filename: &str) -> Option<&Game> {
        self.games(system).iter().find(|g| g.is_same(system, filename))
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Games whose name contains `term`, case-insensitively. Empty term keeps everything.
    pub fn filter<'a>(games: &'a [Game], term: &str) -> Vec<&'a Game> {
        games.iter().filter(|g| g.matches(term)).collect()
    }
}
