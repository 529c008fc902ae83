// src/integrations/demo.rs
//
// In-memory data source.
//
// Serves a fixed catalog after a simulated network delay. Used for offline
// demo runs and as the fake backend in tests; failure modes are opt-in.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::domain::{Game, System};
use crate::error::{AppError, AppResult};
use crate::integrations::data_source::{
    GameDataSource, LaunchRequest, LaunchResponse, LibraryCatalog, SystemStatus,
};

/// Delay applied to every request unless overridden
pub const DEFAULT_DEMO_LATENCY: Duration = Duration::from_millis(500);

/// Launch requests kept for inspection
pub const MAX_RECORDED_LAUNCHES: usize = 100;

pub struct DemoDataSource {
    catalog: LibraryCatalog,
    latency: Duration,
    online: bool,
    unreachable: bool,
    launch_error: Option<String>,
    launches: Mutex<VecDeque<LaunchRequest>>,
}

impl DemoDataSource {
    /// Demo catalog: five NES games, three SNES games, every other system empty
    pub fn new() -> Self {
        Self::with_catalog(demo_catalog())
    }

    pub fn with_catalog(catalog: LibraryCatalog) -> Self {
        Self {
            catalog,
            latency: DEFAULT_DEMO_LATENCY,
            online: true,
            unreachable: false,
            launch_error: None,
            launches: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Status reports offline; other requests still succeed
    pub fn offline(mut self) -> Self {
        self.online = false;
        self
    }

    /// Every request fails as if the backend could not be reached
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Launches are answered with `success: false` and this error
    pub fn with_launch_error(mut self, error: impl Into<String>) -> Self {
        self.launch_error = Some(error.into());
        self
    }

    /// Most recent launch requests, oldest first
    pub fn launches(&self) -> Vec<LaunchRequest> {
        self.launches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    async fn round_trip(&self, route: &str) -> AppResult<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.unreachable {
            return Err(AppError::DataSource(format!("{}: connection refused", route)));
        }
        Ok(())
    }
}

impl Default for DemoDataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameDataSource for DemoDataSource {
    async fn fetch_library(&self) -> AppResult<LibraryCatalog> {
        self.round_trip("/api/systems").await?;
        Ok(self.catalog.clone())
    }

    async fn fetch_games(&self, system: System) -> AppResult<Vec<Game>> {
        self.round_trip("/api/games").await?;
        Ok(self.catalog.get(&system).cloned().unwrap_or_default())
    }

    async fn fetch_status(&self) -> AppResult<SystemStatus> {
        self.round_trip("/api/status").await?;
        Ok(SystemStatus {
            online: self.online,
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        })
    }

    async fn launch(&self, request: &LaunchRequest) -> AppResult<LaunchResponse> {
        self.round_trip("/api/launch").await?;

        {
            let mut launches = self.launches.lock().unwrap_or_else(PoisonError::into_inner);
            launches.push_back(request.clone());
            if launches.len() > MAX_RECORDED_LAUNCHES {
                launches.pop_front();
            }
        }

        Ok(match &self.launch_error {
            Some(error) => LaunchResponse::failed(error.clone()),
            None => LaunchResponse {
                message: Some(format!("Game {} started", request.filename)),
                ..LaunchResponse::ok()
            },
        })
    }
}

/// The fixed catalog served by [`DemoDataSource::new`]
pub fn demo_catalog() -> LibraryCatalog {
    let nes = (1..=5)
        .map(|i| {
            Game::new(format!("NES Game {}", i), format!("game{}.nes", i), System::Nes)
                .with_size("256KB")
        })
        .collect();
    let snes = (1..=3)
        .map(|i| {
            Game::new(format!("SNES Game {}", i), format!("game{}.smc", i), System::Snes)
                .with_size("512KB")
        })
        .collect();

    let mut catalog = LibraryCatalog::new();
    catalog.insert(System::Nes, nes);
    catalog.insert(System::Snes, snes);
    catalog.insert(System::Gameboy, Vec::new());
    catalog.insert(System::Gba, Vec::new());
    catalog.insert(System::Genesis, Vec::new());
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_catalog_shape() {
        let source = DemoDataSource::new().with_latency(Duration::ZERO);
        let catalog = source.fetch_library().await.unwrap();

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog[&System::Nes].len(), 5);
        assert_eq!(catalog[&System::Snes].len(), 3);
        assert!(catalog[&System::Genesis].is_empty());
        assert_eq!(catalog[&System::Nes][0].filename, "game1.nes");
    }

    #[tokio::test]
    async fn test_fetch_games_for_unknown_entry_is_empty() {
        let source = DemoDataSource::with_catalog(LibraryCatalog::new()).with_latency(Duration::ZERO);
        assert!(source.fetch_games(System::Gba).await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let source = DemoDataSource::new();
        let started = tokio::time::Instant::now();

        source.fetch_status().await.unwrap();

        assert!(started.elapsed() >= DEFAULT_DEMO_LATENCY);
    }

    #[tokio::test]
    async fn test_failure_modes() {
        let source = DemoDataSource::new().with_latency(Duration::ZERO).unreachable();
        assert!(matches!(
            source.fetch_library().await,
            Err(AppError::DataSource(_))
        ));

        let source = DemoDataSource::new()
            .with_latency(Duration::ZERO)
            .offline()
            .with_launch_error("emulator missing");
        assert!(!source.fetch_status().await.unwrap().online);

        let game = Game::new("NES Game 1", "game1.nes", System::Nes);
        let response = source.launch(&LaunchRequest::new(&game, 1, false)).await.unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("emulator missing"));
        assert_eq!(source.launches().len(), 1);
    }

    #[tokio::test]
    async fn test_launch_history_is_bounded() {
        let source = DemoDataSource::new().with_latency(Duration::ZERO);
        let game = Game::new("NES Game 1", "game1.nes", System::Nes);

        for slot in 0..=MAX_RECORDED_LAUNCHES {
            let slot = (slot % 9 + 1) as u8;
            source.launch(&LaunchRequest::new(&game, slot, false)).await.unwrap();
        }

        let launches = source.launches();
        assert_eq!(launches.len(), MAX_RECORDED_LAUNCHES);
        assert_eq!(launches[0].save_slot, 2);
    }
}
