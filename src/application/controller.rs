// src/application/controller.rs
//
// View Controller - the single state machine of the front end
//
// RULES:
// - Owns ViewState; holds games only by (system, filename) and reads them
//   from the LibraryModel
// - Every failure ends in a notification and a defined state, never a crash
// - Launch order is fixed: notify success, record stats, leave the detail
// - Operations take &mut self, so they run one at a time

use std::sync::Arc;
use tokio::time::Instant;

use crate::application::commands::Command;
use crate::application::dto::{view_title, AppSnapshot, GameDto, StatsDto, SystemSummaryDto};
use crate::application::error_handling::ErrorResponse;
use crate::domain::{
    ActiveTab, DomainError, Game, LaunchForm, NotificationId, NotificationKind, SettingValue,
    System, ViewState,
};
use crate::error::{AppError, AppResult};
use crate::events::{
    EventBus, GameLaunched, LaunchFailed, LibraryRefreshed, SettingsReset, SettingsSaved,
    ViewChanged,
};
use crate::integrations::{ConnectionStatus, GameDataSource, LaunchRequest};
use crate::services::{LibraryModel, NotificationQueue, SettingsStore, StatsStore};

pub struct ViewController {
    view: ViewState,
    tab: ActiveTab,
    connection: ConnectionStatus,
    library: LibraryModel,
    settings: SettingsStore,
    stats: StatsStore,
    notifications: NotificationQueue,
    data_source: Arc<dyn GameDataSource>,
    event_bus: Arc<EventBus>,
}

impl ViewController {
    pub fn new(
        settings: SettingsStore,
        stats: StatsStore,
        data_source: Arc<dyn GameDataSource>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            view: ViewState::default(),
            tab: ActiveTab::default(),
            connection: ConnectionStatus::default(),
            library: LibraryModel::new(),
            settings,
            stats,
            notifications: NotificationQueue::new(),
            data_source,
            event_bus,
        }
    }

    /// First library load and status check of the session
    pub async fn initialize(&mut self) {
        if let Err(e) = self.load_library().await {
            log::error!("Initial library load failed: {}", e);
            self.notifications.error("Failed to load library data");
        }
        self.check_status().await;
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    /// SystemSelector -> GameList(system, ""), then fetch that system's games
    pub async fn select_system(&mut self, system: System) -> AppResult<()> {
        let next = self.guard(self.view.select_system(system))?;
        self.transition(next);
        self.load_games(system).await
    }

    pub fn back(&mut self) -> AppResult<()> {
        let next = self.guard(self.view.back())?;
        self.transition(next);
        Ok(())
    }

    /// Narrow the list. The library is not refetched.
    pub fn search(&mut self, term: &str) -> AppResult<()> {
        let next = self.guard(self.view.search(term))?;
        self.transition(next);
        Ok(())
    }

    pub fn select_game(&mut self, filename: &str) -> AppResult<()> {
        let next = self.guard(self.view.select_game(filename))?;

        let system = next.system();
        if system.and_then(|s| self.library.find(s, filename)).is_none() {
            let error = AppError::Domain(DomainError::NotFound(format!(
                "No game {} in {}",
                filename,
                system.map(|s| s.id()).unwrap_or("library")
            )));
            self.report(&error);
            return Err(error);
        }

        self.transition(next);
        Ok(())
    }

    /// Close, Escape or backdrop click. The launch form is discarded.
    pub fn close(&mut self) -> AppResult<()> {
        let next = self.guard(self.view.close())?;
        self.transition(next);
        Ok(())
    }

    pub fn set_launch_form(&mut self, form: LaunchForm) -> AppResult<()> {
        let next = self.guard(self.view.with_form(form))?;
        self.view = next;
        Ok(())
    }

    pub fn switch_tab(&mut self, tab: ActiveTab) {
        if self.tab != tab {
            log::debug!("Tab {} -> {}", self.tab, tab);
            self.tab = tab;
        }
    }

    // ========================================================================
    // LAUNCH
    // ========================================================================

    /// Launch the open game. `save_slot` and `cheats` override the form.
    ///
    /// On success the detail closes; on failure it stays open.
    pub async fn launch(&mut self, save_slot: Option<u8>, cheats: Option<bool>) -> AppResult<()> {
        let Some(current) = self.view.launch_form() else {
            return self.guard(Err(DomainError::InvalidStateTransition(format!(
                "cannot launch from {}",
                self.view.name()
            ))));
        };

        let form = LaunchForm {
            save_slot: save_slot.unwrap_or(current.save_slot),
            cheats_enabled: cheats.unwrap_or(current.cheats_enabled),
        };
        self.view = self.view.with_form(form)?;

        let Some(game) = self.selected_game().cloned() else {
            let error = AppError::Domain(DomainError::NotFound(
                "The selected game is no longer in the library".to_string(),
            ));
            self.report(&error);
            return Err(error);
        };

        let request = LaunchRequest::new(&game, form.save_slot, form.cheats_enabled);
        log::info!(
            "Launching {} ({}) slot {} cheats {}",
            game.name,
            game.system,
            form.save_slot,
            form.cheats_enabled
        );

        let outcome = match self.data_source.launch(&request).await {
            Ok(response) if response.success => Ok(response),
            Ok(response) => Err(AppError::Launch(
                response
                    .error
                    .unwrap_or_else(|| "Failed to launch game".to_string()),
            )),
            Err(AppError::DataSource(message)) => Err(AppError::Launch(message)),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(_) => {
                self.notifications.success(format!("Launching {}", game.name));
                self.stats.record_launch(&game);
                self.event_bus.emit(GameLaunched::new(
                    game.system,
                    game.filename.clone(),
                    form.save_slot,
                    form.cheats_enabled,
                ));

                let next = self.view.close()?;
                self.transition(next);
                Ok(())
            }
            Err(e) => {
                self.report(&e);
                let reason = match &e {
                    AppError::Launch(reason) => reason.clone(),
                    other => other.to_string(),
                };
                self.event_bus
                    .emit(LaunchFailed::new(game.system, game.filename.clone(), reason));
                Err(e)
            }
        }
    }

    // ========================================================================
    // DATA
    // ========================================================================

    /// Reload everything. The view is left as it is.
    pub async fn refresh(&mut self) -> AppResult<()> {
        self.notifications.info("Refreshing data...");

        let mut result = self.load_library().await.map_err(|e| {
            self.notifications.error("Failed to load library data");
            e
        });

        if let Some(system) = self.view.system() {
            let games = self.load_games(system).await;
            result = result.and(games);
        }

        // The detail view stays open; a later launch reports the missing game
        if let Some(filename) = self.view.selected_filename() {
            if self.selected_game().is_none() {
                log::warn!("Open game {} is no longer in the library", filename);
            }
        }

        self.notifications.success("Data refresh complete");
        result
    }

    /// Ask the backend whether it is up. Failures only change the badge.
    pub async fn check_status(&mut self) -> ConnectionStatus {
        self.connection = match self.data_source.fetch_status().await {
            Ok(status) => ConnectionStatus::from(&status),
            Err(e) => {
                log::warn!("Status check failed: {}", e);
                ConnectionStatus::Error
            }
        };
        log::debug!("Connection status: {:?}", self.connection);
        self.connection
    }

    async fn load_library(&mut self) -> AppResult<()> {
        self.library.refresh(self.data_source.as_ref()).await?;
        self.event_bus.emit(LibraryRefreshed::new(
            self.library.total_games(),
            self.library.systems().count(),
        ));
        Ok(())
    }

    async fn load_games(&mut self, system: System) -> AppResult<()> {
        match self.library.games_for(system, self.data_source.as_ref()).await {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("Loading {} games failed: {}", system, e);
                self.notifications.error("Failed to load game list");
                Err(e)
            }
        }
    }

    // ========================================================================
    // SETTINGS AND STATS
    // ========================================================================

    /// Change one setting by dotted path or form control id. Not saved yet.
    pub fn update_setting(&mut self, path: &str, value: &serde_json::Value) -> AppResult<SettingValue> {
        self.settings.update_path(path, value).map_err(|e| {
            self.report(&e);
            e
        })
    }

    pub fn save_settings(&mut self) -> AppResult<()> {
        match self.settings.save() {
            Ok(()) => {
                self.notifications.success("Settings saved");
                self.event_bus.emit(SettingsSaved::new());
                Ok(())
            }
            Err(e) => {
                self.notifications.error("Failed to save settings");
                Err(e)
            }
        }
    }

    /// Back to defaults after the user confirmed. Returns whether anything happened.
    pub fn reset_settings(&mut self, confirmed: bool) -> AppResult<bool> {
        match self.settings.reset(confirmed) {
            Ok(false) => Ok(false),
            Ok(true) => {
                self.notifications.success("Settings reset");
                self.event_bus.emit(SettingsReset::new());
                Ok(true)
            }
            Err(e) => {
                self.notifications.error("Failed to reset settings");
                Err(e)
            }
        }
    }

    pub fn reset_stats(&mut self) -> AppResult<()> {
        self.stats.reset().map_err(|e| {
            self.notifications.error("Failed to reset statistics");
            e
        })?;
        self.notifications.success("Statistics reset");
        Ok(())
    }

    // ========================================================================
    // NOTIFICATIONS
    // ========================================================================

    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        self.notifications.enqueue(message, kind)
    }

    /// Advance notification lifecycles; true when the visible queue changed
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notifications.tick(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.notifications.next_deadline()
    }

    // ========================================================================
    // DISPATCH
    // ========================================================================

    pub async fn dispatch(&mut self, command: Command) -> AppResult<()> {
        log::debug!("Dispatching {}", command.name());

        match command {
            Command::SelectSystem { system } => self.select_system(system).await,
            Command::Back => self.back(),
            Command::Search { term } => self.search(&term),
            Command::OpenGame { filename } => self.select_game(&filename),
            Command::Close => self.close(),
            Command::SetLaunchForm { save_slot, cheats } => self.set_launch_form(LaunchForm {
                save_slot,
                cheats_enabled: cheats,
            }),
            Command::Launch { save_slot, cheats } => self.launch(save_slot, cheats).await,
            Command::Refresh => self.refresh().await,
            Command::CheckStatus => {
                self.check_status().await;
                Ok(())
            }
            Command::SwitchTab { tab } => {
                self.switch_tab(tab);
                Ok(())
            }
            Command::UpdateSetting { path, value } => self.update_setting(&path, &value).map(|_| ()),
            Command::SaveSettings => self.save_settings(),
            Command::ResetSettings { confirmed } => self.reset_settings(confirmed).map(|_| ()),
            Command::ResetStats => self.reset_stats(),
            Command::Show => Ok(()),
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn tab(&self) -> ActiveTab {
        self.tab
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn library(&self) -> &LibraryModel {
        &self.library
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Games of the current system matching the current search term
    pub fn visible_games(&self) -> Vec<&Game> {
        match self.view.system() {
            Some(system) => LibraryModel::filter(self.library.games(system), self.view.search_term()),
            None => Vec::new(),
        }
    }

    pub fn selected_game(&self) -> Option<&Game> {
        let system = self.view.system()?;
        let filename = self.view.selected_filename()?;
        self.library.find(system, filename)
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let selected = self.selected_game();

        AppSnapshot {
            view: self.view.clone(),
            tab: self.tab,
            title: view_title(&self.view, selected),
            visible_games: self.visible_games().into_iter().map(GameDto::from).collect(),
            selected_game: selected.map(GameDto::from),
            launch_form: self.view.launch_form(),
            systems: System::ALL
                .iter()
                .map(|system| SystemSummaryDto {
                    system: *system,
                    name: system.display_name().to_string(),
                    game_count: self.library.count_for(*system),
                })
                .collect(),
            settings: self.settings.settings().clone(),
            stats: StatsDto::from(self.stats.stats()),
            library: self.stats.derive(&self.library),
            notifications: self.notifications.entries().to_vec(),
            connection: self.connection,
        }
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    /// Reject undefined transitions: logged, state untouched
    fn guard<T>(&self, result: Result<T, DomainError>) -> AppResult<T> {
        result.map_err(|e| {
            log::warn!("{}", e);
            AppError::Domain(e)
        })
    }

    fn transition(&mut self, next: ViewState) {
        let from = self.view.name();
        let to = next.name();
        log::debug!("View {} -> {}", from, to);

        let system = next.system();
        self.view = next;

        if from != to {
            self.event_bus.emit(ViewChanged::new(from, to, system));
        }
    }

    /// Surface an error as a notification
    fn report(&mut self, error: &AppError) {
        let response = ErrorResponse::from_app_error(error);
        self.notifications
            .enqueue(response.message.clone(), response.notification_kind());
    }
}
