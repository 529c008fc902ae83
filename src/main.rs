// src/main.rs
//
// Headless driver: one text command per stdin line, one JSON snapshot per
// stdout line. Logs go to stderr.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant};

use gameplayer::application::{AppState, Command, ErrorResponse, ViewController};
use gameplayer::config::AppConfig;
use gameplayer::db::{
    create_connection_pool, get_connection, initialize_database, verify_database_integrity,
};
use gameplayer::integrations::{DemoDataSource, GameDataSource, HttpDataSource};
use gameplayer::logger;
use gameplayer::repositories::{KeyValueRepository, SqliteKeyValueRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. CONFIGURATION
    let config = AppConfig::from_env();
    logger::init(config.log_level);

    // 2. INFRASTRUCTURE
    let db_path = config.resolve_database_path()?;
    let pool = Arc::new(
        create_connection_pool(&db_path)
            .with_context(|| format!("opening database {}", db_path.display()))?,
    );

    // Initialize schema (idempotent)
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
    }
    log::info!("Using database {}", db_path.display());

    // 3. REPOSITORIES
    let kv_repo: Arc<dyn KeyValueRepository> = Arc::new(SqliteKeyValueRepository::new(pool));

    // 4. DATA SOURCE
    let data_source: Arc<dyn GameDataSource> = if config.demo_mode {
        log::info!("Demo mode: serving the built-in catalog");
        Arc::new(DemoDataSource::new().with_latency(config.demo_latency))
    } else {
        log::info!("Backend at {}", config.api_base_url);
        Arc::new(HttpDataSource::new(config.api_base_url.clone())?)
    };

    // 5. APPLICATION STATE
    let mut state = AppState::new(kv_repo, data_source);
    state.controller.initialize().await;
    print_snapshot(&state.controller)?;

    // 6. COMMAND LOOP
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let deadline = state.controller.next_deadline();

        tokio::select! {
            read = lines.next_line() => {
                let line = match classify_input(read)? {
                    Input::Line(line) => line,
                    Input::Skip => continue,
                    Input::End => break,
                };
                if matches!(line.trim(), "quit" | "exit") {
                    break;
                }
                handle_line(&mut state.controller, &line).await;
                print_snapshot(&state.controller)?;
            }
            _ = wait_for(deadline) => {
                if state.controller.tick(Instant::now()) {
                    print_snapshot(&state.controller)?;
                }
            }
        }
    }

    log::info!("Session ended");
    Ok(())
}

enum Input {
    Line(String),
    Skip,
    End,
}

/// Undecodable lines are skipped; other read errors end the session
fn classify_input(read: std::io::Result<Option<String>>) -> std::io::Result<Input> {
    match read {
        Ok(Some(line)) => Ok(Input::Line(line)),
        Ok(None) => Ok(Input::End),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            log::warn!("Skipping unreadable input line: {}", e);
            Ok(Input::Skip)
        }
        Err(e) => Err(e),
    }
}

async fn handle_line(controller: &mut ViewController, line: &str) {
    match line.parse::<Command>() {
        Ok(command) => {
            // User-facing failures are already on the notification queue
            if let Err(e) = controller.dispatch(command).await {
                log::debug!("Command failed: {}", e);
            }
        }
        Err(e) => {
            let response = ErrorResponse::from_app_error(&e);
            let kind = response.notification_kind();
            controller.notify(response.message, kind);
        }
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

fn print_snapshot(controller: &ViewController) -> anyhow::Result<()> {
    let json = serde_json::to_string(&controller.snapshot())?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let read = Err(Error::new(ErrorKind::InvalidData, "stream did not contain valid UTF-8"));
        assert!(matches!(classify_input(read), Ok(Input::Skip)));
    }

    #[test]
    fn test_line_and_end_of_input() {
        assert!(matches!(
            classify_input(Ok(Some("select nes".to_string()))),
            Ok(Input::Line(line)) if line == "select nes"
        ));
        assert!(matches!(classify_input(Ok(None)), Ok(Input::End)));
    }

    #[test]
    fn test_other_read_errors_end_the_session() {
        let read = Err(Error::new(ErrorKind::BrokenPipe, "closed"));
        assert!(classify_input(read).is_err());
    }
}
