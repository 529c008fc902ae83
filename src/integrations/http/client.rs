// src/integrations/http/client.rs
//
// HTTP transport for the launcher backend
//
// ARCHITECTURE:
// - Thin JSON client over the backend's /api routes
// - Maps wire payloads -> domain types (NO state mutation)
// - Every transport or decoding failure becomes AppError::DataSource
//
// Routes:
//   GET  /api/systems          -> { games: { <system>: [Game] } }
//   GET  /api/games/{system}   -> { games: [Game] }
//   GET  /api/status           -> { online, version? }
//   POST /api/launch           -> { success, error?, message? }

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::{Game, System};
use crate::error::{AppError, AppResult};
use crate::integrations::data_source::{
    GameDataSource, LaunchRequest, LaunchResponse, LibraryCatalog, SystemStatus,
};

#[derive(Debug, Deserialize)]
struct SystemsResponse {
    #[serde(default)]
    games: LibraryCatalog,
}

#[derive(Debug, Deserialize)]
struct GamesResponse {
    #[serde(default)]
    games: Vec<Game>,
}

pub struct HttpDataSource {
    client: Client,
    base_url: String,
}

impl HttpDataSource {
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("gameplayer/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::DataSource(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::DataSource(format!("GET {} failed: {}", path, e)))?
            .error_for_status()
            .map_err(|e| AppError::DataSource(format!("GET {} returned {}", path, e)))?;

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::DataSource(format!("Malformed response from {}: {}", path, e)))
    }
}

#[async_trait]
impl GameDataSource for HttpDataSource {
    async fn fetch_library(&self) -> AppResult<LibraryCatalog> {
        let body: SystemsResponse = self.get_json("/api/systems").await?;
        Ok(body.games)
    }

    async fn fetch_games(&self, system: System) -> AppResult<Vec<Game>> {
        let body: GamesResponse = self.get_json(&format!("/api/games/{}", system.id())).await?;
        Ok(body.games)
    }

    async fn fetch_status(&self) -> AppResult<SystemStatus> {
        self.get_json("/api/status").await
    }

    async fn launch(&self, request: &LaunchRequest) -> AppResult<LaunchResponse> {
        let url = self.url("/api/launch");
        log::debug!("POST {} ({}/{})", url, request.system, request.filename);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::DataSource(format!("POST /api/launch failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::DataSource(format!("POST /api/launch failed: {}", e)))?;

        // Failed launches come back as 500 with a regular JSON body
        match serde_json::from_str::<LaunchResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(AppError::DataSource(format!(
                "POST /api/launch returned {}",
                describe(status)
            ))),
            Err(e) => Err(AppError::DataSource(format!(
                "Malformed response from /api/launch: {}",
                e
            ))),
        }
    }
}

fn describe(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
