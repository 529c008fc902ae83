// src/integrations/mod.rs
//
// External integrations: the data source contract and its transports

pub mod data_source;
pub mod demo;
pub mod http;

pub use data_source::{
    ConnectionStatus, GameDataSource, LaunchRequest, LaunchResponse, LibraryCatalog, SystemStatus,
};
pub use demo::{demo_catalog, DemoDataSource, DEFAULT_DEMO_LATENCY, MAX_RECORDED_LAUNCHES};
pub use http::HttpDataSource;

#[cfg(test)]
pub use data_source::MockGameDataSource;
