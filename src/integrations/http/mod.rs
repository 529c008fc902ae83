pub mod client;

pub use client::HttpDataSource;
