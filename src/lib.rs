pub mod config;
pub mod display;
pub mod exporter;
pub mod fetch_error;
pub mod fetcher;
pub mod normalizer;
