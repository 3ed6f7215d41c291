//! Infrastructure layer for choreboard.
//!
//! File and network adapters behind the trait seams defined in
//! `choreboard-core`: the durable board cache, the HTTP gateway to the
//! remote store, and configuration loading.

pub mod config_loader;
pub mod http_gateway;
pub mod json_cache_repository;
pub mod paths;

pub use config_loader::load_config;
pub use http_gateway::HttpGateway;
pub use json_cache_repository::JsonCacheRepository;
pub use paths::ChoreboardPaths;
