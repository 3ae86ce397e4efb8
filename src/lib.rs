//! File follower agent: configuration ingestion and validation.

pub mod config;
pub mod observability;
pub mod tags;

pub use config::{load_config, ConfigError, FollowConfig};
