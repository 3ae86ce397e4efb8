//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, at most 2 MiB)
//!     → loader.rs (bounded read & deserialize)
//!     → validation.rs (semantic checks, tag defaulting, path cleaning)
//!     → FollowConfig (validated, immutable)
//!     → shared read-only with the file watchers and transport dialers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - Missing keys take empty defaults, unknown keys are rejected
//! - Validation separates syntactic (serde) from semantic checks
//! - Every failure is terminal for the load attempt; nothing is retried

pub mod duration;
pub mod error;
pub mod follow;
pub mod loader;
pub mod path;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use follow::FollowConfig;
pub use loader::{load_config, load_config_str, MAX_CONFIG_SIZE};
pub use schema::{FollowerConfig, GlobalConfig, RawConfig};
