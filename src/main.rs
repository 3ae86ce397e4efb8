//! File follower agent startup.
//!
//! Brings up logging, loads and validates the configuration, narrows logging
//! to the configured level and reports what the file watchers and transport dialers
//! will be handed.
//!
//! ```text
//! init_logging (RUST_LOG or info)
//!     → load_config(config file) → FollowConfig
//!     → apply_level(Log-Level)
//!     → targets()   → transport dialers
//!     → tags()      → tag registry
//!     → followers() → file watchers
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde_json::json;

use file_follower::config::{load_config, FollowConfig};
use file_follower::observability::{init_logging, LogLevel};

#[derive(Parser)]
#[command(name = "file-follower")]
#[command(about = "Watch directories and ship matching files to ingest backends", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "/opt/gravwell/etc/file_follow.conf")]
    config: PathBuf,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,

    /// Print the validated configuration as JSON and exit
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let logging = init_logging()?;

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {}", cli.config.display(), e);
            process::exit(1);
        }
    };

    if cli.check {
        println!("configuration OK");
        return Ok(());
    }
    if cli.dump {
        println!("{}", serde_json::to_string_pretty(&dump(&config)?)?);
        return Ok(());
    }

    let level: LogLevel = config.log_level().parse()?;
    logging.apply_level(level)?;

    tracing::info!(config = %cli.config.display(), "file-follower starting");
    report(&config)?;

    Ok(())
}

fn dump(config: &FollowConfig) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let mut raw = config.to_raw();
    raw.global.ingest_secret = "<redacted>".to_string();

    Ok(json!({
        "config": raw,
        "targets": config.targets()?,
        "tags": config.tags()?,
        "timeout_secs": config.timeout().as_secs_f64(),
        "cache_enabled": config.cache_enabled(),
    }))
}

fn report(config: &FollowConfig) -> Result<(), Box<dyn std::error::Error>> {
    let targets = config.targets()?;
    let tags = config.tags()?;

    tracing::info!(
        targets = ?targets,
        verify_remote = config.verify_remote(),
        timeout = ?config.timeout(),
        "Backend targets configured"
    );
    tracing::info!(tags = ?tags, "Tags registered");
    tracing::info!(
        state_path = %config.state_path(),
        cache_enabled = config.cache_enabled(),
        cache_path = %config.cache_path(),
        "Local storage"
    );

    for (name, follower) in config.followers() {
        tracing::info!(
            follower = %name,
            base_directory = %follower.base_directory,
            file_filter = %follower.file_filter,
            tag = %follower.tag_name,
            ignore_timestamps = follower.ignore_timestamps,
            assume_local_timezone = follower.assume_local_timezone,
            "Follower configured"
        );
    }
    Ok(())
}
