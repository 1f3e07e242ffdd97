//! MediCare Shell
//!
//! Command-line front end over the record repository.
//!
//! # Overview
//!
//! - **Commands**: `patients`, `doctors` and `appointments` with list, add,
//!   update and delete; `search`, `dashboard`, `theme` and `seed`
//! - **Store**: a [`mc_store::DirStore`] directory, `./medicare-data` unless
//!   `--data-dir` or the config file names another
//! - **Output**: aligned text tables, or JSON with `--json`
//! - **Logging**: `tracing` to stderr, filtered by `RUST_LOG`, `-v` or the
//!   config file
//!
//! Deletes and status changes require `--yes`.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use mc_cli::{command, OutputFormat, Shell};
//! use mc_core::{RepoConfig, Repository};
//! use mc_store::MemoryStore;
//!
//! let repo = Repository::open(MemoryStore::new(), RepoConfig::default());
//! let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
//! let mut shell = Shell::new(repo, Vec::new(), OutputFormat::Text, today);
//!
//! let matches = command().get_matches_from(["medicare", "seed"]);
//! shell.run(&matches).unwrap();
//! assert_eq!(shell.repository().collections().patients().len(), 5);
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;

// Re-exports
pub use cli::command;
pub use commands::Shell;
pub use config::{CliConfig, ConfigError, DEFAULT_DATA_DIR};
pub use render::OutputFormat;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
