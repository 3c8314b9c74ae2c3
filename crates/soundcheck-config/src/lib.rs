//! # soundcheck-config
//!
//! Configuration system for the Soundcheck harness. Reads from
//! `soundcheck.toml` and environment variables — config file takes
//! precedence, env fills the gaps.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::SoundcheckConfig;
pub use schema::{ConfigWarning, LoggingConfig, PathsConfig, ServicesConfig, SmokeConfig, WarningSeverity};
