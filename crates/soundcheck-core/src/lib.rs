//! # soundcheck-core
//!
//! Error types and result alias for the Soundcheck skill harness.
//! This crate defines the shared vocabulary used by every other crate in the workspace.

pub mod error;

pub use error::{Result, SoundcheckError};
