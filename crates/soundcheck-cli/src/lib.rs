//! # soundcheck-cli
//!
//! Command-line interface for the Soundcheck skill harness.
//!
//! ## Commands
//!
//! - `soundcheck smoke` — Run reviewer/judge smoke tests over the skill library
//! - `soundcheck validate` — Lint SKILL.md documents (no model calls)
//! - `soundcheck list` — Show discovered skills and their test cases

pub mod commands;

pub use commands::Cli;
