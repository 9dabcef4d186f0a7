//! # Hours Guard App
//!
//! Application layer - context wiring, failure hooks, commands and the CLI.
//!
//! This crate contains:
//! - Commands (CLI → services bridge)
//! - Application context (dependency injection)
//! - Process-wide failure hooks
//! - Logging setup
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Owns the single `ErrorHandler` for the process lifetime

pub mod cli;
pub mod commands;
pub mod context;
pub mod hooks;
pub mod utils;

pub use context::AppContext;
