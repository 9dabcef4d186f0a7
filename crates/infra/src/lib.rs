//! # Hours Guard Infrastructure
//!
//! Implementations of the ports defined in `hoursguard-core`.
//!
//! This crate contains:
//! - Key/value stores (JSON file, in-memory)
//! - Toast notifications with timed dismissal
//! - The message catalog
//! - File downloads into a directory
//! - Host environment probing
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `hoursguard-core`
//! - Contains all "impure" code (file system, sockets, environment)

pub mod config;
pub mod download;
pub mod errors;
pub mod i18n;
pub mod notify;
pub mod probe;
pub mod storage;

pub use download::DirectoryDownloader;
pub use errors::InfraError;
pub use i18n::Catalog;
pub use notify::{Toast, ToastNotifier, ToastPhase};
pub use probe::HostProbe;
pub use storage::{FileStore, MemoryStore, UnavailableStore};
