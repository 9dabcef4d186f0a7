//! Configuration loading
//!
//! Resolves [`hoursguard_domain::Config`] from `HOURSGUARD_*` environment
//! variables or a JSON/TOML file next to the working directory or binary.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
