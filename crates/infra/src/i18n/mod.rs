//! Localization

mod catalog;

pub use catalog::{Catalog, FALLBACK_LOCALE};
