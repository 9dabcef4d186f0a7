//! Work-hours tracking

pub mod service;

pub use service::HoursService;
