//! User notification adapters

mod toast;

pub use toast::{Toast, ToastNotifier, ToastPhase};
