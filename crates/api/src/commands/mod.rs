//! Commands - CLI to services bridge

mod diagnostics;
mod tracking;

pub use diagnostics::*;
pub use tracking::*;
