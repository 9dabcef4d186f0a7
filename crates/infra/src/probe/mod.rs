//! Environment probing

mod environment;

pub use environment::HostProbe;
