//! Configuration sources layered on top of the defaults.

pub mod environment;
pub mod file;
