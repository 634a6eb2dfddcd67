//! Tooling Layer
//!
//! Command-line front end that consumes the record stream of an import.

pub mod cli;

pub use cli::{Cli, CliContext, OutputFormat};
