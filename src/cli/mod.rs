//! CLI layer: argument parsing, dispatch and output formatting

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod verse_box;

pub use args::Cli;
pub use error::{CliError, CliResult};
