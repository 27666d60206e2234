//! Application services

pub mod reader;

pub use reader::{Completion, ReaderService};
