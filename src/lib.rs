//! Read the Holy Bible from the command line.
//!
//! Layers, inner to outer: `domain` (verses, references, colors), `application`
//! (reader service), `infrastructure` (verse libraries, wiring), `cli` (arguments,
//! driver, output).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
