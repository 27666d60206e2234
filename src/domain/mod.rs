//! Domain layer: verses, references and highlight colors
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod color;
pub mod entities;
pub mod error;
pub mod pattern;
pub mod reference;

pub use color::ResultColor;
pub use entities::*;
pub use error::DomainError;
pub use reference::{Reference, VerseRange};
