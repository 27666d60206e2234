//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed user input.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(
        "Invalid result color. Please provide a string in this format: 'r, g, b'. Example: --resultColor '255, 0, 0'"
    )]
    InvalidColor(String),

    #[error("invalid reference: {reference} ({reason})")]
    InvalidReference { reference: String, reason: String },
}
