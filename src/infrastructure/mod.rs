//! Infrastructure layer: verse provider implementations and DI container
//!
//! This layer implements the provider boundary traits and wires up services.

pub mod di;
pub mod error;
pub mod library;
pub mod traits;

pub use error::InfraError;
