//! Verse provider boundary traits
//!
//! These traits abstract the verse-data library, allowing the driver
//! to be tested with stub implementations.

use std::sync::Arc;

use crate::config::Settings;
use crate::domain::Verse;
use crate::infrastructure::InfraError;

/// Result type of provider operations.
pub type ProviderResult<T> = Result<T, InfraError>;

/// Language-scoped source of verses.
///
/// Implementations are shared between concurrently running requests.
pub trait VerseProvider: Send + Sync {
    /// Verses a reference (e.g. `John 3:16`) points at, in provider order.
    fn get(&self, reference: &str) -> ProviderResult<Vec<Verse>>;

    /// Verses whose text matches `pattern`, in provider order.
    fn search(&self, pattern: &str) -> ProviderResult<Vec<Verse>>;
}

/// Initializer of a verse library.
pub trait Library: Send + Sync {
    /// Validate `settings` and open a provider for `language`.
    ///
    /// Errors are fatal to the invocation.
    fn init(&self, settings: &Settings, language: &str)
        -> ProviderResult<Arc<dyn VerseProvider>>;
}
