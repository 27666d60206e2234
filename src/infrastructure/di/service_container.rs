//! Service container for dependency injection
//!
//! Wires the reader service to a verse library.

use std::sync::Arc;

use crate::application::services::ReaderService;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::infrastructure::traits::Library;

/// Container holding settings and the verse library.
pub struct ServiceContainer {
    /// Loaded configuration, passed through to the library
    pub settings: Arc<Settings>,

    /// Verse library abstraction
    pub library: Arc<dyn Library>,
}

impl ServiceContainer {
    /// Create a service container around `library`.
    pub fn with_deps(settings: Settings, library: Arc<dyn Library>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, library }
    }

    /// Initialize the library and return a reader scoped to `language`.
    pub fn reader(&self, language: &str) -> ApplicationResult<ReaderService> {
        let provider = self
            .library
            .init(&self.settings, language)
            .map_err(|e| ApplicationError::ProviderInit {
                language: language.to_string(),
                message: e.to_string(),
            })?;
        Ok(ReaderService::new(provider))
    }
}
