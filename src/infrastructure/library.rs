//! Local JSON verse library
//!
//! Configuration schema (bible.js compatible):
//!
//! ```json
//! {
//!   "versions": {
//!     "en": { "source": "~/bible/kjv.json", "language": "en", "version": "kjv" }
//!   }
//! }
//! ```
//!
//! `source` points at a JSON array of `{"bookname", "chapter", "verse", "text"}` objects.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::config::Settings;
use crate::domain::{expand_env_vars, pattern, Reference, Verse};
use crate::infrastructure::traits::{Library, ProviderResult, VerseProvider};
use crate::infrastructure::InfraError;

/// Provider section of the configuration file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LibraryConfig {
    pub versions: BTreeMap<String, VersionConfig>,
}

/// One installed Bible version.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VersionConfig {
    /// Path to the verse data file (`~` and `$VAR` are expanded)
    pub source: String,
    /// Language code; the version key is used when absent
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl LibraryConfig {
    /// Version serving `language`: matched by key first, then by `language` field.
    pub fn version_for(&self, language: &str) -> Option<(&str, &VersionConfig)> {
        self.versions
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(language))
            .or_else(|| {
                self.versions.iter().find(|(_, v)| {
                    v.language
                        .as_deref()
                        .is_some_and(|l| l.eq_ignore_ascii_case(language))
                })
            })
            .map(|(key, v)| (key.as_str(), v))
    }
}

/// Library backed by local JSON verse files.
#[derive(Debug, Default)]
pub struct JsonLibrary;

impl Library for JsonLibrary {
    #[instrument(skip(self, settings))]
    fn init(
        &self,
        settings: &Settings,
        language: &str,
    ) -> ProviderResult<Arc<dyn VerseProvider>> {
        let config: LibraryConfig = settings.deserialize()?;
        if config.versions.is_empty() {
            return Err(InfraError::Application(ApplicationError::Config {
                message: "no Bible versions configured (missing 'versions')".into(),
            }));
        }

        let (key, version) = config
            .version_for(language)
            .ok_or_else(|| InfraError::LanguageNotConfigured(language.to_string()))?;
        let source = PathBuf::from(expand_env_vars(&version.source));
        debug!("init: language={language} version={key} source={}", source.display());

        Ok(Arc::new(JsonProvider::new(source)))
    }
}

/// Provider reading one JSON verse file, loaded on first use.
#[derive(Debug)]
pub struct JsonProvider {
    source: PathBuf,
    verses: OnceLock<Result<Vec<Verse>, String>>,
}

impl JsonProvider {
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            verses: OnceLock::new(),
        }
    }

    fn verses(&self) -> ProviderResult<&[Verse]> {
        self.verses
            .get_or_init(|| self.load())
            .as_deref()
            .map_err(|message| InfraError::Data {
                source_name: self.source.display().to_string(),
                message: message.clone(),
            })
    }

    fn load(&self) -> Result<Vec<Verse>, String> {
        let content = std::fs::read_to_string(&self.source).map_err(|e| format!("read: {e}"))?;
        let verses: Vec<Verse> =
            serde_json::from_str(&content).map_err(|e| format!("parse: {e}"))?;
        debug!("load: {} verses from {}", verses.len(), self.source.display());
        Ok(verses)
    }
}

impl VerseProvider for JsonProvider {
    fn get(&self, reference: &str) -> ProviderResult<Vec<Verse>> {
        let reference = Reference::parse(reference).map_err(ApplicationError::from)?;
        Ok(self
            .verses()?
            .iter()
            .filter(|v| reference.matches(v))
            .cloned()
            .collect())
    }

    fn search(&self, pattern: &str) -> ProviderResult<Vec<Verse>> {
        let re = pattern::compile(pattern).map_err(|e| ApplicationError::OperationFailed {
            context: format!("compile pattern {pattern}"),
            source: Box::new(e),
        })?;
        Ok(self
            .verses()?
            .iter()
            .filter(|v| re.is_match(&v.text))
            .cloned()
            .collect())
    }
}
