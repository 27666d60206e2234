//! Domain entities: pure data structures without I/O

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ResultColor;

/// A single verse as delivered by a verse provider.
///
/// Field names on the wire follow the bible.js data format
/// (`bookname`, `chapter`, `verse`, `text`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    #[serde(rename = "bookname")]
    pub book_name: String,
    pub chapter: u32,
    #[serde(rename = "verse")]
    pub verse_number: u32,
    pub text: String,
}

impl Verse {
    pub fn new(
        book_name: impl Into<String>,
        chapter: u32,
        verse_number: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            book_name: book_name.into(),
            chapter,
            verse_number,
            text: text.into(),
        }
    }

    /// Human readable locator, e.g. `John 3:16`.
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book_name, self.chapter, self.verse_number)
    }
}

impl fmt::Display for Verse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.reference(), self.text)
    }
}

/// Validated options of one invocation.
///
/// Built from the parsed command line once the result color has been checked;
/// `language` is guaranteed present and at least one of `reference`/`search` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOptions {
    pub language: String,
    pub reference: Option<String>,
    pub search: Option<String>,
    pub only_verses: bool,
    pub result_color: ResultColor,
}

/// What a single provider request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Fetch the verses a reference points at
    Lookup(String),
    /// Find verses whose text matches a pattern
    Search(String),
}

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Request::Lookup(_) => "lookup",
            Request::Search(_) => "search",
        }
    }

    pub fn argument(&self) -> &str {
        match self {
            Request::Lookup(s) | Request::Search(s) => s,
        }
    }
}

/// Expand environment variables and `~` in a path string.
///
/// Supports `$VAR`, `${VAR}` and `~`. Input that fails to expand is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Platform line terminator used in `--onlyVerses` output.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";
