//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use regex::{Captures, Regex};
use tracing::warn;

use crate::application::ApplicationResult;
use crate::cli::verse_box::VerseBox;
use crate::domain::{pattern, InvocationOptions, ResultColor, Verse, LINE_ENDING};

/// Line printed around decorated output.
pub const SEPARATOR: &str = "----------------";

/// Notice printed for an empty result.
pub const NOT_FOUND: &str = "Verses not found";

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Echo lines printed before any request is issued.
///
/// Empty when `only_verses` is set.
pub fn preamble(options: &InvocationOptions) -> String {
    if options.only_verses {
        return String::new();
    }
    let mut out = String::new();
    if let Some(reference) = &options.reference {
        out.push_str(&format!("You are reading {reference}\n"));
    }
    if let Some(search) = &options.search {
        out.push_str(&format!("You are searching {search}\n"));
    }
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}

/// Wraps every match of a search pattern in a foreground RGB color.
#[derive(Debug, Clone)]
pub struct Highlighter {
    regex: Regex,
    color: ResultColor,
}

impl Highlighter {
    pub fn new(pattern: &str, color: ResultColor) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: pattern::compile(pattern)?,
            color,
        })
    }

    /// Color each matched substring; the rest of `text` is left untouched.
    pub fn apply(&self, text: &str) -> String {
        let ResultColor { r, g, b } = self.color;
        self.regex
            .replace_all(text, |caps: &Captures| caps[0].truecolor(r, g, b).to_string())
            .into_owned()
    }
}

/// Formats the result of one request into a single printable block.
pub struct OutputFormatter<'a> {
    options: &'a InvocationOptions,
    highlighter: Option<Highlighter>,
}

impl<'a> OutputFormatter<'a> {
    pub fn new(options: &'a InvocationOptions) -> Self {
        let highlighter = options.search.as_deref().and_then(|search| {
            Highlighter::new(search, options.result_color)
                .map_err(|e| warn!("highlighting disabled for '{search}': {e}"))
                .ok()
        });
        Self {
            options,
            highlighter,
        }
    }

    /// Render an error-or-verses result.
    ///
    /// Errors yield one diagnostic line. An empty list yields the not-found notice.
    /// Verses keep provider order; the separator precedes them unless `only_verses`.
    pub fn render(&self, result: &ApplicationResult<Vec<Verse>>) -> String {
        let verses = match result {
            Ok(verses) => verses,
            Err(e) => return format!("Error: {e}\n"),
        };

        let mut out = String::new();
        if verses.is_empty() {
            out.push_str(NOT_FOUND);
            out.push('\n');
        }

        let mut buffer = String::new();
        for verse in verses {
            let text = self.highlight(&verse.text);
            if self.options.only_verses {
                buffer.push_str(&text);
                buffer.push_str(LINE_ENDING);
            } else {
                buffer.push_str(&VerseBox::new(verse.reference(), text).to_string());
            }
        }

        if !self.options.only_verses {
            out.push_str(SEPARATOR);
            out.push('\n');
        }
        out.push_str(&buffer);
        out
    }

    fn highlight(&self, text: &str) -> String {
        match &self.highlighter {
            Some(h) => h.apply(text),
            None => text.to_string(),
        }
    }
}
