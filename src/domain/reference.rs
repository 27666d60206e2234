//! Verse reference parsing: `<Book> <chapter>[:<verse>[-<verse>]]`

use std::fmt;
use std::str::FromStr;

use crate::domain::{DomainError, Verse};

/// Inclusive verse range inside a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseRange {
    pub start: u32,
    pub end: u32,
}

impl VerseRange {
    pub fn contains(&self, verse: u32) -> bool {
        (self.start..=self.end).contains(&verse)
    }
}

/// Parsed passage locator, e.g. `1 John 4:7-8` or `Psalms 23`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub book: String,
    pub chapter: u32,
    /// `None` selects the whole chapter
    pub verses: Option<VerseRange>,
}

impl Reference {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidReference {
            reference: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (book, locator) = trimmed
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| invalid("expected '<book> <chapter>[:<verse>]'"))?;
        let book = book.split_whitespace().collect::<Vec<_>>().join(" ");
        if book.is_empty() {
            return Err(invalid("missing book name"));
        }

        let (chapter, verses) = match locator.split_once(':') {
            Some((chapter, verses)) => (chapter, Some(verses)),
            None => (locator, None),
        };
        let chapter = parse_number(chapter).ok_or_else(|| invalid("bad chapter number"))?;

        let verses = match verses {
            None => None,
            Some(spec) => {
                let (start, end) = match spec.split_once('-') {
                    Some((start, end)) => (start, end),
                    None => (spec, spec),
                };
                let start = parse_number(start).ok_or_else(|| invalid("bad verse number"))?;
                let end = parse_number(end).ok_or_else(|| invalid("bad verse number"))?;
                if end < start {
                    return Err(invalid("verse range ends before it starts"));
                }
                Some(VerseRange { start, end })
            }
        };

        Ok(Self {
            book,
            chapter,
            verses,
        })
    }

    /// Whether `verse` falls inside this reference. Book names compare case-insensitively.
    pub fn matches(&self, verse: &Verse) -> bool {
        verse.book_name.eq_ignore_ascii_case(&self.book)
            && verse.chapter == self.chapter
            && self
                .verses
                .map_or(true, |range| range.contains(verse.verse_number))
    }
}

/// Positive integer (chapters and verses start at 1).
fn parse_number(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok().filter(|n| *n >= 1)
}

impl FromStr for Reference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)?;
        match self.verses {
            Some(r) if r.start == r.end => write!(f, ":{}", r.start),
            Some(r) => write!(f, ":{}-{}", r.start, r.end),
            None => Ok(()),
        }
    }
}
