//! Search pattern compilation

use regex::Regex;

/// Compile a user supplied search pattern.
///
/// The pattern is treated as a case-sensitive regular expression. Input that is not a
/// valid regex (e.g. `John 3:16 (KJV`) is matched literally instead.
pub fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(pattern).or_else(|_| Regex::new(&regex::escape(pattern)))
}
