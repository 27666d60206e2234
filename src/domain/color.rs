//! Highlight color parsing (`--resultColor r,g,b`)

use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// Foreground RGB color used to highlight search matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ResultColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse an `r, g, b` string.
    ///
    /// Exactly three comma separated integer components are required; whitespace around
    /// components is ignored. Components outside 0..=255 are clamped.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidColor(input.to_string());

        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }

        let mut channels = [0u8; 3];
        for (channel, part) in channels.iter_mut().zip(&parts) {
            let value: i64 = part.parse().map_err(|_| invalid())?;
            *channel = value.clamp(0, 255) as u8;
        }

        Ok(Self::new(channels[0], channels[1], channels[2]))
    }
}

impl Default for ResultColor {
    fn default() -> Self {
        Self::new(255, 0, 0)
    }
}

impl FromStr for ResultColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResultColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}
