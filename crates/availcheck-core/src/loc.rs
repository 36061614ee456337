//! Source locations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 1-based line/column position in the compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLoc {
    pub line: u32,
    pub column: u32,
}

impl SourceLoc {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position reached after reading `text` starting here.
    pub fn advanced_by(self, text: &str) -> Self {
        text.chars().fold(self, |loc, c| loc.advanced_past(c))
    }

    /// The position immediately after the character `c`.
    pub fn advanced_past(self, c: char) -> Self {
        if c == '\n' {
            Self::new(self.line + 1, 1)
        } else {
            Self::new(self.line, self.column + 1)
        }
    }
}

impl Default for SourceLoc {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
