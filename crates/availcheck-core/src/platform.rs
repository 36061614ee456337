//! Platforms an availability attribute can name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An operating system with its own versioning line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "iOS")]
    Ios,
    #[serde(rename = "macOS", alias = "OSX")]
    MacOs,
    #[serde(rename = "watchOS")]
    WatchOs,
    #[serde(rename = "tvOS")]
    TvOs,
}

impl Platform {
    /// Every supported platform.
    pub const ALL: [Platform; 4] = [
        Platform::Ios,
        Platform::MacOs,
        Platform::WatchOs,
        Platform::TvOs,
    ];

    /// Canonical spelling, used both in attributes and in diagnostic text.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::MacOs => "macOS",
            Platform::WatchOs => "watchOS",
            Platform::TvOs => "tvOS",
        }
    }

    /// Resolve the identifier written as the first clause of an attribute.
    pub fn from_identifier(ident: &str) -> Option<Self> {
        match ident {
            "OSX" => Some(Platform::MacOs),
            _ => Self::ALL.into_iter().find(|p| p.name() == ident),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
