//! Error types for the availability data model.

use crate::loc::SourceLoc;
use crate::platform::Platform;
use crate::version::VersionTuple;

/// Errors raised while building versions, attributes, and declarations.
///
/// None of these are fatal to a compilation: each is scoped to the single
/// version literal, attribute, or declaration that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A version literal that is empty, negative, non-numeric, or too long.
    #[error("malformed version '{text}': {reason}")]
    MalformedVersion { text: String, reason: String },

    /// An attribute clause list that does not follow the accepted grammar.
    #[error("invalid availability attribute: {detail}")]
    InvalidAvailabilitySyntax { loc: SourceLoc, detail: String },

    /// Versions in one attribute that are out of order.
    #[error("'{later_key}' version {later} precedes '{earlier_key}' version {earlier} for {platform}")]
    InvertedRange {
        loc: SourceLoc,
        platform: Platform,
        earlier_key: &'static str,
        earlier: VersionTuple,
        later_key: &'static str,
        later: VersionTuple,
    },

    /// A second attribute for a platform the declaration already covers.
    #[error("duplicate availability attribute for platform '{platform}'")]
    DuplicatePlatform { loc: SourceLoc, platform: Platform },
}

impl CoreError {
    /// Location the error should be reported at, if it has one.
    pub fn loc(&self) -> Option<SourceLoc> {
        match self {
            CoreError::MalformedVersion { .. } => None,
            CoreError::InvalidAvailabilitySyntax { loc, .. }
            | CoreError::InvertedRange { loc, .. }
            | CoreError::DuplicatePlatform { loc, .. } => Some(*loc),
        }
    }
}

/// Result type for core model operations.
pub type Result<T> = std::result::Result<T, CoreError>;
