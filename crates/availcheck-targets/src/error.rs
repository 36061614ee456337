//! Error types for target resolution.

use availcheck_core::CoreError;

/// Errors that can occur while resolving a compilation target.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// The triple does not have the `arch-vendor-os[-environment]` shape.
    #[error("malformed target triple '{triple}': {detail}")]
    MalformedTriple {
        /// The triple as given.
        triple: String,
        /// Description of what is wrong with it.
        detail: String,
    },

    /// The OS component names an OS with no availability platform.
    #[error("unsupported target OS '{os}': expected one of ios, macosx, macos, watchos, tvos")]
    UnsupportedOs {
        /// The OS name with its version suffix removed.
        os: String,
    },

    /// The version suffix of the OS component is not a valid version.
    #[error("invalid deployment version in target '{triple}': {source}")]
    Version {
        /// The triple as given.
        triple: String,
        #[source]
        source: CoreError,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
