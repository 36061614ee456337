//! Core data model for the availcheck platform-availability checker.
//!
//! Provides the leaf types every other crate builds on:
//! - **VersionTuple:** dotted versions that compare numerically but print as written
//! - **Platform:** the operating systems an availability attribute can name
//! - **AvailabilityAttribute:** one parsed `platform, introduced=.., ..` clause list
//! - **Declaration:** a named entity owning at most one attribute per platform

pub mod attr;
pub mod decl;
pub mod error;
pub mod loc;
pub mod platform;
pub mod version;

pub use attr::AvailabilityAttribute;
pub use decl::{DeclKind, Declaration};
pub use error::{CoreError, Result};
pub use loc::SourceLoc;
pub use platform::Platform;
pub use version::VersionTuple;
