//! Target triple parsing and platform context resolution for availcheck.
//!
//! A compilation selects exactly one platform. The [`PlatformContext`]
//! resolved from its target triple is fixed for the whole compilation unit and
//! shared read-only by every availability check.

pub mod context;
pub mod error;
pub mod triple;

pub use context::{default_deployment_target, PlatformContext};
pub use error::{Result, TargetError};
pub use triple::{supported_os_names, TargetTriple};
