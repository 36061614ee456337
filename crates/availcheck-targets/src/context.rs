//! The platform and deployment target of one compilation.

use std::fmt;

use availcheck_core::{Platform, VersionTuple};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::triple::TargetTriple;

/// Deployment target assumed when a triple names a platform without a version.
pub fn default_deployment_target(platform: Platform) -> VersionTuple {
    match platform {
        Platform::Ios => VersionTuple::with_minor(7, 0),
        Platform::MacOs => VersionTuple::with_minor(10, 9),
        Platform::WatchOs => VersionTuple::with_minor(2, 0),
        Platform::TvOs => VersionTuple::with_minor(9, 0),
    }
}

/// Active platform and minimum deployment version for a compilation unit.
///
/// Immutable once resolved; `Copy` so every checker can hold its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformContext {
    platform: Platform,
    deployment_target: VersionTuple,
}

impl PlatformContext {
    pub fn new(platform: Platform, deployment_target: VersionTuple) -> Self {
        Self {
            platform,
            deployment_target,
        }
    }

    /// Resolve from a parsed triple, falling back to the platform default
    /// when the triple carries no version.
    pub fn from_triple(triple: &TargetTriple) -> Result<Self> {
        let platform = triple.platform()?;
        let deployment_target = triple
            .os_version
            .unwrap_or_else(|| default_deployment_target(platform));
        debug!(
            triple = %triple,
            platform = %platform,
            deployment_target = %deployment_target,
            "resolved platform context"
        );
        Ok(Self::new(platform, deployment_target))
    }

    /// Parse `triple` and resolve it in one step.
    pub fn resolve(triple: &str) -> Result<Self> {
        Self::from_triple(&TargetTriple::parse(triple)?)
    }

    pub fn current_platform(&self) -> Platform {
        self.platform
    }

    pub fn minimum_deployment_version(&self) -> VersionTuple {
        self.deployment_target
    }
}

impl fmt::Display for PlatformContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.platform, self.deployment_target)
    }
}
