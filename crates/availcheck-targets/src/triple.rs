//! Parsing of `arch-vendor-os[-environment]` target triples.
//!
//! Only the OS component matters for availability: its alphabetic prefix
//! names the platform and the remainder, if any, is the minimum deployment
//! version (`i386-apple-watchos3.0` targets watchOS 3.0).

use std::fmt;
use std::str::FromStr;

use availcheck_core::{Platform, VersionTuple};

use crate::error::{Result, TargetError};

/// A parsed target triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTriple {
    pub arch: String,
    pub vendor: String,
    /// OS name without its version suffix (e.g. `watchos`).
    pub os: String,
    pub os_version: Option<VersionTuple>,
    pub environment: Option<String>,
}

/// OS spellings accepted in triples, with the platform each selects.
pub fn supported_os_names() -> Vec<(&'static str, Platform)> {
    vec![
        ("ios", Platform::Ios),
        ("macosx", Platform::MacOs),
        ("macos", Platform::MacOs),
        ("watchos", Platform::WatchOs),
        ("tvos", Platform::TvOs),
    ]
}

impl TargetTriple {
    pub fn parse(triple: &str) -> Result<Self> {
        let malformed = |detail: &str| TargetError::MalformedTriple {
            triple: triple.to_string(),
            detail: detail.to_string(),
        };

        let parts: Vec<&str> = triple.split('-').collect();
        if parts.len() < 3 {
            return Err(malformed("expected at least arch-vendor-os"));
        }
        if parts.len() > 4 {
            return Err(malformed("too many components"));
        }
        if parts.iter().any(|p| p.is_empty()) {
            return Err(malformed("empty component"));
        }

        let os_component = parts[2];
        let split = os_component
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(os_component.len());
        let (os, version) = os_component.split_at(split);
        if os.is_empty() {
            return Err(malformed("OS component has no name"));
        }

        let os_version = if version.is_empty() {
            None
        } else {
            Some(
                VersionTuple::parse(version).map_err(|source| TargetError::Version {
                    triple: triple.to_string(),
                    source,
                })?,
            )
        };

        Ok(Self {
            arch: parts[0].to_string(),
            vendor: parts[1].to_string(),
            os: os.to_string(),
            os_version,
            environment: parts.get(3).map(|e| e.to_string()),
        })
    }

    /// The availability platform selected by the OS component.
    pub fn platform(&self) -> Result<Platform> {
        supported_os_names()
            .into_iter()
            .find(|(name, _)| *name == self.os)
            .map(|(_, platform)| platform)
            .ok_or_else(|| TargetError::UnsupportedOs {
                os: self.os.clone(),
            })
    }
}

impl FromStr for TargetTriple {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.arch, self.vendor, self.os)?;
        if let Some(version) = self.os_version {
            write!(f, "{version}")?;
        }
        if let Some(env) = &self.environment {
            write!(f, "-{env}")?;
        }
        Ok(())
    }
}
