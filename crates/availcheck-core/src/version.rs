//! Dotted version tuples as written in availability attributes.
//!
//! A `VersionTuple` compares as if missing components were zero, so `2`,
//! `2.0` and `2.0.0` are all equal, but it remembers how many components the
//! source spelled out. Diagnostics print `watchOS 2` when the attribute said
//! `obsoleted=2`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Maximum number of dotted components (`major.minor.subminor`).
pub const MAX_COMPONENTS: usize = 3;

/// An immutable `major[.minor[.subminor]]` version.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionTuple {
    major: u32,
    minor: Option<u32>,
    subminor: Option<u32>,
}

impl VersionTuple {
    /// A one-component version, e.g. `2`.
    pub const fn new(major: u32) -> Self {
        Self {
            major,
            minor: None,
            subminor: None,
        }
    }

    /// A two-component version, e.g. `2.0`.
    pub const fn with_minor(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor: Some(minor),
            subminor: None,
        }
    }

    /// A three-component version, e.g. `2.1.3`.
    pub const fn with_subminor(major: u32, minor: u32, subminor: u32) -> Self {
        Self {
            major,
            minor: Some(minor),
            subminor: Some(subminor),
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> Option<u32> {
        self.minor
    }

    pub fn subminor(&self) -> Option<u32> {
        self.subminor
    }

    /// Number of components as written (1, 2, or 3).
    pub fn component_count(&self) -> usize {
        1 + usize::from(self.minor.is_some()) + usize::from(self.subminor.is_some())
    }

    /// Parse a dotted version literal.
    pub fn parse(text: &str) -> Result<Self> {
        let malformed = |reason: String| CoreError::MalformedVersion {
            text: text.to_string(),
            reason,
        };

        if text.is_empty() {
            return Err(malformed("version is empty".into()));
        }

        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() > MAX_COMPONENTS {
            return Err(malformed(format!(
                "expected at most {MAX_COMPONENTS} components, found {}",
                parts.len()
            )));
        }

        let mut components = [0u32; MAX_COMPONENTS];
        for (slot, part) in components.iter_mut().zip(&parts) {
            if part.is_empty() {
                return Err(malformed("empty component".into()));
            }
            if part.starts_with('-') {
                return Err(malformed(format!("negative component '{part}'")));
            }
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed(format!("non-numeric component '{part}'")));
            }
            *slot = part
                .parse()
                .map_err(|_| malformed(format!("component '{part}' is out of range")))?;
        }

        Ok(match parts.len() {
            1 => Self::new(components[0]),
            2 => Self::with_minor(components[0], components[1]),
            _ => Self::with_subminor(components[0], components[1], components[2]),
        })
    }

    fn padded(&self) -> (u32, u32, u32) {
        (
            self.major,
            self.minor.unwrap_or(0),
            self.subminor.unwrap_or(0),
        )
    }
}

impl PartialEq for VersionTuple {
    fn eq(&self, other: &Self) -> bool {
        self.padded() == other.padded()
    }
}

impl Eq for VersionTuple {}

impl PartialOrd for VersionTuple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionTuple {
    fn cmp(&self, other: &Self) -> Ordering {
        self.padded().cmp(&other.padded())
    }
}

impl Hash for VersionTuple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.padded().hash(state);
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
        }
        if let Some(subminor) = self.subminor {
            write!(f, ".{subminor}")?;
        }
        Ok(())
    }
}

impl FromStr for VersionTuple {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionTuple {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<VersionTuple> for String {
    fn from(value: VersionTuple) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> VersionTuple {
        s.parse().unwrap()
    }

    #[test]
    fn format_preserves_component_count() {
        for text in ["2", "2.1", "2.1.3", "10.0", "0.0.0"] {
            assert_eq!(v(text).to_string(), text);
        }
        assert_eq!(v("2").component_count(), 1);
        assert_eq!(v("2.1").component_count(), 2);
        assert_eq!(v("2.1.3").component_count(), 3);
    }

    #[test]
    fn missing_components_compare_as_zero() {
        assert_eq!(v("2"), v("2.0"));
        assert_eq!(v("2.0"), v("2.0.0"));
        assert_eq!(v("2").cmp(&v("2.0.0")), Ordering::Equal);
        assert!(v("2") < v("2.0.1"));
    }

    #[test]
    fn comparison_is_lexicographic() {
        assert!(v("1.0") < v("2.0"));
        assert!(v("2.1.3") < v("3.0"));
        assert!(v("2.10") > v("2.9"));
        assert!(v("1.5") < v("2"));
        assert!(v("3.0") > v("2.1.3"));
    }

    #[test]
    fn reject_malformed_versions() {
        for bad in ["", "1.", ".1", "1..2", "-1", "1.-2", "a", "1.x", "1.2.3.4", "99999999999"] {
            let err = VersionTuple::parse(bad).unwrap_err();
            assert!(
                matches!(err, CoreError::MalformedVersion { .. }),
                "expected malformed-version error for {bad:?}"
            );
        }
    }

    #[test]
    fn negative_component_reason() {
        let err = VersionTuple::parse("-1").unwrap_err();
        assert_eq!(err.to_string(), "malformed version '-1': negative component '-1'");
    }

    #[test]
    fn equal_versions_hash_equal() {
        use std::collections::HashSet;
        let set: HashSet<VersionTuple> = [v("2"), v("2.0"), v("2.0.0")].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn serde_uses_written_form() {
        let json = serde_json::to_string(&v("2.1")).unwrap();
        assert_eq!(json, "\"2.1\"");
        let back: VersionTuple = serde_json::from_str("\"2.1.3\"").unwrap();
        assert_eq!(back.to_string(), "2.1.3");
        assert!(serde_json::from_str::<VersionTuple>("\"2.x\"").is_err());
    }
}
