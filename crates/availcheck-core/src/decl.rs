//! Declarations and the availability they carry.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attr::AvailabilityAttribute;
use crate::error::{CoreError, Result};
use crate::loc::SourceLoc;
use crate::platform::Platform;

/// What sort of entity a declaration introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclKind {
    Func,
    Class,
    Struct,
    Enum,
    Protocol,
    Var,
    TypeAlias,
}

impl DeclKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            DeclKind::Func => "func",
            DeclKind::Class => "class",
            DeclKind::Struct => "struct",
            DeclKind::Enum => "enum",
            DeclKind::Protocol => "protocol",
            DeclKind::Var => "var",
            DeclKind::TypeAlias => "typealias",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A named declaration with at most one availability attribute per platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    name: String,
    kind: DeclKind,
    loc: SourceLoc,
    availability: BTreeMap<Platform, AvailabilityAttribute>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclKind, loc: SourceLoc) -> Self {
        Self {
            name: name.into(),
            kind,
            loc,
            availability: BTreeMap::new(),
        }
    }

    /// Attach an attribute, rejecting a second one for the same platform.
    pub fn add_availability(&mut self, attr: AvailabilityAttribute) -> Result<()> {
        if self.availability.contains_key(&attr.platform) {
            return Err(CoreError::DuplicatePlatform {
                loc: attr.loc,
                platform: attr.platform,
            });
        }
        self.availability.insert(attr.platform, attr);
        Ok(())
    }

    /// Builder form of [`Declaration::add_availability`].
    pub fn with_availability(mut self, attr: AvailabilityAttribute) -> Result<Self> {
        self.add_availability(attr)?;
        Ok(self)
    }

    /// Display name, echoed verbatim in diagnostics (e.g. `doSomething()`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DeclKind {
        self.kind
    }

    pub fn loc(&self) -> SourceLoc {
        self.loc
    }

    /// The attribute for `platform`, if the declaration has one.
    pub fn availability_for(&self, platform: Platform) -> Option<&AvailabilityAttribute> {
        self.availability.get(&platform)
    }

    /// All attributes, ordered by platform.
    pub fn availability(&self) -> impl Iterator<Item = &AvailabilityAttribute> {
        self.availability.values()
    }

    pub fn has_availability(&self) -> bool {
        !self.availability.is_empty()
    }
}
