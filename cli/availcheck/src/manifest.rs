//! `availcheck.toml` project manifest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::logging::LogSettings;

/// File name searched for by [`ProjectManifest::find_and_load`].
pub const MANIFEST_NAME: &str = "availcheck.toml";

/// The top-level manifest structure for an availcheck project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Compilation defaults.
    #[serde(default)]
    pub compile: Option<CompileConfig>,
    /// Logging defaults.
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// `[compile]` section, shared with unit files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileConfig {
    /// Target triple, e.g. `i386-apple-watchos3.0`.
    #[serde(default)]
    pub target: Option<String>,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

impl ProjectManifest {
    /// Search upward from `start_dir` for `availcheck.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_NAME);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest = Self::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing availcheck.toml")
    }

    /// Default target triple from `[compile]`.
    pub fn default_target(&self) -> Option<&str> {
        self.compile.as_ref().and_then(|c| c.target.as_deref())
    }

    /// Logging defaults from `[logging]`.
    pub fn log_settings(&self) -> LogSettings {
        match &self.logging {
            Some(l) => LogSettings::from_strs(l.format.as_deref(), l.level.as_deref()),
            None => LogSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogFormat, LogLevel};

    #[test]
    fn parse_full_manifest() {
        let manifest = ProjectManifest::from_str(
            r#"
[project]
name = "watch-app"
description = "watchOS extension"

[compile]
target = "armv7k-apple-watchos2.0"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(manifest.project.name, "watch-app");
        assert_eq!(manifest.default_target(), Some("armv7k-apple-watchos2.0"));
        let settings = manifest.log_settings();
        assert_eq!(settings.level, Some(LogLevel::Debug));
        assert_eq!(settings.format, Some(LogFormat::Json));
    }

    #[test]
    fn parse_minimal_manifest() {
        let manifest = ProjectManifest::from_str("[project]\nname = \"minimal\"\n").unwrap();
        assert!(manifest.default_target().is_none());
        assert!(manifest.log_settings().level.is_none());
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(ProjectManifest::from_str("this is not valid toml [[[").is_err());
        assert!(ProjectManifest::from_str("[compile]\ntarget = \"x\"\n").is_err());
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_NAME),
            "[project]\nname = \"parent\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found_dir) = ProjectManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(manifest.project.name, "parent");
        assert_eq!(found_dir, dir.path());
    }

    #[test]
    fn find_and_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_NAME), "[project\n").unwrap();
        let err = ProjectManifest::find_and_load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains(MANIFEST_NAME));
    }
}
