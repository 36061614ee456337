//! Unit files: one compilation unit's declarations and use sites.
//!
//! A unit file is what the front end hands the availability checker: each
//! declaration with its raw attribute text and location, each use site with
//! the name it resolved to, and optionally the diagnostics the unit is
//! expected to produce.

use std::path::Path;

use anyhow::{bail, Context, Result};
use availcheck_core::{DeclKind, SourceLoc};
use availcheck_sema::{
    AttributeSource, CheckSummary, DeclarationTable, DiagnosticBag, ExpectedDiagnostic,
    ReferenceChecker, UseKind, UseSite,
};
use availcheck_targets::PlatformContext;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::manifest::{CompileConfig, ProjectManifest};

fn default_column() -> u32 {
    1
}

fn default_use_kind() -> UseKind {
    UseKind::Call
}

/// A parsed unit file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitFile {
    #[serde(default)]
    pub compile: Option<CompileConfig>,
    #[serde(default, rename = "decl")]
    pub decls: Vec<DeclEntry>,
    #[serde(default, rename = "use")]
    pub uses: Vec<UseEntry>,
    #[serde(default, rename = "expect")]
    pub expectations: Vec<ExpectedDiagnostic>,
}

/// A declaration as written in source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclEntry {
    pub name: String,
    pub kind: DeclKind,
    pub line: u32,
    #[serde(default = "default_column")]
    pub column: u32,
    #[serde(default)]
    pub availability: Vec<AttributeEntry>,
}

/// Raw attribute text, optionally with its own location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeEntry {
    /// Text only; located at the declaration.
    Text(String),
    Located {
        text: String,
        line: u32,
        #[serde(default = "default_column")]
        column: u32,
    },
}

/// A reference to a declaration by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseEntry {
    pub decl: String,
    #[serde(default = "default_use_kind")]
    pub kind: UseKind,
    pub line: u32,
    #[serde(default = "default_column")]
    pub column: u32,
}

/// Everything produced by checking one unit.
#[derive(Debug)]
pub struct UnitReport {
    pub context: PlatformContext,
    pub summary: CheckSummary,
    pub diagnostics: DiagnosticBag,
}

impl UnitFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn target(&self) -> Option<&str> {
        self.compile.as_ref().and_then(|c| c.target.as_deref())
    }

    /// Declare everything, then check every use site in file order.
    pub fn analyze(&self, ctx: PlatformContext) -> Result<UnitReport> {
        let mut diagnostics = DiagnosticBag::new();
        let mut table = DeclarationTable::new();

        for entry in &self.decls {
            let loc = SourceLoc::new(entry.line, entry.column);
            let sources: Vec<AttributeSource<'_>> = entry
                .availability
                .iter()
                .map(|a| a.source(loc))
                .collect();
            table.declare(&entry.name, entry.kind, loc, &sources, &mut diagnostics);
        }

        let mut sites = Vec::with_capacity(self.uses.len());
        for entry in &self.uses {
            let Some(decl) = table.lookup(&entry.decl) else {
                bail!(
                    "use at {}:{} refers to undeclared '{}'",
                    entry.line,
                    entry.column,
                    entry.decl
                );
            };
            sites.push(UseSite {
                loc: SourceLoc::new(entry.line, entry.column),
                decl,
                kind: entry.kind,
            });
        }
        debug!(decls = table.len(), uses = sites.len(), "lowered unit");

        let summary = ReferenceChecker::new(&table, ctx).check(&sites, &mut diagnostics);
        Ok(UnitReport {
            context: ctx,
            summary,
            diagnostics,
        })
    }
}

impl AttributeEntry {
    fn source(&self, decl_loc: SourceLoc) -> AttributeSource<'_> {
        match self {
            AttributeEntry::Text(text) => AttributeSource {
                text,
                loc: decl_loc,
            },
            AttributeEntry::Located { text, line, column } => AttributeSource {
                text,
                loc: SourceLoc::new(*line, *column),
            },
        }
    }
}

/// Pick the target triple (flag, then unit file, then manifest) and resolve it.
pub fn resolve_context(
    flag: Option<&str>,
    unit: &UnitFile,
    manifest: Option<&ProjectManifest>,
) -> Result<PlatformContext> {
    let Some(triple) = flag
        .or_else(|| unit.target())
        .or_else(|| manifest.and_then(|m| m.default_target()))
    else {
        bail!("no target selected: pass --target, or set [compile] target in the unit file or availcheck.toml");
    };
    PlatformContext::resolve(triple).with_context(|| format!("resolving target '{triple}'"))
}

#[cfg(test)]
mod tests {
    use availcheck_core::{Platform, VersionTuple};
    use availcheck_sema::Severity;

    use super::*;

    const UNIT: &str = r#"
[compile]
target = "i386-apple-watchos3.0"

[[decl]]
name = "f()"
kind = "func"
line = 2
column = 6
availability = ["watchOS, deprecated=2.0"]

[[decl]]
name = "Old"
kind = "class"
line = 5

[[decl.availability]]
text = "watchOS, obsoleted=2.1.3"
line = 4
column = 15

[[use]]
decl = "f()"
line = 7

[[use]]
decl = "Old"
kind = "inherited-type"
line = 8
column = 12

[[expect]]
severity = "warning"
line = 7
message = "deprecated"
"#;

    #[test]
    fn parse_unit() {
        let unit = UnitFile::from_str(UNIT).unwrap();
        assert_eq!(unit.target(), Some("i386-apple-watchos3.0"));
        assert_eq!(unit.decls.len(), 2);
        assert!(matches!(unit.decls[0].availability[0], AttributeEntry::Text(_)));
        assert!(matches!(
            unit.decls[1].availability[0],
            AttributeEntry::Located { line: 4, column: 15, .. }
        ));
        assert_eq!(unit.decls[1].column, 1);
        assert_eq!(unit.uses[0].kind, UseKind::Call);
        assert_eq!(unit.uses[1].kind, UseKind::InheritedType);
        assert_eq!(unit.expectations[0].severity, Severity::Warning);
    }

    #[test]
    fn analyze_unit() {
        let unit = UnitFile::from_str(UNIT).unwrap();
        let ctx = resolve_context(None, &unit, None).unwrap();
        let report = unit.analyze(ctx).unwrap();

        assert_eq!(report.summary.deprecated, 1);
        assert_eq!(report.summary.unavailable, 1);
        let lines: Vec<_> = report.diagnostics.iter().map(|d| d.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "7:1: warning: 'f()' was deprecated in watchOS 2.0",
                "8:12: error: 'Old' is unavailable",
                "5:1: note: 'Old' was obsoleted in watchOS 2.1.3",
            ]
        );
    }

    #[test]
    fn bad_attribute_is_a_diagnostic_not_a_failure() {
        let unit = UnitFile::from_str(
            r#"
[[decl]]
name = "f()"
kind = "func"
line = 3
availability = ["watchOS, deprecated=two"]

[[use]]
decl = "f()"
line = 4
"#,
        )
        .unwrap();
        let ctx = PlatformContext::new(Platform::WatchOs, VersionTuple::with_minor(3, 0));
        let report = unit.analyze(ctx).unwrap();
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics.as_slice()[0].loc, SourceLoc::new(3, 21));
        assert_eq!(report.summary.available, 1);
    }

    #[test]
    fn undeclared_use_is_rejected() {
        let unit = UnitFile::from_str("[[use]]\ndecl = \"nope\"\nline = 1\n").unwrap();
        let ctx = PlatformContext::new(Platform::Ios, VersionTuple::new(8));
        let err = unit.analyze(ctx).unwrap_err();
        assert!(err.to_string().contains("undeclared 'nope'"));
    }

    #[test]
    fn target_precedence() {
        let unit = UnitFile::from_str(UNIT).unwrap();
        let manifest =
            ProjectManifest::from_str("[project]\nname = \"p\"\n[compile]\ntarget = \"arm64-apple-ios9.0\"\n")
                .unwrap();

        let ctx = resolve_context(Some("arm64-apple-tvos10"), &unit, Some(&manifest)).unwrap();
        assert_eq!(ctx.current_platform(), Platform::TvOs);

        let ctx = resolve_context(None, &unit, Some(&manifest)).unwrap();
        assert_eq!(ctx.current_platform(), Platform::WatchOs);

        let bare = UnitFile::from_str("").unwrap();
        let ctx = resolve_context(None, &bare, Some(&manifest)).unwrap();
        assert_eq!(ctx.current_platform(), Platform::Ios);

        assert!(resolve_context(None, &bare, None).is_err());
        assert!(resolve_context(Some("x86_64-unknown-linux-gnu"), &bare, None).is_err());
    }
}
