//! `availcheck verify` — compare a unit's diagnostics with its expectations.

use std::path::Path;

use anyhow::{bail, Result};
use availcheck_sema::verify;

use crate::manifest::ProjectManifest;
use crate::unit::{resolve_context, UnitFile};

/// Run the checker over a unit and require exactly the `[[expect]]` diagnostics.
pub fn run(unit_path: &Path, manifest: Option<&ProjectManifest>, target: Option<&str>) -> Result<()> {
    let unit = UnitFile::load(unit_path)?;
    let ctx = resolve_context(target, &unit, manifest)?;
    let report = unit.analyze(ctx)?;

    if unit.expectations.is_empty() {
        eprintln!(
            "warning: {} has no [[expect]] entries; every diagnostic counts as unexpected",
            unit_path.display()
        );
    }

    let outcome = verify(&unit.expectations, report.diagnostics.as_slice());
    println!("{}: {outcome}", unit_path.display());

    if !outcome.passed() {
        bail!(
            "verification failed: {} missing, {} unexpected",
            outcome.unmatched.len(),
            outcome.unexpected.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
    }

    #[test]
    fn watchos_fixture_verifies() {
        run(&fixture("watchos.unit.toml"), None, None).unwrap();
    }

    #[test]
    fn watchos_fixture_produces_exact_diagnostics() {
        let unit = UnitFile::load(&fixture("watchos.unit.toml")).unwrap();
        let ctx = resolve_context(None, &unit, None).unwrap();
        let report = unit.analyze(ctx).unwrap();
        let outcome = verify(&unit.expectations, report.diagnostics.as_slice());
        assert!(outcome.passed(), "{outcome}");
        assert_eq!(outcome.matched, 9);
        assert_eq!(report.summary.uses, 7);
        assert_eq!(report.summary.unavailable, 3);
        assert_eq!(report.summary.deprecated, 3);
        assert_eq!(report.summary.available, 1);
    }

    #[test]
    fn raising_the_target_surfaces_later_deprecation() {
        // At watchOS 4.0 DeprecatedClassIn3_0 is deprecated too.
        let err = run(&fixture("watchos.unit.toml"), None, Some("i386-apple-watchos4.0")).unwrap_err();
        assert!(err.to_string().contains("1 unexpected"), "{err}");
    }

    #[test]
    fn missing_expectation_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("u.unit.toml");
        std::fs::write(
            &path,
            r#"
[compile]
target = "arm64-apple-ios9.0"

[[decl]]
name = "f()"
kind = "func"
line = 1

[[use]]
decl = "f()"
line = 2

[[expect]]
severity = "warning"
line = 2
message = "'f()' was deprecated"
"#,
        )
        .unwrap();
        let err = run(&path, None, None).unwrap_err();
        assert!(err.to_string().contains("1 missing, 0 unexpected"));
    }
}
