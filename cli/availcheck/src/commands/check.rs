//! `availcheck check` — report availability diagnostics for a unit.

use std::path::Path;

use anyhow::{bail, Result};
use availcheck_sema::Severity;

use crate::manifest::ProjectManifest;
use crate::unit::{resolve_context, UnitFile, UnitReport};

/// Check a unit file and print its diagnostics.
///
/// Fails if any error was emitted; deprecation warnings alone succeed.
pub fn run(
    unit_path: &Path,
    manifest: Option<&ProjectManifest>,
    target: Option<&str>,
    format: Option<&str>,
) -> Result<()> {
    let unit = UnitFile::load(unit_path)?;
    let ctx = resolve_context(target, &unit, manifest)?;
    let report = unit.analyze(ctx)?;

    match format {
        Some("json") => println!("{}", render_json(&report)?),
        Some("human") | None => print!("{}", render_human(unit_path, &report)),
        Some(other) => bail!("unknown output format: '{other}'. Choose: human, json"),
    }

    let errors = report.diagnostics.count(Severity::Error);
    if errors > 0 {
        bail!("availability check failed: {errors} error(s) emitted");
    }
    Ok(())
}

fn render_human(unit_path: &Path, report: &UnitReport) -> String {
    let mut out = String::new();
    for d in report.diagnostics.iter() {
        out.push_str(&format!("{}:{d}\n", unit_path.display()));
    }
    let bag = &report.diagnostics;
    out.push_str(&format!(
        "{}: {} use(s) checked, {} error(s), {} warning(s), {} note(s)\n",
        report.context,
        report.summary.uses,
        bag.count(Severity::Error),
        bag.count(Severity::Warning),
        bag.count(Severity::Note),
    ));
    out
}

fn render_json(report: &UnitReport) -> Result<String> {
    let json = serde_json::json!({
        "platform": report.context.current_platform(),
        "deployment_target": report.context.minimum_deployment_version(),
        "summary": report.summary,
        "diagnostics": report.diagnostics.as_slice(),
    });
    Ok(serde_json::to_string_pretty(&json)?)
}
