//! `availcheck target` — supported OS spellings and triple resolution.

use anyhow::{Context, Result};
use availcheck_targets::{default_deployment_target, supported_os_names, PlatformContext, TargetTriple};

/// List the OS spellings a target triple may use.
pub fn list() -> Result<()> {
    println!("Supported target OS names:");
    println!();
    for (os, platform) in supported_os_names() {
        println!(
            "  {os:<10} {:<8} default deployment target {}",
            platform.name(),
            default_deployment_target(platform)
        );
    }
    println!();
    println!("Use 'availcheck target describe <triple>' to resolve a triple.");
    Ok(())
}

/// Resolve a triple and print the platform context it selects.
pub fn describe(triple: &str) -> Result<()> {
    let parsed = TargetTriple::parse(triple).with_context(|| format!("parsing '{triple}'"))?;
    let ctx = PlatformContext::from_triple(&parsed)
        .with_context(|| format!("resolving '{triple}'"))?;

    println!("=== Target: {parsed} ===");
    println!("  Arch:        {}", parsed.arch);
    println!("  Vendor:      {}", parsed.vendor);
    println!("  OS:          {}", parsed.os);
    if let Some(env) = &parsed.environment {
        println!("  Environment: {env}");
    }
    println!("  Platform:    {}", ctx.current_platform());
    match parsed.os_version {
        Some(v) => println!("  Deployment:  {v}"),
        None => println!(
            "  Deployment:  {} (platform default)",
            ctx.minimum_deployment_version()
        ),
    }
    Ok(())
}
