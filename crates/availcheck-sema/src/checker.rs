//! Use-site checking.
//!
//! Every use site is evaluated on its own, in the order given. Two calls to
//! the same deprecated function produce two warnings.

use availcheck_core::{Platform, SourceLoc, VersionTuple};
use availcheck_targets::PlatformContext;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::diagnostics::DiagnosticEmitter;
use crate::evaluator::{AvailabilityEvaluator, AvailabilityVerdict};
use crate::table::{DeclId, DeclarationTable};

/// How a use site refers to its declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UseKind {
    Call,
    ParameterType,
    ReturnType,
    InheritedType,
    VariableType,
    TypeReference,
    MemberAccess,
}

/// A single reference to a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UseSite {
    pub loc: SourceLoc,
    pub decl: DeclId,
    pub kind: UseKind,
}

/// Tally of verdicts produced by one [`ReferenceChecker::check`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub uses: usize,
    pub available: usize,
    pub deprecated: usize,
    pub unavailable: usize,
    /// Use sites whose declaration id is not in the table.
    pub unresolved: usize,
}

/// `'<name>' is unavailable[: <message>]`
pub fn unavailable_message(name: &str, message: Option<&str>) -> String {
    match message {
        Some(message) => format!("'{name}' is unavailable: {message}"),
        None => format!("'{name}' is unavailable"),
    }
}

/// `'<name>' was obsoleted in <platform> <version>`
pub fn obsoleted_note(name: &str, platform: Platform, version: VersionTuple) -> String {
    format!("'{name}' was obsoleted in {platform} {version}")
}

/// `'<name>' was deprecated in <platform> <version>[: <message>]`
pub fn deprecated_message(
    name: &str,
    platform: Platform,
    version: VersionTuple,
    message: Option<&str>,
) -> String {
    match message {
        Some(message) => format!("'{name}' was deprecated in {platform} {version}: {message}"),
        None => format!("'{name}' was deprecated in {platform} {version}"),
    }
}

/// Walks use sites and reports availability violations.
pub struct ReferenceChecker<'a> {
    table: &'a DeclarationTable,
    evaluator: AvailabilityEvaluator,
}

impl<'a> ReferenceChecker<'a> {
    pub fn new(table: &'a DeclarationTable, ctx: PlatformContext) -> Self {
        Self {
            table,
            evaluator: AvailabilityEvaluator::new(ctx),
        }
    }

    /// Evaluate one use site and emit its diagnostics.
    ///
    /// Returns `None` when the site refers to an unknown declaration.
    pub fn check_use<E: DiagnosticEmitter + ?Sized>(
        &self,
        site: &UseSite,
        emitter: &mut E,
    ) -> Option<AvailabilityVerdict> {
        let decl = self.table.get(site.decl)?;
        let platform = self.evaluator.context().current_platform();
        let verdict = self.evaluator.evaluate(decl);
        trace!(
            decl = decl.name(),
            loc = %site.loc,
            kind = ?site.kind,
            verdict = ?verdict,
            "evaluated use site"
        );

        match &verdict {
            AvailabilityVerdict::Available => {}
            AvailabilityVerdict::Deprecated { since, message } => {
                emitter.emit_warning(
                    site.loc,
                    deprecated_message(decl.name(), platform, *since, message.as_deref()),
                );
            }
            AvailabilityVerdict::Unavailable {
                obsoleted_at,
                message,
            } => {
                emitter.emit_error(
                    site.loc,
                    unavailable_message(decl.name(), message.as_deref()),
                );
                emitter.emit_note(
                    decl.loc(),
                    obsoleted_note(decl.name(), platform, *obsoleted_at),
                );
            }
        }
        Some(verdict)
    }

    /// Check every site in order.
    pub fn check<E: DiagnosticEmitter + ?Sized>(
        &self,
        sites: &[UseSite],
        emitter: &mut E,
    ) -> CheckSummary {
        let mut summary = CheckSummary::default();
        for site in sites {
            summary.uses += 1;
            match self.check_use(site, emitter) {
                None => summary.unresolved += 1,
                Some(AvailabilityVerdict::Available) => summary.available += 1,
                Some(AvailabilityVerdict::Deprecated { .. }) => summary.deprecated += 1,
                Some(AvailabilityVerdict::Unavailable { .. }) => summary.unavailable += 1,
            }
        }
        info!(
            context = %self.evaluator.context(),
            uses = summary.uses,
            deprecated = summary.deprecated,
            unavailable = summary.unavailable,
            unresolved = summary.unresolved,
            "checked use sites"
        );
        summary
    }
}
