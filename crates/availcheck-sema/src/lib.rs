//! Availability checking for one compilation unit.
//!
//! Data flows leaf to root:
//! - [`DeclarationTable`] parses and validates each declaration's attributes
//! - [`AvailabilityEvaluator`] turns a declaration plus the active
//!   [`PlatformContext`](availcheck_targets::PlatformContext) into a verdict
//! - [`ReferenceChecker`] evaluates every use site and reports through a
//!   [`DiagnosticEmitter`]
//! - [`verify`] compares what was emitted against expected diagnostics

pub mod checker;
pub mod diagnostics;
pub mod evaluator;
pub mod table;
pub mod verify;

pub use checker::{CheckSummary, ReferenceChecker, UseKind, UseSite};
pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticEmitter, Severity};
pub use evaluator::{evaluate, AvailabilityEvaluator, AvailabilityVerdict};
pub use table::{AttributeSource, DeclId, DeclarationTable};
pub use verify::{verify, ExpectedDiagnostic, VerifyOutcome};
