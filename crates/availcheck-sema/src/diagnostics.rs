//! The diagnostic sink the checker reports into.
//!
//! The checker decides *what* to report; rendering is the emitter's business.
//! [`DiagnosticBag`] is the in-memory emitter used by the driver and tests.

use std::fmt;

use availcheck_core::SourceLoc;
use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// One reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub loc: SourceLoc,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.loc, self.severity, self.message)
    }
}

/// Receiver for errors, warnings, and notes.
pub trait DiagnosticEmitter {
    fn emit_error(&mut self, loc: SourceLoc, text: String);
    fn emit_warning(&mut self, loc: SourceLoc, text: String);
    fn emit_note(&mut self, loc: SourceLoc, text: String);
}

/// Collects diagnostics in emission order.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, severity: Severity, loc: SourceLoc, message: String) {
        self.diagnostics.push(Diagnostic {
            severity,
            loc,
            message,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Whether anything was reported that must fail the compilation.
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

impl DiagnosticEmitter for DiagnosticBag {
    fn emit_error(&mut self, loc: SourceLoc, text: String) {
        self.push(Severity::Error, loc, text);
    }

    fn emit_warning(&mut self, loc: SourceLoc, text: String) {
        self.push(Severity::Warning, loc, text);
    }

    fn emit_note(&mut self, loc: SourceLoc, text: String) {
        self.push(Severity::Note, loc, text);
    }
}

impl fmt::Display for DiagnosticBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.diagnostics {
            writeln!(f, "{d}")?;
        }
        Ok(())
    }
}
