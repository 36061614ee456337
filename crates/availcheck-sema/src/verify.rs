//! Matching emitted diagnostics against expectations.
//!
//! An expectation names a severity, a line, and a fragment of the message.
//! Each one consumes at most one emitted diagnostic; anything left over on
//! either side fails verification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, Severity};

/// A diagnostic the unit is expected to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedDiagnostic {
    pub severity: Severity,
    pub line: u32,
    /// Must appear somewhere in the emitted message.
    pub message: String,
}

impl ExpectedDiagnostic {
    pub fn matches(&self, diagnostic: &Diagnostic) -> bool {
        diagnostic.severity == self.severity
            && diagnostic.loc.line == self.line
            && diagnostic.message.contains(&self.message)
    }
}

impl fmt::Display for ExpectedDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.severity, self.message)
    }
}

/// Result of comparing expectations with emitted diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub matched: usize,
    pub unmatched: Vec<ExpectedDiagnostic>,
    pub unexpected: Vec<Diagnostic>,
}

impl VerifyOutcome {
    pub fn passed(&self) -> bool {
        self.unmatched.is_empty() && self.unexpected.is_empty()
    }
}

impl fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.unmatched {
            writeln!(f, "expected but not produced: {e}")?;
        }
        for d in &self.unexpected {
            writeln!(f, "produced but not expected: {d}")?;
        }
        write!(
            f,
            "{} matched, {} missing, {} unexpected",
            self.matched,
            self.unmatched.len(),
            self.unexpected.len()
        )
    }
}

/// Pair each expectation with the first unconsumed diagnostic it matches.
pub fn verify(expected: &[ExpectedDiagnostic], emitted: &[Diagnostic]) -> VerifyOutcome {
    let mut consumed = vec![false; emitted.len()];
    let mut outcome = VerifyOutcome::default();

    for exp in expected {
        let hit = emitted
            .iter()
            .enumerate()
            .find(|(i, d)| !consumed[*i] && exp.matches(d))
            .map(|(i, _)| i);
        match hit {
            Some(i) => {
                consumed[i] = true;
                outcome.matched += 1;
            }
            None => outcome.unmatched.push(exp.clone()),
        }
    }

    outcome.unexpected = emitted
        .iter()
        .zip(&consumed)
        .filter(|(_, used)| !**used)
        .map(|(d, _)| d.clone())
        .collect();
    outcome
}

#[cfg(test)]
mod tests {
    use availcheck_core::SourceLoc;

    use super::*;

    fn diag(severity: Severity, line: u32, message: &str) -> Diagnostic {
        Diagnostic {
            severity,
            loc: SourceLoc::new(line, 1),
            message: message.into(),
        }
    }

    fn expect(severity: Severity, line: u32, message: &str) -> ExpectedDiagnostic {
        ExpectedDiagnostic {
            severity,
            line,
            message: message.into(),
        }
    }

    #[test]
    fn exact_and_substring_matches_pass() {
        let emitted = vec![
            diag(Severity::Error, 8, "'doSomething()' is unavailable: you don't want to do that anyway"),
            diag(Severity::Note, 5, "'doSomething()' was obsoleted in watchOS 3.0"),
        ];
        let expected = vec![
            expect(Severity::Note, 5, "'doSomething()' was obsoleted in watchOS 3.0"),
            expect(Severity::Error, 8, "is unavailable"),
        ];
        let outcome = verify(&expected, &emitted);
        assert!(outcome.passed(), "{outcome}");
        assert_eq!(outcome.matched, 2);
    }

    #[test]
    fn severity_and_line_must_agree() {
        let emitted = vec![diag(Severity::Warning, 8, "'f()' was deprecated in watchOS 2.0")];
        let outcome = verify(&[expect(Severity::Error, 8, "'f()'")], &emitted);
        assert!(!outcome.passed());
        assert_eq!(outcome.unmatched.len(), 1);
        assert_eq!(outcome.unexpected.len(), 1);

        let outcome = verify(&[expect(Severity::Warning, 9, "'f()'")], &emitted);
        assert!(!outcome.passed());
    }

    #[test]
    fn each_expectation_consumes_one_diagnostic() {
        let emitted = vec![
            diag(Severity::Warning, 3, "'g()' was deprecated in watchOS 2.0"),
            diag(Severity::Warning, 3, "'g()' was deprecated in watchOS 2.0"),
        ];
        let once = verify(&[expect(Severity::Warning, 3, "'g()'")], &emitted);
        assert_eq!(once.unexpected.len(), 1);

        let twice = verify(
            &[
                expect(Severity::Warning, 3, "'g()'"),
                expect(Severity::Warning, 3, "'g()'"),
            ],
            &emitted,
        );
        assert!(twice.passed());
    }

    #[test]
    fn report_lists_both_sides() {
        let outcome = verify(
            &[expect(Severity::Error, 1, "missing")],
            &[diag(Severity::Note, 2, "extra")],
        );
        let text = outcome.to_string();
        assert!(text.contains("expected but not produced: line 1: error: missing"));
        assert!(text.contains("produced but not expected: 2:1: note: extra"));
        assert!(text.ends_with("0 matched, 1 missing, 1 unexpected"));
    }
}
