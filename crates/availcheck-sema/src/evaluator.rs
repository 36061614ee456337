//! Availability verdicts for a declaration under the active platform context.
//!
//! Deprecation and obsoletion are judged against the compilation's *minimum*
//! deployment target. A declaration deprecated at 4.0 is fine when the
//! deployment target is 3.0: the build never has to run where it would already
//! be deprecated. `introduced` is never consulted here.

use availcheck_core::{Declaration, VersionTuple};
use availcheck_targets::PlatformContext;
use serde::Serialize;

/// The availability state of a declaration at a use site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "kebab-case")]
pub enum AvailabilityVerdict {
    Available,
    Deprecated {
        since: VersionTuple,
        message: Option<String>,
    },
    Unavailable {
        obsoleted_at: VersionTuple,
        message: Option<String>,
    },
}

impl AvailabilityVerdict {
    pub fn is_available(&self) -> bool {
        matches!(self, AvailabilityVerdict::Available)
    }
}

/// Evaluate `decl` under `ctx`.
///
/// Obsoletion is checked before deprecation, so a declaration past both
/// versions is `Unavailable`.
pub fn evaluate(decl: &Declaration, ctx: &PlatformContext) -> AvailabilityVerdict {
    let Some(attr) = decl.availability_for(ctx.current_platform()) else {
        return AvailabilityVerdict::Available;
    };
    let target = ctx.minimum_deployment_version();

    if let Some(obsoleted) = attr.obsoleted.filter(|v| *v <= target) {
        return AvailabilityVerdict::Unavailable {
            obsoleted_at: obsoleted,
            message: attr.message.clone(),
        };
    }
    if let Some(deprecated) = attr.deprecated.filter(|v| *v <= target) {
        return AvailabilityVerdict::Deprecated {
            since: deprecated,
            message: attr.message.clone(),
        };
    }
    AvailabilityVerdict::Available
}

/// Evaluator bound to one compilation's platform context.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityEvaluator {
    ctx: PlatformContext,
}

impl AvailabilityEvaluator {
    pub fn new(ctx: PlatformContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &PlatformContext {
        &self.ctx
    }

    pub fn evaluate(&self, decl: &Declaration) -> AvailabilityVerdict {
        evaluate(decl, &self.ctx)
    }
}

#[cfg(test)]
mod tests {
    use availcheck_core::{AvailabilityAttribute, DeclKind, Platform, SourceLoc};

    use super::*;

    fn v(s: &str) -> VersionTuple {
        s.parse().unwrap()
    }

    fn watch(target: &str) -> PlatformContext {
        PlatformContext::new(Platform::WatchOs, v(target))
    }

    fn decl(text: &str) -> Declaration {
        let attr = AvailabilityAttribute::parse(text, SourceLoc::new(1, 15)).unwrap();
        Declaration::new("f()", DeclKind::Func, SourceLoc::new(2, 6))
            .with_availability(attr)
            .unwrap()
    }

    #[test]
    fn full_range_boundaries() {
        let d = decl("watchOS, introduced=1.0, deprecated=2.0, obsoleted=3.0");
        assert_eq!(evaluate(&d, &watch("0.5")), AvailabilityVerdict::Available);
        assert_eq!(evaluate(&d, &watch("1.9.9")), AvailabilityVerdict::Available);
        assert_eq!(
            evaluate(&d, &watch("2.0")),
            AvailabilityVerdict::Deprecated {
                since: v("2.0"),
                message: None
            }
        );
        assert!(matches!(
            evaluate(&d, &watch("2.9")),
            AvailabilityVerdict::Deprecated { .. }
        ));
        assert_eq!(
            evaluate(&d, &watch("3")),
            AvailabilityVerdict::Unavailable {
                obsoleted_at: v("3.0"),
                message: None
            }
        );
        assert!(matches!(
            evaluate(&d, &watch("7.1")),
            AvailabilityVerdict::Unavailable { .. }
        ));
    }

    #[test]
    fn deprecation_after_deployment_target_is_silent() {
        let d = decl(r#"watchOS, introduced=2.0, deprecated=4.0, message="Use BetterClass instead""#);
        assert!(evaluate(&d, &watch("3.0")).is_available());
    }

    #[test]
    fn obsoletion_after_deployment_target_is_silent() {
        let d = decl("watchOS, obsoleted=3.1");
        assert!(evaluate(&d, &watch("3.0")).is_available());
    }

    #[test]
    fn unavailable_wins_over_deprecated() {
        let d = decl(r#"watchOS, deprecated=1.5, obsoleted=2, message="gone""#);
        assert_eq!(
            evaluate(&d, &watch("3.0")),
            AvailabilityVerdict::Unavailable {
                obsoleted_at: v("2"),
                message: Some("gone".into())
            }
        );
    }

    #[test]
    fn introduced_alone_never_matters() {
        let d = decl("watchOS, introduced=9.0");
        assert!(evaluate(&d, &watch("3.0")).is_available());
    }

    #[test]
    fn other_platform_is_inert() {
        let d = decl("iOS, introduced=1.0, deprecated=1.0, obsoleted=1.0");
        assert!(evaluate(&d, &watch("3.0")).is_available());
        let ios = PlatformContext::new(Platform::Ios, v("8.0"));
        assert!(!evaluate(&d, &ios).is_available());
    }

    #[test]
    fn no_attributes_is_available() {
        let d = Declaration::new("plain()", DeclKind::Func, SourceLoc::new(1, 1));
        let evaluator = AvailabilityEvaluator::new(watch("3.0"));
        assert!(evaluator.evaluate(&d).is_available());
        assert_eq!(evaluator.context().current_platform(), Platform::WatchOs);
    }

    #[test]
    fn message_carried_into_deprecation() {
        let d = decl(r#"watchOS, introduced=1.1, deprecated=2.0, message="Use another function""#);
        assert_eq!(
            evaluate(&d, &watch("3.0")),
            AvailabilityVerdict::Deprecated {
                since: v("2.0"),
                message: Some("Use another function".into())
            }
        );
    }
}
