//! Availability attribute model and clause parser.
//!
//! An attribute is written as a platform identifier followed by optional,
//! order-insensitive `key=value` clauses:
//!
//! ```text
//! watchOS, introduced=1.0, deprecated=2.0, obsoleted=3.0, message="use bar()"
//! ```

mod lexer;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{CoreError, Result};
use crate::loc::SourceLoc;
use crate::platform::Platform;
use crate::version::VersionTuple;

use lexer::{Token, TokenKind};

/// One parsed availability attribute for a single platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityAttribute {
    pub platform: Platform,
    pub introduced: Option<VersionTuple>,
    pub deprecated: Option<VersionTuple>,
    pub obsoleted: Option<VersionTuple>,
    pub message: Option<String>,
    /// Where the attribute's platform identifier was written.
    pub loc: SourceLoc,
}

/// The clause keys an attribute accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Introduced,
    Deprecated,
    Obsoleted,
    Message,
}

impl Key {
    fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "introduced" => Some(Key::Introduced),
            "deprecated" => Some(Key::Deprecated),
            "obsoleted" => Some(Key::Obsoleted),
            "message" => Some(Key::Message),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Key::Introduced => "introduced",
            Key::Deprecated => "deprecated",
            Key::Obsoleted => "obsoleted",
            Key::Message => "message",
        }
    }
}

fn syntax_error(loc: SourceLoc, detail: impl Into<String>) -> CoreError {
    CoreError::InvalidAvailabilitySyntax {
        loc,
        detail: detail.into(),
    }
}

impl AvailabilityAttribute {
    /// An attribute naming only a platform.
    pub fn new(platform: Platform, loc: SourceLoc) -> Self {
        Self {
            platform,
            introduced: None,
            deprecated: None,
            obsoleted: None,
            message: None,
            loc,
        }
    }

    pub fn introduced(mut self, version: VersionTuple) -> Self {
        self.introduced = Some(version);
        self
    }

    pub fn deprecated(mut self, version: VersionTuple) -> Self {
        self.deprecated = Some(version);
        self
    }

    pub fn obsoleted(mut self, version: VersionTuple) -> Self {
        self.obsoleted = Some(version);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Parse attribute text whose first character sits at `loc`.
    ///
    /// Only the grammar is checked here; ordering of the versions is left to
    /// [`AvailabilityAttribute::validate`] so callers can report both kinds of
    /// problem through the same declaration-time path.
    pub fn parse(text: &str, loc: SourceLoc) -> Result<Self> {
        let tokens = lexer::tokenize(text, loc)?;
        let mut tokens = tokens.into_iter();

        let (platform, platform_loc) = match tokens.next() {
            Some(Token {
                kind: TokenKind::Ident(name),
                loc,
            }) => match Platform::from_identifier(&name) {
                Some(platform) => (platform, loc),
                None => return Err(syntax_error(loc, format!("unknown platform '{name}'"))),
            },
            Some(other) => {
                return Err(syntax_error(
                    other.loc,
                    format!("expected platform name, found {}", other.kind.describe()),
                ))
            }
            None => return Err(syntax_error(loc, "expected platform name")),
        };

        let mut attr = AvailabilityAttribute::new(platform, platform_loc);
        let mut seen: Vec<Key> = Vec::new();

        while let Some(separator) = tokens.next() {
            if separator.kind != TokenKind::Comma {
                return Err(syntax_error(
                    separator.loc,
                    format!("expected ',', found {}", separator.kind.describe()),
                ));
            }

            let (key, key_loc) = match tokens.next() {
                Some(Token {
                    kind: TokenKind::Ident(name),
                    loc,
                }) => match Key::from_ident(&name) {
                    Some(key) => (key, loc),
                    None => {
                        return Err(syntax_error(
                            loc,
                            format!("unknown availability key '{name}'"),
                        ))
                    }
                },
                Some(other) => {
                    return Err(syntax_error(
                        other.loc,
                        format!("expected availability key, found {}", other.kind.describe()),
                    ))
                }
                None => {
                    return Err(syntax_error(
                        separator.loc,
                        "expected availability key after ','",
                    ))
                }
            };

            if seen.contains(&key) {
                return Err(syntax_error(
                    key_loc,
                    format!("'{}' specified more than once", key.as_str()),
                ));
            }
            seen.push(key);

            match tokens.next() {
                Some(Token {
                    kind: TokenKind::Equals,
                    ..
                }) => {}
                Some(other) => {
                    return Err(syntax_error(
                        other.loc,
                        format!(
                            "expected '=' after '{}', found {}",
                            key.as_str(),
                            other.kind.describe()
                        ),
                    ))
                }
                None => {
                    return Err(syntax_error(
                        key_loc,
                        format!("expected '=' after '{}'", key.as_str()),
                    ))
                }
            }

            let value = tokens.next().ok_or_else(|| {
                syntax_error(key_loc, format!("expected value for '{}'", key.as_str()))
            })?;

            let version = |text: &str| {
                VersionTuple::parse(text).map_err(|err| syntax_error(value.loc, err.to_string()))
            };
            match (key, &value.kind) {
                (Key::Message, TokenKind::Str(text)) => attr.message = Some(text.clone()),
                (Key::Introduced, TokenKind::Version(text)) => attr.introduced = Some(version(text)?),
                (Key::Deprecated, TokenKind::Version(text)) => attr.deprecated = Some(version(text)?),
                (Key::Obsoleted, TokenKind::Version(text)) => attr.obsoleted = Some(version(text)?),
                (Key::Message, other) => {
                    return Err(syntax_error(
                        value.loc,
                        format!("expected string literal for 'message', found {}", other.describe()),
                    ))
                }
                (key, other) => {
                    return Err(syntax_error(
                        value.loc,
                        format!(
                            "expected version for '{}', found {}",
                            key.as_str(),
                            other.describe()
                        ),
                    ))
                }
            }
        }

        trace!(platform = %attr.platform, loc = %attr.loc, "parsed availability attribute");
        Ok(attr)
    }

    /// Check `introduced <= deprecated <= obsoleted` over whichever are present.
    pub fn validate(&self) -> Result<()> {
        let ordered = [
            ("introduced", self.introduced),
            ("deprecated", self.deprecated),
            ("obsoleted", self.obsoleted),
        ];
        for (i, &(earlier_key, earlier)) in ordered.iter().enumerate() {
            let Some(earlier) = earlier else { continue };
            for &(later_key, later) in &ordered[i + 1..] {
                let Some(later) = later else { continue };
                if later < earlier {
                    return Err(CoreError::InvertedRange {
                        loc: self.loc,
                        platform: self.platform,
                        earlier_key,
                        earlier,
                        later_key,
                        later,
                    });
                }
            }
        }
        Ok(())
    }
}
