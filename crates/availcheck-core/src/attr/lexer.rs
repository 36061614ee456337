//! Tokenizer for availability attribute clause lists.

use crate::error::{CoreError, Result};
use crate::loc::SourceLoc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident(String),
    /// Raw text of a version literal, validated later by `VersionTuple::parse`.
    Version(String),
    Str(String),
    Comma,
    Equals,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier '{name}'"),
            TokenKind::Version(text) => format!("version '{text}'"),
            TokenKind::Str(_) => "string literal".into(),
            TokenKind::Comma => "','".into(),
            TokenKind::Equals => "'='".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub loc: SourceLoc,
}

struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    loc: SourceLoc,
}

impl Cursor<'_> {
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.loc = self.loc.advanced_past(c);
        Some(c)
    }

    fn take_while(&mut self, mut pred: impl FnMut(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            out.push(c);
            self.bump();
        }
        out
    }
}

fn syntax_error(loc: SourceLoc, detail: impl Into<String>) -> CoreError {
    CoreError::InvalidAvailabilitySyntax {
        loc,
        detail: detail.into(),
    }
}

/// Split attribute text into tokens, tracking each token's location from `start`.
pub(crate) fn tokenize(text: &str, start: SourceLoc) -> Result<Vec<Token>> {
    let mut cursor = Cursor {
        chars: text.chars().peekable(),
        loc: start,
    };
    let mut tokens = Vec::new();

    while let Some(c) = cursor.peek() {
        let loc = cursor.loc;
        let kind = match c {
            c if c.is_whitespace() => {
                cursor.bump();
                continue;
            }
            ',' => {
                cursor.bump();
                TokenKind::Comma
            }
            '=' => {
                cursor.bump();
                TokenKind::Equals
            }
            '"' => {
                cursor.bump();
                TokenKind::Str(lex_string(&mut cursor, loc)?)
            }
            // A leading '-' is kept so the version parser can report the
            // negative component instead of an unexpected character.
            c if c.is_ascii_digit() || c == '-' => {
                let mut text = String::new();
                if c == '-' {
                    cursor.bump();
                    text.push('-');
                }
                text.push_str(&cursor.take_while(|c| c.is_ascii_alphanumeric() || c == '.'));
                TokenKind::Version(text)
            }
            c if c.is_alphabetic() || c == '_' => {
                TokenKind::Ident(cursor.take_while(|c| c.is_alphanumeric() || c == '_'))
            }
            other => return Err(syntax_error(loc, format!("unexpected character '{other}'"))),
        };
        tokens.push(Token { kind, loc });
    }

    Ok(tokens)
}

fn lex_string(cursor: &mut Cursor<'_>, open: SourceLoc) -> Result<String> {
    let mut value = String::new();
    loop {
        match cursor.bump() {
            None => return Err(syntax_error(open, "unterminated string literal")),
            Some('"') => return Ok(value),
            Some('\\') => match cursor.bump() {
                Some('"') => value.push('"'),
                Some('\\') => value.push('\\'),
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some(other) => {
                    return Err(syntax_error(
                        cursor.loc,
                        format!("unknown escape sequence '\\{other}'"),
                    ))
                }
                None => return Err(syntax_error(open, "unterminated string literal")),
            },
            Some(c) => value.push(c),
        }
    }
}
