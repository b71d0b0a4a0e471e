//! Lexer for list-file source.
//!
//! Uses logos for the fast path. Bracket arguments and comments need a
//! matching number of `=` in their closer, which a regular language can't
//! express, so those are finished in callbacks.
//!
//! The lexer never fails. Bad characters, unterminated brackets and
//! unterminated strings come out as [`TokenKind::Invalid`] and are left for
//! the assembler to reject.

use std::borrow::Cow;

use logos::{Lexer, Logos, SpannedIter};

use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentForm {
    Line,
    Bracket,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[regex(r"[ \t]+")]
    Space,

    #[regex(r"\r?\n")]
    Newline,

    #[token("#", comment)]
    Comment(CommentForm),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", priority = 5)]
    Identifier,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    // A leading `[=*` is fine as long as no second `[` follows it.
    #[regex(r#"([^\s()#"\\\[]|\\[^\r\n]|\[=*([^\s()#"\\\[=]|\\[^\r\n]))([^\s()#"\\]|\\[^\r\n])*"#)]
    #[regex(r"\[=*")]
    Unquoted,

    #[regex(r#""([^"\\]|\\[\s\S])*""#)]
    Quoted,

    #[regex(r#""([^"\\]|\\[\s\S])*"#)]
    UnterminatedQuoted,

    #[regex(r"\[=*\[", bracket)]
    Bracket,
}

/// Number of `=` in a bracket opener at the start of `s`, if there is one.
fn bracket_opener(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('[')?;
    let equals = rest.bytes().take_while(|b| *b == b'=').count();
    rest[equals..].starts_with('[').then_some(equals)
}

/// Consume up to and including the `]=*]` closer. Returns false (after
/// swallowing the rest of the input) when the closer is missing.
fn close_bracket(lex: &mut Lexer<RawToken>, equals: usize) -> bool {
    let closer = format!("]{}]", "=".repeat(equals));
    match lex.remainder().find(&closer) {
        Some(at) => {
            lex.bump(at + closer.len());
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

fn bracket(lex: &mut Lexer<RawToken>) -> bool {
    let equals = lex.slice().len() - 2;
    close_bracket(lex, equals)
}

fn comment(lex: &mut Lexer<RawToken>) -> Option<CommentForm> {
    let rest = lex.remainder();
    if let Some(equals) = bracket_opener(rest) {
        lex.bump(equals + 2);
        return close_bracket(lex, equals).then_some(CommentForm::Bracket);
    }
    let line = rest.find(['\r', '\n']).unwrap_or(rest.len());
    lex.bump(line);
    Some(CommentForm::Line)
}

/// Content between the delimiters of a bracket argument. A newline right
/// after the opener is not part of the content.
fn bracket_content(slice: &str) -> &str {
    let open = bracket_opener(slice).map(|equals| equals + 2).unwrap_or(0);
    let inner = slice.get(open..slice.len().saturating_sub(open)).unwrap_or("");
    inner
        .strip_prefix("\r\n")
        .or_else(|| inner.strip_prefix('\n'))
        .unwrap_or(inner)
}

/// Content between the quotes of a quoted argument, with `\`-newline line
/// continuations removed. Other escapes are kept as written.
fn quoted_content(slice: &str) -> Cow<'_, str> {
    let inner = slice.get(1..slice.len().saturating_sub(1)).unwrap_or("");
    if !inner.contains("\\\n") && !inner.contains("\\\r\n") {
        return Cow::Borrowed(inner);
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('\n') => {
                chars.next();
            }
            Some('\r') => {
                chars.next();
                if chars.peek() == Some(&'\n') {
                    chars.next();
                } else {
                    out.push_str("\\\r");
                }
            }
            Some(&next) => {
                chars.next();
                out.push(c);
                out.push(next);
            }
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Lazy token stream over a source string.
pub struct Tokens<'src> {
    source: &'src str,
    inner: SpannedIter<'src, RawToken>,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let (result, span) = self.inner.next()?;
            let slice = &self.source[span.clone()];
            let (kind, text): (TokenKind, Cow<'_, str>) = match result {
                Ok(RawToken::Comment(CommentForm::Line)) => continue,
                Ok(RawToken::Comment(CommentForm::Bracket)) => {
                    (TokenKind::CommentBracket, slice.into())
                }
                Ok(RawToken::Space) => (TokenKind::Space, slice.into()),
                Ok(RawToken::Newline) => (TokenKind::Newline, slice.into()),
                Ok(RawToken::Identifier) => (TokenKind::Identifier, slice.into()),
                Ok(RawToken::ParenOpen) => (TokenKind::ParenOpen, slice.into()),
                Ok(RawToken::ParenClose) => (TokenKind::ParenClose, slice.into()),
                Ok(RawToken::Unquoted) => (TokenKind::ArgumentUnquoted, slice.into()),
                Ok(RawToken::Quoted) => (TokenKind::ArgumentQuoted, quoted_content(slice)),
                Ok(RawToken::Bracket) => {
                    (TokenKind::ArgumentBracket, bracket_content(slice).into())
                }
                Ok(RawToken::UnterminatedQuoted) | Err(()) => (TokenKind::Invalid, slice.into()),
            };
            return Some(Token::new(kind, text).with_span(span));
        }
    }
}

/// Tokenize list-file source.
pub fn tokenize(source: &str) -> Tokens<'_> {
    Tokens {
        source,
        inner: RawToken::lexer(source).spanned(),
    }
}
