//! Token types shared by the lexer and the assembler.

use std::fmt;
use std::ops::Range;

/// Byte range into the source text.
pub type Span = Range<usize>;

/// Classification of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Space,
    Newline,
    CommentBracket,
    Identifier,
    ParenOpen,
    ParenClose,
    ArgumentUnquoted,
    ArgumentQuoted,
    ArgumentBracket,
    /// Bad character, unterminated bracket, or unterminated string.
    Invalid,
}

impl TokenKind {
    /// Every kind, in declaration order.
    pub const ALL: [TokenKind; 10] = [
        TokenKind::Space,
        TokenKind::Newline,
        TokenKind::CommentBracket,
        TokenKind::Identifier,
        TokenKind::ParenOpen,
        TokenKind::ParenClose,
        TokenKind::ArgumentUnquoted,
        TokenKind::ArgumentQuoted,
        TokenKind::ArgumentBracket,
        TokenKind::Invalid,
    ];

    /// True for the three argument kinds.
    pub fn is_argument(self) -> bool {
        matches!(
            self,
            TokenKind::ArgumentUnquoted | TokenKind::ArgumentQuoted | TokenKind::ArgumentBracket
        )
    }

    /// Upper-case label used in test files and debug output.
    pub fn label(self) -> &'static str {
        match self {
            TokenKind::Space => "SPACE",
            TokenKind::Newline => "NEWLINE",
            TokenKind::CommentBracket => "COMMENT",
            TokenKind::Identifier => "IDENT",
            TokenKind::ParenOpen => "LPAREN",
            TokenKind::ParenClose => "RPAREN",
            TokenKind::ArgumentUnquoted => "UNQUOTED",
            TokenKind::ArgumentQuoted => "QUOTED",
            TokenKind::ArgumentBracket => "BRACKET",
            TokenKind::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified span of source text.
///
/// For the argument kinds `text` is already stripped of its quotes or
/// bracket delimiters, and quoted text has its line continuations removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Build a token with no source location.
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            span: 0..0,
        }
    }

    /// Attach a source span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Space | TokenKind::Newline | TokenKind::ParenOpen | TokenKind::ParenClose => {
                write!(f, "{}", self.kind)
            }
            kind => write!(f, "{}({})", kind, self.text),
        }
    }
}
