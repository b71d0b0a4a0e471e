//! Structural errors raised while assembling commands.
//!
//! Every error is fatal for the run that raised it. There is no resync and
//! no partial command list.

use thiserror::Error;

use crate::token::Span;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An identifier followed a closed command on the same line.
    #[error("expected newline before identifier `{text}`")]
    UnexpectedIdentifier { text: String, span: Span },

    #[error("unexpected '(' outside of a command")]
    UnexpectedOpenParen { span: Span },

    #[error("unexpected ')' outside of a command")]
    UnexpectedCloseParen { span: Span },

    /// A `)` arrived after a command name but before its `(`.
    #[error("unmatched ')'")]
    UnmatchedCloseParen { span: Span },

    /// End of input inside an argument list. `span` covers the command name.
    #[error("unclosed parentheses in `{name}`")]
    UnclosedParens { name: String, span: Span },

    #[error("argument `{text}` outside of command")]
    ArgumentOutsideCommand { text: String, span: Span },

    #[error("bad token encountered: `{text}`")]
    InvalidToken { text: String, span: Span },
}

impl ParseError {
    /// Source location of the offending token.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedIdentifier { span, .. }
            | ParseError::UnexpectedOpenParen { span }
            | ParseError::UnexpectedCloseParen { span }
            | ParseError::UnmatchedCloseParen { span }
            | ParseError::UnclosedParens { span, .. }
            | ParseError::ArgumentOutsideCommand { span, .. }
            | ParseError::InvalidToken { span, .. } => span.clone(),
        }
    }

    /// Stable identifier for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedIdentifier { .. } => "unexpected-identifier",
            ParseError::UnexpectedOpenParen { .. } => "unexpected-open-paren",
            ParseError::UnexpectedCloseParen { .. } => "unexpected-close-paren",
            ParseError::UnmatchedCloseParen { .. } => "unmatched-close-paren",
            ParseError::UnclosedParens { .. } => "unclosed-parens",
            ParseError::ArgumentOutsideCommand { .. } => "argument-outside-command",
            ParseError::InvalidToken { .. } => "invalid-token",
        }
    }
}
