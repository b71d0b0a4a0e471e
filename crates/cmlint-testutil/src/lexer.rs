//! Lexer test file parser and runner.
//!
//! Parses `tests/lexer/tokens.txt`. One case per line:
//!
//! ```text
//! foo(a "b c")  =>  IDENT(foo) LPAREN IDENT(a) SPACE QUOTED(b c) RPAREN
//! ```
//!
//! Blank lines and lines starting with `//` are ignored. In the input, `\n`,
//! `\r` and `\t` stand for the control characters and `\\` for a backslash.

use cmlint_kernel::lexer::tokenize;
use cmlint_kernel::{Token, TokenKind};

use crate::{TestResult, TestSummary};

/// A single lexer test case.
#[derive(Debug, Clone)]
pub struct LexerTestCase {
    /// Line number in the file (1-indexed).
    pub line: usize,
    /// Input with escapes resolved.
    pub input: String,
    /// Expected token listing.
    pub expected: String,
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Format one token the way the test file spells it.
pub fn format_token(token: &Token) -> String {
    match token.kind {
        TokenKind::Space | TokenKind::Newline | TokenKind::ParenOpen | TokenKind::ParenClose => {
            token.kind.label().to_string()
        }
        kind => format!(
            "{}({})",
            kind.label(),
            token.text.replace('\n', "\\n").replace('\r', "\\r")
        ),
    }
}

/// Format a whole token stream, space separated.
pub fn format_tokens(source: &str) -> String {
    tokenize(source)
        .map(|t| format_token(&t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the tokens.txt format into test cases.
pub fn parse_lexer_tests(content: &str) -> Vec<LexerTestCase> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                return None;
            }
            let (input, expected) = line.split_once("=>")?;
            Some(LexerTestCase {
                line: i + 1,
                input: unescape(input.trim()),
                expected: expected.split_whitespace().collect::<Vec<_>>().join(" "),
            })
        })
        .collect()
}

impl LexerTestCase {
    pub fn run(&self) -> TestResult {
        let actual = format_tokens(&self.input);
        let normalized = actual.split_whitespace().collect::<Vec<_>>().join(" ");
        TestResult::compare(&self.expected, normalized)
    }
}

/// Run all lexer test cases and return a summary.
pub fn run_lexer_tests(cases: &[LexerTestCase]) -> TestSummary {
    let mut summary = TestSummary::new();
    for case in cases {
        summary.record(format!("{:?}", case.input), case.line, case.run());
    }
    summary
}
