//! cmlint-kernel: the core of cmlint.
//!
//! This crate provides:
//!
//! - **Lexer**: Tokenizes list-file source using logos
//! - **Assembler**: Rebuilds the token stream into `(name, arguments)` commands
//! - **Rules**: A registry of pure checks evaluated over the assembled commands
//! - **Linter**: The driver tying the three together, configured from TOML
//!
//! The script is never evaluated. Commands are re-assembled structurally and
//! linted as written.

pub mod assembler;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod lexer;
pub mod linter;
pub mod rules;
pub mod token;

pub use assembler::{assemble, parse};
pub use command::{Command, CommandSequence};
pub use config::LintConfig;
pub use error::ParseError;
pub use linter::{LintReport, Linter};
pub use rules::{Rule, RuleRegistry, Verdict};
pub use token::{Span, Token, TokenKind};
