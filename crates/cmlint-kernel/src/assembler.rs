//! Command assembler.
//!
//! Rebuilds a flat token stream into [`Command`]s. The machine has two
//! modes (idle, or building a command) plus a paren depth and a flag that
//! records whether a newline has been seen since the last content.
//!
//! [`State::step`] is a pure transition: it takes the state by value and
//! returns the next state with an optional emitted command. [`assemble`]
//! drives it over a whole stream and is all-or-nothing: the first
//! structural error aborts the run.
//!
//! ```text
//!            Identifier (after newline)
//!   ┌──────┐ ─────────────────────────▶ ┌──────────┐
//!   │ Idle │                            │ Building │ ◀─┐ args, nested ( )
//!   └──────┘ ◀───────────────────────── └──────────┘ ──┘
//!             ')' at depth 1, or newline at depth 0
//! ```

use tracing::{debug, trace};

use crate::command::{Command, CommandSequence};
use crate::error::ParseError;
use crate::lexer;
use crate::token::{Span, Token, TokenKind};

/// A command whose name has been read but which has not closed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    pub name: String,
    pub name_span: Span,
    pub arguments: Vec<String>,
    /// Paren depth. 1 means inside the command's own argument list.
    pub depth: usize,
}

impl PendingCommand {
    fn into_command(self) -> Option<Command> {
        Command::new(self.name, self.arguments)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Building(PendingCommand),
}

/// What a single transition produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Emit(Command),
}

impl Effect {
    fn emit(pending: PendingCommand) -> Self {
        match pending.into_command() {
            Some(command) => Effect::Emit(command),
            None => Effect::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub mode: Mode,
    pub saw_newline: bool,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// Start of input counts as following a newline.
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            saw_newline: true,
        }
    }

    fn with(mode: Mode, saw_newline: bool) -> Self {
        Self { mode, saw_newline }
    }

    /// Advance the machine by one token.
    pub fn step(self, token: &Token) -> Result<(State, Effect), ParseError> {
        let State { mode, saw_newline } = self;
        let span = token.span.clone();

        match (token.kind, mode) {
            (TokenKind::Space, mode) => Ok((State::with(mode, saw_newline), Effect::None)),

            (TokenKind::Invalid, _) => Err(ParseError::InvalidToken {
                text: token.text.clone(),
                span,
            }),

            (TokenKind::CommentBracket, mode) => Ok((State::with(mode, false), Effect::None)),

            (TokenKind::Newline, Mode::Building(pending)) if pending.depth == 0 => {
                Ok((State::with(Mode::Idle, true), Effect::emit(pending)))
            }
            (TokenKind::Newline, mode) => Ok((State::with(mode, true), Effect::None)),

            (TokenKind::Identifier, Mode::Idle) if saw_newline => {
                let pending = PendingCommand {
                    name: token.text.clone(),
                    name_span: span,
                    arguments: Vec::new(),
                    depth: 0,
                };
                Ok((State::with(Mode::Building(pending), false), Effect::None))
            }
            (TokenKind::Identifier, Mode::Idle) => Err(ParseError::UnexpectedIdentifier {
                text: token.text.clone(),
                span,
            }),

            (
                TokenKind::Identifier
                | TokenKind::ArgumentUnquoted
                | TokenKind::ArgumentQuoted
                | TokenKind::ArgumentBracket,
                Mode::Building(mut pending),
            ) => {
                pending.arguments.push(token.text.clone());
                Ok((State::with(Mode::Building(pending), saw_newline), Effect::None))
            }
            (
                TokenKind::ArgumentUnquoted | TokenKind::ArgumentQuoted | TokenKind::ArgumentBracket,
                Mode::Idle,
            ) => Err(ParseError::ArgumentOutsideCommand {
                text: token.text.clone(),
                span,
            }),

            (TokenKind::ParenOpen, Mode::Idle) => Err(ParseError::UnexpectedOpenParen { span }),
            (TokenKind::ParenOpen, Mode::Building(mut pending)) => {
                pending.depth += 1;
                if pending.depth > 1 {
                    pending.arguments.push("(".to_string());
                }
                Ok((State::with(Mode::Building(pending), saw_newline), Effect::None))
            }

            (TokenKind::ParenClose, Mode::Idle) => Err(ParseError::UnexpectedCloseParen { span }),
            (TokenKind::ParenClose, Mode::Building(mut pending)) => match pending.depth {
                0 => Err(ParseError::UnmatchedCloseParen { span }),
                1 => Ok((State::with(Mode::Idle, saw_newline), Effect::emit(pending))),
                _ => {
                    pending.depth -= 1;
                    pending.arguments.push(")".to_string());
                    Ok((State::with(Mode::Building(pending), saw_newline), Effect::None))
                }
            },
        }
    }

    /// Close out the machine at end of input.
    pub fn finish(self) -> Result<Option<Command>, ParseError> {
        match self.mode {
            Mode::Idle => Ok(None),
            Mode::Building(pending) if pending.depth == 0 => Ok(pending.into_command()),
            Mode::Building(pending) => Err(ParseError::UnclosedParens {
                name: pending.name,
                span: pending.name_span,
            }),
        }
    }
}

/// Assemble a token stream into a command sequence.
pub fn assemble<I>(tokens: I) -> Result<CommandSequence, ParseError>
where
    I: IntoIterator<Item = Token>,
{
    let mut state = State::new();
    let mut commands = Vec::new();

    for token in tokens {
        trace!(token = %token, "assembler step");
        let (next, effect) = state.step(&token)?;
        if let Effect::Emit(command) = effect {
            debug!(name = command.name(), args = command.arguments().len(), "assembled command");
            commands.push(command);
        }
        state = next;
    }

    if let Some(command) = state.finish()? {
        debug!(name = command.name(), args = command.arguments().len(), "assembled command");
        commands.push(command);
    }

    Ok(CommandSequence::new(commands))
}

/// Tokenize and assemble list-file source.
pub fn parse(source: &str) -> Result<CommandSequence, ParseError> {
    assemble(lexer::tokenize(source))
}
