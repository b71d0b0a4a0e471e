//! S-expression formatting of assembled commands, for test expectations.
//!
//! One command per line: `(name "arg" "arg")`. Arguments are Debug-quoted so
//! literal parens and whitespace stay unambiguous.

use cmlint_kernel::{Command, CommandSequence};

pub fn format_command(command: &Command) -> String {
    let mut out = format!("({}", command.name());
    for arg in command.arguments() {
        out.push(' ');
        out.push_str(&format!("{arg:?}"));
    }
    out.push(')');
    out
}

pub fn format_commands(commands: &CommandSequence) -> String {
    commands
        .iter()
        .map(format_command)
        .collect::<Vec<_>>()
        .join("\n")
}
