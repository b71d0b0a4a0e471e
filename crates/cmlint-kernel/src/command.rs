//! Assembled commands.

use std::fmt::Write as _;
use std::ops::Index;

use serde::Serialize;

/// One command invocation: a name plus its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    name: String,
    arguments: Vec<String>,
}

impl Command {
    /// Create a command. Returns `None` for an empty name.
    pub fn new(name: impl Into<String>, arguments: Vec<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        Some(Self { name, arguments })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// ASCII case-insensitive name comparison.
    pub fn name_eq_ignore_ascii_case(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other)
    }
}

/// Ordered, read-only output of one assembly run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommandSequence {
    commands: Vec<Command>,
}

impl CommandSequence {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn as_slice(&self) -> &[Command] {
        &self.commands
    }

    /// Plain-text listing, one `Command:` line per command followed by an
    /// indented `Argument:` line per argument.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "Command: {}", command.name);
            for arg in &command.arguments {
                let _ = writeln!(out, "  Argument: {arg}");
            }
        }
        out
    }
}

impl From<Vec<Command>> for CommandSequence {
    fn from(commands: Vec<Command>) -> Self {
        Self::new(commands)
    }
}

impl Index<usize> for CommandSequence {
    type Output = Command;

    fn index(&self, index: usize) -> &Command {
        &self.commands[index]
    }
}

impl<'a> IntoIterator for &'a CommandSequence {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
