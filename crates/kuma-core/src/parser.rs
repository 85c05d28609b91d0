// crates/kuma-core/src/parser.rs - Command line tokenizer
//
// The console grammar is intentionally flat: a command name followed by
// whitespace-separated tokens. No quoting, escaping or expansion.

use crate::command;

/// A tokenised command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// First token exactly as typed (empty for a blank line)
    pub name: String,
    /// Remaining tokens in order
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Lookup key for the registry
    pub fn key(&self) -> String {
        command::normalize(&self.name)
    }
}

/// Split a raw line into name and arguments
///
/// A blank line yields an empty name, which the registry never recognises.
pub fn parse(line: &str) -> ParsedCommand {
    let mut tokens = line.split_whitespace().map(str::to_string);
    let name = tokens.next().unwrap_or_default();

    ParsedCommand {
        name,
        args: tokens.collect(),
    }
}
