// crates/kuma-core/src/args.rs - Flag-style argument parsing for handlers
//
// The dispatcher hands every handler the raw token list; handlers that take
// flags ("-n", "-p", "-over", ...) use `FlagArgs` to interpret them.
//
// GRAMMAR:
//   args  := (flag value+)*
//   flag  := "-" letter+
//   value := any token that is not a flag
//
// Consecutive value tokens are joined with a single space, so
// `task-create -n Buy milk` names the task "Buy milk". A repeated flag
// keeps the last value.

use indexmap::IndexMap;
use std::str::FromStr;
use thiserror::Error;

use crate::i18n::Message;

/// Errors produced while interpreting handler arguments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgError {
    #[error("Unrecognized argument {0}")]
    UnknownFlag(String),

    #[error("Argument {0} requires a value")]
    MissingValue(String),

    #[error("Missing required argument {0}")]
    MissingFlag(String),

    #[error("Unexpected argument {0}")]
    UnexpectedToken(String),

    #[error("Invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },
}

impl ArgError {
    pub fn message(&self) -> Message<'_> {
        match self {
            Self::UnknownFlag(flag) => Message::UnknownFlag(flag),
            Self::MissingValue(flag) => Message::MissingValue(flag),
            Self::MissingFlag(flag) => Message::MissingFlag(flag),
            Self::UnexpectedToken(token) => Message::UnexpectedToken(token),
            Self::InvalidValue { flag, value } => Message::InvalidValue { flag, value },
        }
    }
}

/// Result type for argument parsing
pub type ArgResult<T> = Result<T, ArgError>;

/// Parsed flag values, in the order they were given
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagArgs {
    values: IndexMap<String, String>,
}

impl FlagArgs {
    /// Parse `args`, accepting only the flags listed in `allowed`
    pub fn parse(args: &[String], allowed: &[&str]) -> ArgResult<Self> {
        let mut values: IndexMap<String, String> = IndexMap::new();
        let mut current: Option<(String, Vec<&str>)> = None;

        for token in args {
            if is_flag(token) {
                if let Some((flag, parts)) = current.take() {
                    values.insert(flag.clone(), join_value(flag, parts)?);
                }
                if !allowed.contains(&token.as_str()) {
                    return Err(ArgError::UnknownFlag(token.clone()));
                }
                current = Some((token.clone(), Vec::new()));
            } else {
                match current.as_mut() {
                    Some((_, parts)) => parts.push(token.as_str()),
                    None => return Err(ArgError::UnexpectedToken(token.clone())),
                }
            }
        }

        if let Some((flag, parts)) = current.take() {
            values.insert(flag.clone(), join_value(flag, parts)?);
        }

        Ok(Self { values })
    }

    /// Value of an optional flag
    pub fn get(&self, flag: &str) -> Option<&str> {
        self.values.get(flag).map(String::as_str)
    }

    /// Value of a required flag
    pub fn require(&self, flag: &str) -> ArgResult<&str> {
        self.get(flag)
            .ok_or_else(|| ArgError::MissingFlag(flag.to_string()))
    }

    /// Parse an optional flag's value with `FromStr`
    pub fn parse_value<T: FromStr>(&self, flag: &str) -> ArgResult<Option<T>> {
        match self.get(flag) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| ArgError::InvalidValue {
                flag: flag.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// Parse a required flag's value with `FromStr`
    pub fn require_value<T: FromStr>(&self, flag: &str) -> ArgResult<T> {
        self.parse_value(flag)?
            .ok_or_else(|| ArgError::MissingFlag(flag.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse a console boolean ("true"/"false", plus a few common spellings)
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "是" => Some(true),
        "false" | "no" | "n" | "0" | "否" => Some(false),
        _ => None,
    }
}

fn is_flag(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some('-') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
}

fn join_value(flag: String, parts: Vec<&str>) -> ArgResult<String> {
    if parts.is_empty() {
        return Err(ArgError::MissingValue(flag));
    }
    Ok(parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_simple_flags() {
        let args = FlagArgs::parse(&tokens("-n Foo -p Bar"), &["-n", "-p"]).unwrap();
        assert_eq!(args.get("-n"), Some("Foo"));
        assert_eq!(args.get("-p"), Some("Bar"));
        assert_eq!(args.get("-d"), None);
    }

    #[test]
    fn test_multi_word_values_are_joined() {
        let args = FlagArgs::parse(&tokens("-n Buy oat milk -d soon"), &["-n", "-d"]).unwrap();
        assert_eq!(args.get("-n"), Some("Buy oat milk"));
        assert_eq!(args.get("-d"), Some("soon"));
    }

    #[test]
    fn test_long_flag_names() {
        let args = FlagArgs::parse(&tokens("-over true"), &["-over"]).unwrap();
        assert_eq!(args.get("-over"), Some("true"));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = FlagArgs::parse(&tokens("-x 1"), &["-n"]).unwrap_err();
        assert_eq!(err, ArgError::UnknownFlag("-x".to_string()));
    }

    #[test]
    fn test_dangling_flag_rejected() {
        let err = FlagArgs::parse(&tokens("-n Foo -p"), &["-n", "-p"]).unwrap_err();
        assert_eq!(err, ArgError::MissingValue("-p".to_string()));

        let err = FlagArgs::parse(&tokens("-n -p Bar"), &["-n", "-p"]).unwrap_err();
        assert_eq!(err, ArgError::MissingValue("-n".to_string()));
    }

    #[test]
    fn test_leading_positional_rejected() {
        let err = FlagArgs::parse(&tokens("Foo -n Bar"), &["-n"]).unwrap_err();
        assert_eq!(err, ArgError::UnexpectedToken("Foo".to_string()));
    }

    #[test]
    fn test_typed_values() {
        let args = FlagArgs::parse(&tokens("-i 42 -s x"), &["-i", "-s"]).unwrap();
        assert_eq!(args.require_value::<u64>("-i").unwrap(), 42);
        assert!(matches!(
            args.parse_value::<u64>("-s"),
            Err(ArgError::InvalidValue { .. })
        ));
        assert_eq!(
            args.require_value::<u64>("-k"),
            Err(ArgError::MissingFlag("-k".to_string()))
        );
    }

    #[test]
    fn test_negative_number_is_a_value() {
        let args = FlagArgs::parse(&tokens("-v -5"), &["-v"]).unwrap();
        assert_eq!(args.get("-v"), Some("-5"));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
