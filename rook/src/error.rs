//! Error types for command registration, resolution, and dispatch.

use std::fmt;

/// Errors raised by the command framework.
///
/// Domain failures inside a command's invoke handler are not represented
/// here; each handler converts them to a console result at its own
/// boundary.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// No command is registered under the requested name.
    UnknownCommand(String),
    /// A command name or former-name alias collides with an existing entry.
    DuplicateName(String),
    /// A command's metadata is internally inconsistent.
    BadDescriptor {
        /// The command whose metadata failed validation.
        command: String,
        /// What was wrong with it.
        reason: String,
    },
    /// Too few or too many positional tokens for a declared argument.
    BadArity {
        /// The argument whose count did not match.
        argument: String,
        /// What was expected versus seen.
        reason: String,
    },
    /// A token does not parse under the declared value type.
    TypeParse {
        /// The argument or option being bound.
        name: String,
        /// The offending token.
        value: String,
        /// The parser's diagnostic.
        reason: String,
    },
    /// A required option had no value from CLI, config, or default.
    MissingRequired(String),
    /// A configuration line could not be parsed or bound.
    ConfigParse {
        /// One-based line number in the configuration input.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// An output format tag is not one of json, xml, info, native.
    UnsupportedFormat(String),
    /// The command line shape was rejected by the token parser.
    Usage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(name) => write!(f, "unknown command: {name}"),
            Self::DuplicateName(name) => {
                write!(f, "command name already registered: {name}")
            }
            Self::BadDescriptor { command, reason } => {
                write!(f, "bad descriptor for {command}: {reason}")
            }
            Self::BadArity { argument, reason } => {
                write!(f, "argument {argument}: {reason}")
            }
            Self::TypeParse {
                name,
                value,
                reason,
            } => {
                write!(f, "invalid value \"{value}\" for {name}: {reason}")
            }
            Self::MissingRequired(option) => {
                write!(f, "required option --{option} was not provided")
            }
            Self::ConfigParse { line, reason } => {
                write!(f, "config line {line}: {reason}")
            }
            Self::UnsupportedFormat(tag) => {
                write!(
                    f,
                    "unsupported format \"{tag}\", expected json, xml, info, or native"
                )
            }
            Self::Usage(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for Error {}

/// A convenient Result type alias for framework operations.
pub type Result<T> = std::result::Result<T, Error>;
