//! Static argument and option metadata declared by each command.

use crate::error::{Error, Result};
use crate::value::Value;

/// How many positional tokens an argument consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many tokens.
    Exactly(usize),
    /// Zero or one token.
    Optional,
    /// All remaining tokens. Must be the last declared argument.
    Unlimited,
}

/// A positional argument declaration.
#[derive(Clone, Debug)]
pub struct ArgumentSpec {
    /// Upper-case symbolic name, unique within the command.
    pub name: &'static str,
    /// Token count.
    pub arity: Arity,
    /// Parser applied to each token.
    pub value: ValueType,
    /// Whether an absent value may be read from the input stream.
    pub input_fallback: bool,
    /// Help text.
    pub description: &'static str,
}

impl ArgumentSpec {
    /// A single-token argument.
    #[must_use]
    pub const fn one(name: &'static str, value: ValueType, description: &'static str) -> Self {
        Self {
            name,
            arity: Arity::Exactly(1),
            value,
            input_fallback: false,
            description,
        }
    }

    /// An argument that may be omitted.
    #[must_use]
    pub const fn optional(name: &'static str, value: ValueType, description: &'static str) -> Self {
        Self {
            name,
            arity: Arity::Optional,
            value,
            input_fallback: false,
            description,
        }
    }

    /// An argument consuming all remaining tokens.
    #[must_use]
    pub const fn rest(name: &'static str, value: ValueType, description: &'static str) -> Self {
        Self {
            name,
            arity: Arity::Unlimited,
            value,
            input_fallback: false,
            description,
        }
    }

    /// Allow the value to be read from the input stream when absent.
    #[must_use]
    pub const fn or_input(mut self) -> Self {
        self.input_fallback = true;
        self
    }
}

/// A named option declaration.
#[derive(Clone, Debug)]
pub struct OptionSpec {
    /// Long form, also the configuration-file key.
    pub long: &'static str,
    /// Optional single-character short form.
    pub short: Option<char>,
    /// Parser applied to the value token.
    pub value: ValueType,
    /// Whether some source must supply a value.
    pub required: bool,
    /// Whether the option may occur more than once.
    pub repeated: bool,
    /// Compiled default, as literal text under `value`.
    pub default: Option<&'static str>,
    /// Help text.
    pub description: &'static str,
}

impl OptionSpec {
    /// A value-carrying option.
    #[must_use]
    pub const fn value(
        long: &'static str,
        short: Option<char>,
        value: ValueType,
        description: &'static str,
    ) -> Self {
        Self {
            long,
            short,
            value,
            required: false,
            repeated: false,
            default: None,
            description,
        }
    }

    /// A boolean switch taking no value token.
    #[must_use]
    pub const fn switch(long: &'static str, short: Option<char>, description: &'static str) -> Self {
        Self::value(long, short, ValueType::Switch, description)
    }

    /// Set the compiled default.
    #[must_use]
    pub const fn default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    /// Mark the option required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allow repeated occurrences, binding a list.
    #[must_use]
    pub const fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }
}

/// The value grammar of an argument or option.
#[derive(Clone, Copy)]
pub enum ValueType {
    /// Presence-only boolean.
    Switch,
    /// Unsigned decimal integer.
    Integer,
    /// Free text.
    Text,
    /// Domain value validated by an external parser.
    Typed {
        /// Human-readable type name for diagnostics and help.
        name: &'static str,
        /// Validator over the raw token.
        check: fn(&str) -> std::result::Result<(), String>,
    },
}

impl ValueType {
    /// A domain value type backed by `check`.
    #[must_use]
    pub const fn typed(
        name: &'static str,
        check: fn(&str) -> std::result::Result<(), String>,
    ) -> Self {
        Self::Typed { name, check }
    }

    /// Type name shown in help output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Switch => "bool",
            Self::Integer => "number",
            Self::Text => "text",
            Self::Typed { name, .. } => name,
        }
    }

    /// Whether the option consumes a value token.
    #[must_use]
    pub const fn takes_value(&self) -> bool {
        !matches!(self, Self::Switch)
    }

    /// Validate a raw token and produce its bound value.
    pub fn bind(&self, name: &str, raw: &str) -> Result<Value> {
        match self {
            Self::Switch => match raw {
                "true" | "1" | "yes" => Ok(Value::Switch(true)),
                "false" | "0" | "no" => Ok(Value::Switch(false)),
                _ => Err(type_error(name, raw, "expected a boolean")),
            },
            Self::Integer => raw
                .parse::<u64>()
                .map(Value::Integer)
                .map_err(|_| type_error(name, raw, "expected an unsigned integer")),
            Self::Text => Ok(Value::Text(raw.to_owned())),
            Self::Typed { check, .. } => match check(raw) {
                Ok(()) => Ok(Value::Text(raw.to_owned())),
                Err(reason) => Err(type_error(name, raw, &reason)),
            },
        }
    }
}

impl std::fmt::Debug for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn type_error(name: &str, value: &str, reason: &str) -> Error {
    Error::TypeParse {
        name: name.to_owned(),
        value: value.to_owned(),
        reason: reason.to_owned(),
    }
}
