//! Startup-time command registration and name lookup.

use std::collections::BTreeMap;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::metadata::Arity;

/// Long option names injected on every command by the dispatcher.
pub const HELP_OPTION: &str = "help";
/// Configuration-file path option injected on every command.
pub const CONFIG_OPTION: &str = "config";

type Factory = fn() -> Box<dyn Command>;

struct Entry {
    factory: Factory,
    prototype: Box<dyn Command>,
}

/// A successful lookup: a fresh command instance plus how it was named.
pub struct Resolved {
    /// The command, newly constructed.
    pub command: Box<dyn Command>,
    /// Whether the lookup matched the former name rather than the
    /// current one.
    pub former_used: bool,
}

/// The immutable-after-startup mapping from symbolic names to command
/// factories.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
    // Name or former alias -> (entry index, is former alias).
    names: BTreeMap<&'static str, (usize, bool)>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, validating its descriptor.
    ///
    /// Fails with [`Error::DuplicateName`] when the name or former
    /// alias collides with any already-registered name or alias, and
    /// with [`Error::BadDescriptor`] when the metadata is internally
    /// inconsistent (unlimited-arity argument not last, colliding or
    /// reserved option names, malformed defaults).
    pub fn register(&mut self, factory: Factory) -> Result<()> {
        let prototype = factory();
        validate(prototype.as_ref())?;

        let name = prototype.name();
        if self.names.contains_key(name) {
            return Err(Error::DuplicateName(name.to_owned()));
        }
        if let Some(former) = prototype.formerly() {
            if self.names.contains_key(former) {
                return Err(Error::DuplicateName(former.to_owned()));
            }
        }

        let index = self.entries.len();
        self.names.insert(name, (index, false));
        if let Some(former) = prototype.formerly() {
            self.names.insert(former, (index, true));
        }
        self.entries.push(Entry { factory, prototype });
        Ok(())
    }

    /// Construct the command registered under `name`, current or former.
    pub fn lookup(&self, name: &str) -> Result<Resolved> {
        let (index, former_used) = *self
            .names
            .get(name)
            .ok_or_else(|| Error::UnknownCommand(name.to_owned()))?;
        Ok(Resolved {
            command: (self.entries[index].factory)(),
            former_used,
        })
    }

    /// Registered commands in registration order, for help listings.
    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.entries.iter().map(|e| e.prototype.as_ref())
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate(command: &dyn Command) -> Result<()> {
    let name = command.name();
    if name.is_empty() {
        return Err(bad(name, "empty command name"));
    }
    if command.formerly() == Some(name) {
        return Err(Error::DuplicateName(name.to_owned()));
    }

    let arguments = command.arguments();
    let options = command.options();
    let mut seen: Vec<&str> = Vec::new();

    for (position, argument) in arguments.iter().enumerate() {
        if argument.name.is_empty() {
            return Err(bad(name, "empty argument name"));
        }
        if seen.contains(&argument.name) {
            return Err(bad(name, &format!("duplicate name {}", argument.name)));
        }
        seen.push(argument.name);
        if argument.arity == Arity::Unlimited && position + 1 != arguments.len() {
            return Err(bad(
                name,
                &format!("argument {} consumes remaining tokens but is not last", argument.name),
            ));
        }
        if argument.input_fallback && argument.arity != Arity::Exactly(1) {
            return Err(bad(
                name,
                &format!("argument {} reads from input but is not single-valued", argument.name),
            ));
        }
    }

    let mut shorts: Vec<char> = Vec::new();
    for option in &options {
        if option.long.is_empty() {
            return Err(bad(name, "empty option name"));
        }
        if option.long == HELP_OPTION || option.long == CONFIG_OPTION {
            return Err(bad(name, &format!("option {} is reserved", option.long)));
        }
        if seen.contains(&option.long) {
            return Err(bad(name, &format!("duplicate name {}", option.long)));
        }
        seen.push(option.long);
        if let Some(short) = option.short {
            if short == 'h' || short == 'c' {
                return Err(bad(name, &format!("short flag -{short} is reserved")));
            }
            if shorts.contains(&short) {
                return Err(bad(name, &format!("duplicate short flag -{short}")));
            }
            shorts.push(short);
        }
        if option.repeated && !option.value.takes_value() {
            return Err(bad(
                name,
                &format!("switch option {} cannot repeat", option.long),
            ));
        }
        if let Some(default) = option.default {
            option.value.bind(option.long, default).map_err(|e| {
                bad(name, &format!("default for {} does not parse: {e}", option.long))
            })?;
        }
    }

    Ok(())
}

fn bad(command: &str, reason: &str) -> Error {
    Error::BadDescriptor {
        command: command.to_owned(),
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::command::ConsoleResult;
    use crate::metadata::{ArgumentSpec, OptionSpec, ValueType};
    use crate::value::BoundValues;

    struct Probe;

    impl Command for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }
        fn formerly(&self) -> Option<&'static str> {
            Some("peek")
        }
        fn category(&self) -> &'static str {
            "TEST"
        }
        fn description(&self) -> &'static str {
            "Probe the registry."
        }
        fn invoke(
            &self,
            _bound: &BoundValues,
            _output: &mut dyn Write,
            _error: &mut dyn Write,
        ) -> ConsoleResult {
            ConsoleResult::Okay
        }
    }

    struct TrailingFirst;

    impl Command for TrailingFirst {
        fn name(&self) -> &'static str {
            "trailing-first"
        }
        fn category(&self) -> &'static str {
            "TEST"
        }
        fn description(&self) -> &'static str {
            "Unlimited argument declared first."
        }
        fn arguments(&self) -> Vec<ArgumentSpec> {
            vec![
                ArgumentSpec::rest("WORD", ValueType::Text, "words"),
                ArgumentSpec::one("LAST", ValueType::Text, "last"),
            ]
        }
        fn invoke(
            &self,
            _bound: &BoundValues,
            _output: &mut dyn Write,
            _error: &mut dyn Write,
        ) -> ConsoleResult {
            ConsoleResult::Okay
        }
    }

    struct ReservedShort;

    impl Command for ReservedShort {
        fn name(&self) -> &'static str {
            "reserved-short"
        }
        fn category(&self) -> &'static str {
            "TEST"
        }
        fn description(&self) -> &'static str {
            "Uses the reserved help short flag."
        }
        fn options(&self) -> Vec<OptionSpec> {
            vec![OptionSpec::switch("hash", Some('h'), "collides with -h")]
        }
        fn invoke(
            &self,
            _bound: &BoundValues,
            _output: &mut dyn Write,
            _error: &mut dyn Write,
        ) -> ConsoleResult {
            ConsoleResult::Okay
        }
    }

    #[test]
    fn test_lookup_by_current_and_former_name() {
        let mut registry = Registry::new();
        registry.register(|| Box::new(Probe)).unwrap();

        let current = registry.lookup("probe").unwrap();
        assert!(!current.former_used);
        assert_eq!(current.command.name(), "probe");

        let former = registry.lookup("peek").unwrap();
        assert!(former.former_used);
        assert_eq!(former.command.name(), "probe");
    }

    #[test]
    fn test_unknown_command() {
        let registry = Registry::new();
        assert!(matches!(
            registry.lookup("nope"),
            Err(Error::UnknownCommand(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = Registry::new();
        registry.register(|| Box::new(Probe)).unwrap();
        assert!(matches!(
            registry.register(|| Box::new(Probe)),
            Err(Error::DuplicateName(name)) if name == "probe"
        ));
    }

    #[test]
    fn test_unlimited_arity_must_be_last() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.register(|| Box::new(TrailingFirst)),
            Err(Error::BadDescriptor { .. })
        ));
    }

    #[test]
    fn test_reserved_short_flag_rejected() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.register(|| Box::new(ReservedShort)),
            Err(Error::BadDescriptor { .. })
        ));
    }
}
