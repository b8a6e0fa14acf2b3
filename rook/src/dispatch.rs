//! Command-line dispatch: token parsing, binding, fallback resolution,
//! and invocation of the matched command.
//!
//! Tokenization and option matching are delegated to the clap builder;
//! the framework owns metadata, arity, typed validation, precedence,
//! and the console-result contract.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches};
use tracing::debug;

use crate::command::{Command, ConsoleResult};
use crate::error::{Error, Result};
use crate::metadata::{ArgumentSpec, Arity, OptionSpec, ValueType};
use crate::registry::{Registry, CONFIG_OPTION, HELP_OPTION};
use crate::resolver;
use crate::value::{BoundValues, Value};

/// Environment variable consulted for the configuration-file path when
/// `--config` is not given.
pub const CONFIG_ENVIRONMENT: &str = "ROOK_CONFIG";

/// Program name shown in usage text.
const PROGRAM: &str = "rook";

/// Parse `argv`, resolve values, and run the matched command.
///
/// The first token names the command; the rest are parsed against its
/// metadata. Shape errors (unknown command or option, positional
/// arity) return [`ConsoleResult::Invalid`] without invoking; content
/// errors (type, config, missing required) return
/// [`ConsoleResult::Failure`]. A successful invocation's own result is
/// propagated unchanged.
pub fn dispatch(
    registry: &Registry,
    argv: &[String],
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    error: &mut dyn Write,
) -> ConsoleResult {
    let Some((name, rest)) = argv.split_first() else {
        let _ = write!(error, "{}", listing(registry));
        return ConsoleResult::Invalid;
    };

    if name == "help" || name == "--help" || name == "-h" {
        return dispatch_help(registry, rest, output, error);
    }

    let resolved = match registry.lookup(name) {
        Ok(resolved) => resolved,
        Err(e) => {
            let _ = writeln!(error, "{e}");
            return ConsoleResult::Invalid;
        }
    };
    let command = resolved.command;
    if resolved.former_used {
        let _ = writeln!(
            error,
            "warning: {name} is deprecated, use {}",
            command.name()
        );
    }
    debug!(command = command.name(), "dispatching");

    let arguments = command.arguments();
    let options = command.options();

    let matches = match build_parser(command.as_ref(), &arguments, &options)
        .try_get_matches_from(rest.iter().cloned())
    {
        Ok(matches) => matches,
        Err(e) => {
            let _ = writeln!(error, "{}", convert_token_error(&e));
            return ConsoleResult::Invalid;
        }
    };

    if matches.get_flag(HELP_OPTION) {
        let _ = write!(output, "{}", help_text(command.as_ref(), &arguments, &options));
        return ConsoleResult::Okay;
    }

    let mut bound = match bind_cli(&arguments, &options, &matches) {
        Ok(bound) => bound,
        Err(e) => {
            let _ = writeln!(error, "{e}");
            return ConsoleResult::Failure;
        }
    };

    let entries = match load_config(&matches) {
        Ok(entries) => entries,
        Err(e) => {
            let _ = writeln!(error, "{e}");
            return ConsoleResult::Failure;
        }
    };

    if let Err(e) = resolver::resolve(&arguments, &options, &mut bound, &entries, input) {
        let _ = writeln!(error, "{e}");
        return match e {
            Error::BadArity { .. } | Error::Usage(_) => ConsoleResult::Invalid,
            _ => ConsoleResult::Failure,
        };
    }

    command.invoke(&bound, output, error)
}

fn dispatch_help(
    registry: &Registry,
    rest: &[String],
    output: &mut dyn Write,
    error: &mut dyn Write,
) -> ConsoleResult {
    match rest.first() {
        None => {
            let _ = write!(output, "{}", listing(registry));
            ConsoleResult::Okay
        }
        Some(topic) => match registry.lookup(topic) {
            Ok(resolved) => {
                let command = resolved.command;
                let arguments = command.arguments();
                let options = command.options();
                let _ = write!(output, "{}", help_text(command.as_ref(), &arguments, &options));
                ConsoleResult::Okay
            }
            Err(e) => {
                let _ = writeln!(error, "{e}");
                ConsoleResult::Invalid
            }
        },
    }
}

fn build_parser(
    command: &dyn Command,
    arguments: &[ArgumentSpec],
    options: &[OptionSpec],
) -> clap::Command {
    let mut cmd = clap::Command::new(command.name().to_owned())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true);

    cmd = cmd.arg(
        Arg::new(HELP_OPTION)
            .long(HELP_OPTION)
            .short('h')
            .action(ArgAction::SetTrue),
    );
    cmd = cmd.arg(
        Arg::new(CONFIG_OPTION)
            .long(CONFIG_OPTION)
            .short('c')
            .action(ArgAction::Set)
            .value_name("PATH"),
    );

    for option in options {
        let mut arg = Arg::new(option.long).long(option.long);
        if let Some(short) = option.short {
            arg = arg.short(short);
        }
        arg = if let ValueType::Switch = option.value {
            arg.action(ArgAction::SetTrue)
        } else if option.repeated {
            arg.action(ArgAction::Append)
                .value_name(option.value.name().to_uppercase())
        } else {
            arg.action(ArgAction::Set)
                .value_name(option.value.name().to_uppercase())
        };
        cmd = cmd.arg(arg);
    }

    for argument in arguments {
        let arg = Arg::new(argument.name).required(false);
        let arg = match argument.arity {
            Arity::Exactly(0) => continue,
            Arity::Exactly(n) => arg.num_args(n),
            Arity::Optional => arg.num_args(1),
            Arity::Unlimited => arg.num_args(0..),
        };
        cmd = cmd.arg(arg);
    }

    cmd
}

fn convert_token_error(err: &clap::Error) -> Error {
    use clap::error::{ContextKind, ContextValue, ErrorKind};

    match err.kind() {
        ErrorKind::TooManyValues
        | ErrorKind::TooFewValues
        | ErrorKind::WrongNumberOfValues
        | ErrorKind::MissingRequiredArgument => {
            let argument = match err.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(s)) => s.clone(),
                _ => String::from("positional"),
            };
            Error::BadArity {
                argument,
                reason: "wrong number of positional values".to_owned(),
            }
        }
        _ => Error::Usage(err.to_string().trim_end().to_owned()),
    }
}

fn bind_cli(
    arguments: &[ArgumentSpec],
    options: &[OptionSpec],
    matches: &ArgMatches,
) -> Result<BoundValues> {
    let mut bound = BoundValues::new();

    for argument in arguments {
        match argument.arity {
            Arity::Exactly(0) => {}
            Arity::Exactly(1) | Arity::Optional => {
                if let Some(raw) = matches.get_one::<String>(argument.name) {
                    let value = argument.value.bind(argument.name, raw)?;
                    bound.bind(argument.name, value);
                }
            }
            Arity::Exactly(_) | Arity::Unlimited => {
                if let Some(raws) = matches.get_many::<String>(argument.name) {
                    let items: Vec<String> = raws.cloned().collect();
                    for item in &items {
                        argument.value.bind(argument.name, item)?;
                    }
                    bound.bind(argument.name, Value::List(items));
                }
            }
        }
    }

    for option in options {
        if let ValueType::Switch = option.value {
            if matches.get_flag(option.long) {
                bound.bind(option.long, Value::Switch(true));
            }
        } else if option.repeated {
            if let Some(raws) = matches.get_many::<String>(option.long) {
                let items: Vec<String> = raws.cloned().collect();
                for item in &items {
                    option.value.bind(option.long, item)?;
                }
                bound.bind(option.long, Value::List(items));
            }
        } else if let Some(raw) = matches.get_one::<String>(option.long) {
            let value = option.value.bind(option.long, raw)?;
            bound.bind(option.long, value);
        }
    }

    Ok(bound)
}

fn load_config(matches: &ArgMatches) -> Result<Vec<resolver::ConfigEntry>> {
    let path = matches
        .get_one::<String>(CONFIG_OPTION)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENVIRONMENT).map(PathBuf::from));

    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let text = fs::read_to_string(&path).map_err(|e| Error::ConfigParse {
        line: 0,
        reason: format!("cannot read {}: {e}", path.display()),
    })?;
    debug!(path = %path.display(), "loaded config file");
    resolver::parse_config(&text)
}

fn help_text(
    command: &dyn Command,
    arguments: &[ArgumentSpec],
    options: &[OptionSpec],
) -> String {
    let mut usage = format!("Usage: {PROGRAM} {} [-h] [-c PATH]", command.name());
    for option in options {
        let spelling = match option.short {
            Some(short) => format!("-{short}"),
            None => format!("--{}", option.long),
        };
        let mut fragment = if option.value.takes_value() {
            format!("{spelling} {}", option.value.name().to_uppercase())
        } else {
            spelling
        };
        if option.repeated {
            fragment.push_str("...");
        }
        if option.required {
            let _ = write!(usage, " {fragment}");
        } else {
            let _ = write!(usage, " [{fragment}]");
        }
    }
    for argument in arguments {
        match argument.arity {
            Arity::Exactly(0) => {}
            Arity::Exactly(1) if argument.input_fallback => {
                let _ = write!(usage, " [{}]", argument.name);
            }
            Arity::Exactly(1) => {
                let _ = write!(usage, " {}", argument.name);
            }
            Arity::Exactly(n) => {
                let _ = write!(usage, " {}{{{n}}}", argument.name);
            }
            Arity::Optional => {
                let _ = write!(usage, " [{}]", argument.name);
            }
            Arity::Unlimited => {
                let _ = write!(usage, " [{}]...", argument.name);
            }
        }
    }

    let mut text = format!("{usage}\n\n{}\n", command.description());

    if !arguments.is_empty() {
        text.push_str("\nArguments:\n");
        for argument in arguments {
            let _ = writeln!(text, "  {:<24}{}", argument.name, argument.description);
        }
    }

    text.push_str("\nOptions:\n");
    let _ = writeln!(
        text,
        "  {:<24}Get a description and instructions for this command.",
        "-h, --help"
    );
    let _ = writeln!(
        text,
        "  {:<24}The path to the configuration settings file.",
        "-c, --config PATH"
    );
    for option in options {
        let spelling = match option.short {
            Some(short) => format!("-{short}, --{}", option.long),
            None => format!("    --{}", option.long),
        };
        let spelling = if option.value.takes_value() {
            format!("{spelling} {}", option.value.name().to_uppercase())
        } else {
            spelling
        };
        let _ = writeln!(text, "  {spelling:<24}{}", option.description);
    }

    text
}

fn listing(registry: &Registry) -> String {
    let mut categories: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();
    for command in registry.commands() {
        categories
            .entry(command.category())
            .or_default()
            .push((command.name(), command.description()));
    }

    let mut text = format!(
        "Usage: {PROGRAM} COMMAND [ARGS]...\n\n\
         Info: The {PROGRAM} commands are:\n"
    );
    for (category, mut commands) in categories {
        commands.sort_unstable();
        let _ = writeln!(text, "\n{category}:");
        for (name, description) in commands {
            let _ = writeln!(text, "  {name:<24}{description}");
        }
    }
    text
}
