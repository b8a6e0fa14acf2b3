//! Fallback resolution: CLI values, then configuration file, then
//! compiled defaults, with the input stream standing in for a single
//! absent argument where the command allows it.

use std::io::BufRead;

use tracing::debug;

use crate::error::{Error, Result};
use crate::metadata::{ArgumentSpec, Arity, OptionSpec};
use crate::value::{BoundValues, Value};

/// One `key=value` line from the configuration input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigEntry {
    /// One-based source line number.
    pub line: usize,
    /// Key, matching an option's long name.
    pub key: String,
    /// Raw value text.
    pub value: String,
}

/// Parse line-oriented `key=value` configuration text.
///
/// Blank lines and `#` comments are skipped. Any other line without an
/// `=` separator fails with [`Error::ConfigParse`] naming the line.
pub fn parse_config(text: &str) -> Result<Vec<ConfigEntry>> {
    let mut entries = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(Error::ConfigParse {
                line,
                reason: format!("expected key=value, found \"{trimmed}\""),
            });
        };
        entries.push(ConfigEntry {
            line,
            key: key.trim().to_owned(),
            value: value.trim().to_owned(),
        });
    }
    Ok(entries)
}

/// Fill `bound` from the lower-precedence sources and enforce arity and
/// required-option rules.
///
/// Values already present (bound from CLI tokens) are never revisited.
/// Per option the order is strictly CLI, then configuration, then the
/// compiled default; a required option with no value from any source
/// fails with [`Error::MissingRequired`].
pub fn resolve(
    arguments: &[ArgumentSpec],
    options: &[OptionSpec],
    bound: &mut BoundValues,
    config: &[ConfigEntry],
    input: &mut dyn BufRead,
) -> Result<()> {
    for argument in arguments {
        resolve_argument(argument, bound, input)?;
    }
    for option in options {
        resolve_option(option, bound, config)?;
    }
    Ok(())
}

fn resolve_argument(
    argument: &ArgumentSpec,
    bound: &mut BoundValues,
    input: &mut dyn BufRead,
) -> Result<()> {
    let count = match bound.get(argument.name) {
        Some(Value::List(items)) => items.len(),
        Some(_) => 1,
        None => 0,
    };

    match argument.arity {
        Arity::Unlimited => Ok(()),
        Arity::Optional => {
            if count <= 1 {
                Ok(())
            } else {
                Err(Error::BadArity {
                    argument: argument.name.to_owned(),
                    reason: format!("expected at most 1 value, found {count}"),
                })
            }
        }
        Arity::Exactly(expected) => {
            if count == expected {
                return Ok(());
            }
            if count == 0 && argument.input_fallback {
                let mut text = String::new();
                input.read_to_string(&mut text).map_err(|e| {
                    Error::Usage(format!("cannot read {} from input: {e}", argument.name))
                })?;
                let token = text.trim();
                if !token.is_empty() {
                    debug!(argument = argument.name, "bound from input stream");
                    let value = argument.value.bind(argument.name, token)?;
                    bound.bind(argument.name, value);
                    return Ok(());
                }
            }
            Err(Error::BadArity {
                argument: argument.name.to_owned(),
                reason: format!("expected {expected} value(s), found {count}"),
            })
        }
    }
}

fn resolve_option(
    option: &OptionSpec,
    bound: &mut BoundValues,
    config: &[ConfigEntry],
) -> Result<()> {
    if !bound.is_bound(option.long) {
        let matches: Vec<&ConfigEntry> = config.iter().filter(|e| e.key == option.long).collect();
        if option.repeated && !matches.is_empty() {
            let mut items = Vec::with_capacity(matches.len());
            for entry in &matches {
                check_config_value(option, entry)?;
                items.push(entry.value.clone());
            }
            debug!(option = option.long, count = items.len(), "bound from config");
            bound.bind(option.long, Value::List(items));
        } else if let Some(entry) = matches.first() {
            let value = option
                .value
                .bind(option.long, &entry.value)
                .map_err(|e| Error::ConfigParse {
                    line: entry.line,
                    reason: e.to_string(),
                })?;
            debug!(option = option.long, line = entry.line, "bound from config");
            bound.bind(option.long, value);
        }
    }

    if !bound.is_bound(option.long) {
        if let Some(default) = option.default {
            let value = option.value.bind(option.long, default)?;
            bound.bind(option.long, value);
        }
    }

    if option.required && !bound.is_bound(option.long) {
        return Err(Error::MissingRequired(option.long.to_owned()));
    }
    Ok(())
}

fn check_config_value(option: &OptionSpec, entry: &ConfigEntry) -> Result<()> {
    option
        .value
        .bind(option.long, &entry.value)
        .map(|_| ())
        .map_err(|e| Error::ConfigParse {
            line: entry.line,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::metadata::ValueType;

    fn empty_input() -> Cursor<&'static [u8]> {
        Cursor::new(b"")
    }

    #[test]
    fn test_parse_config_skips_blanks_and_comments() {
        let entries = parse_config("# settings\n\nversion=5\n  format = json \n").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "version");
        assert_eq!(entries[0].value, "5");
        assert_eq!(entries[0].line, 3);
        assert_eq!(entries[1].key, "format");
        assert_eq!(entries[1].value, "json");
    }

    #[test]
    fn test_parse_config_rejects_bare_line() {
        assert!(matches!(
            parse_config("version\n"),
            Err(Error::ConfigParse { line: 1, .. })
        ));
    }

    #[test]
    fn test_cli_value_wins_over_config_and_default() {
        let options = [OptionSpec::value(
            "version",
            Some('v'),
            ValueType::Integer,
            "version byte",
        )
        .default("0")];
        let config = [ConfigEntry {
            line: 1,
            key: "version".into(),
            value: "7".into(),
        }];
        let mut bound = BoundValues::new();
        bound.bind("version", Value::Integer(42));
        resolve(&[], &options, &mut bound, &config, &mut empty_input()).unwrap();
        assert_eq!(bound.integer("version"), 42);
    }

    #[test]
    fn test_config_wins_over_default() {
        let options = [OptionSpec::value(
            "version",
            Some('v'),
            ValueType::Integer,
            "version byte",
        )
        .default("0")];
        let config = [ConfigEntry {
            line: 1,
            key: "version".into(),
            value: "7".into(),
        }];
        let mut bound = BoundValues::new();
        resolve(&[], &options, &mut bound, &config, &mut empty_input()).unwrap();
        assert_eq!(bound.integer("version"), 7);
    }

    #[test]
    fn test_default_applies_when_nothing_else_does() {
        let options = [OptionSpec::value(
            "version",
            Some('v'),
            ValueType::Integer,
            "version byte",
        )
        .default("9")];
        let mut bound = BoundValues::new();
        resolve(&[], &options, &mut bound, &[], &mut empty_input()).unwrap();
        assert_eq!(bound.integer("version"), 9);
    }

    #[test]
    fn test_missing_required_option() {
        let options =
            [OptionSpec::value("index", Some('i'), ValueType::Integer, "child index").required()];
        let mut bound = BoundValues::new();
        assert!(matches!(
            resolve(&[], &options, &mut bound, &[], &mut empty_input()),
            Err(Error::MissingRequired(name)) if name == "index"
        ));
    }

    #[test]
    fn test_malformed_config_value_names_line() {
        let options = [OptionSpec::value(
            "version",
            Some('v'),
            ValueType::Integer,
            "version byte",
        )];
        let config = [ConfigEntry {
            line: 4,
            key: "version".into(),
            value: "many".into(),
        }];
        let mut bound = BoundValues::new();
        assert!(matches!(
            resolve(&[], &options, &mut bound, &config, &mut empty_input()),
            Err(Error::ConfigParse { line: 4, .. })
        ));
    }

    #[test]
    fn test_repeated_option_collects_all_config_lines() {
        let options =
            [OptionSpec::value("input", Some('i'), ValueType::Text, "tx input").repeated()];
        let config = [
            ConfigEntry {
                line: 1,
                key: "input".into(),
                value: "a".into(),
            },
            ConfigEntry {
                line: 2,
                key: "input".into(),
                value: "b".into(),
            },
        ];
        let mut bound = BoundValues::new();
        resolve(&[], &options, &mut bound, &config, &mut empty_input()).unwrap();
        assert_eq!(bound.list("input"), ["a", "b"]);
    }

    #[test]
    fn test_argument_read_from_input_stream() {
        let arguments =
            [ArgumentSpec::one("BASE16", ValueType::Text, "payload").or_input()];
        let mut bound = BoundValues::new();
        let mut input = Cursor::new(b"900df00d\n".as_slice());
        resolve(&arguments, &[], &mut bound, &[], &mut input).unwrap();
        assert_eq!(bound.text("BASE16"), "900df00d");
    }

    #[test]
    fn test_missing_argument_without_fallback() {
        let arguments = [ArgumentSpec::one("BASE16", ValueType::Text, "payload")];
        let mut bound = BoundValues::new();
        assert!(matches!(
            resolve(&arguments, &[], &mut bound, &[], &mut empty_input()),
            Err(Error::BadArity { argument, .. }) if argument == "BASE16"
        ));
    }
}
