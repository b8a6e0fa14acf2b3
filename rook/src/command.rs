//! The command contract and invoke-side helpers.

use std::fmt;
use std::io::Write;

use crate::format;
use crate::metadata::{ArgumentSpec, OptionSpec};
use crate::tree::PropertyTree;
use crate::value::BoundValues;

/// Observable outcome of one command invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleResult {
    /// Successful computation and render.
    Okay,
    /// A handled domain or content error.
    Failure,
    /// Malformed invocation shape.
    Invalid,
}

impl ConsoleResult {
    /// Process exit code: okay=0, failure=1, invalid=-1.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Okay => 0,
            Self::Failure => 1,
            Self::Invalid => -1,
        }
    }
}

/// One CLI command: static metadata plus a thin invoke handler.
///
/// Implementations hold no state; the registry constructs them at
/// startup and the dispatcher feeds each invocation a fresh
/// [`BoundValues`] and its output/error sinks.
pub trait Command {
    /// The symbolic command name, lower case, unique.
    fn name(&self) -> &'static str;

    /// The former symbolic name, where the command was renamed.
    fn formerly(&self) -> Option<&'static str> {
        None
    }

    /// Upper-case category for the help listing.
    fn category(&self) -> &'static str;

    /// One-line description.
    fn description(&self) -> &'static str;

    /// Positional argument declarations, in consumption order.
    fn arguments(&self) -> Vec<ArgumentSpec> {
        Vec::new()
    }

    /// Named option declarations.
    fn options(&self) -> Vec<OptionSpec> {
        Vec::new()
    }

    /// Execute against resolved values, writing to the given sinks.
    ///
    /// Domain failures are written to `error` and become
    /// [`ConsoleResult::Failure`]; they never propagate past this
    /// boundary.
    fn invoke(
        &self,
        bound: &BoundValues,
        output: &mut dyn Write,
        error: &mut dyn Write,
    ) -> ConsoleResult;
}

/// Write a single-line result, converting a handler error into a
/// diagnostic on the error sink and a failure result.
pub fn run_line<T: fmt::Display, E: fmt::Display>(
    output: &mut dyn Write,
    error: &mut dyn Write,
    result: Result<T, E>,
) -> ConsoleResult {
    match result {
        Ok(line) => {
            if writeln!(output, "{line}").is_err() {
                return ConsoleResult::Failure;
            }
            ConsoleResult::Okay
        }
        Err(e) => fail(error, e),
    }
}

/// Render a tree result in the requested format tag.
///
/// The tag has been validated at bind time; it is re-parsed here so a
/// handler calling with a literal tag gets the same contract.
pub fn run_tree<E: fmt::Display>(
    output: &mut dyn Write,
    error: &mut dyn Write,
    tag: &str,
    result: Result<PropertyTree, E>,
) -> ConsoleResult {
    match result {
        Ok(tree) => match format::render_as(&tree, tag) {
            Ok(rendered) => {
                if writeln!(output, "{}", rendered.trim_end_matches('\n')).is_err() {
                    return ConsoleResult::Failure;
                }
                ConsoleResult::Okay
            }
            Err(e) => fail(error, e),
        },
        Err(e) => fail(error, e),
    }
}

/// Write a diagnostic and return a failure result.
pub fn fail(error: &mut dyn Write, message: impl fmt::Display) -> ConsoleResult {
    let _ = writeln!(error, "{message}");
    ConsoleResult::Failure
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_result_codes() {
        assert_eq!(ConsoleResult::Okay.code(), 0);
        assert_eq!(ConsoleResult::Failure.code(), 1);
        assert_eq!(ConsoleResult::Invalid.code(), -1);
    }

    #[test]
    fn test_run_line_ok_writes_output() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run_line(&mut out, &mut err, Ok::<_, String>("abc"));
        assert_eq!(result, ConsoleResult::Okay);
        assert_eq!(out, b"abc\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_line_err_writes_diagnostic() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run_line::<String, _>(&mut out, &mut err, Err("bad checksum"));
        assert_eq!(result, ConsoleResult::Failure);
        assert!(out.is_empty());
        assert_eq!(err, b"bad checksum\n");
    }

    #[test]
    fn test_run_tree_renders_requested_format() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let tree = PropertyTree::node().with_value("value", "abc");
        let result = run_tree::<String>(&mut out, &mut err, "native", Ok(tree));
        assert_eq!(result, ConsoleResult::Okay);
        assert_eq!(out, b"abc\n");
    }
}
