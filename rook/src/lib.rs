//! Command framework for the rook CLI.
//!
//! Provides the pieces shared by every command: argument/option
//! metadata, the startup registry, fallback resolution across CLI,
//! configuration file, and compiled defaults, the dispatcher, and the
//! property-tree output formats.
//!
//! Commands are unit structs implementing [`Command`]; all domain
//! computation is delegated to primitive crates. A process invocation
//! is single-threaded and synchronous: parse, resolve, invoke once,
//! render, exit.

#![warn(missing_docs, rust_2018_idioms, clippy::all)]
#![forbid(unsafe_code)]

pub mod command;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod metadata;
pub mod registry;
pub mod resolver;
pub mod tree;
pub mod value;

pub use command::{fail, run_line, run_tree, Command, ConsoleResult};
pub use dispatch::{dispatch, CONFIG_ENVIRONMENT};
pub use error::{Error, Result};
pub use format::{render, render_as, OutputFormat};
pub use metadata::{ArgumentSpec, Arity, OptionSpec, ValueType};
pub use registry::Registry;
pub use tree::PropertyTree;
pub use value::{BoundValues, Value};
