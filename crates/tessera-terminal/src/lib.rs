//! Command parsing, overload resolution, and the terminal built on them.
//!
//! A line is substituted, tokenized, and dispatched: the first token names a
//! command in the [`CommandRegistry`], and the resolver binds the remaining
//! tokens to the first of the command's overloads that accepts them.

pub mod binding;
pub mod command;
mod commands;
pub mod history;
mod interpreter;
pub mod registry;
pub mod resolver;
pub mod substitute;
pub mod tokenizer;
pub mod value;
pub mod variable_commands;
pub mod variables;

/// Parameter values and flags bound for an executor.
pub use binding::{BoundFlags, BoundParams};
/// Command descriptors.
pub use command::{Command, CommandFlag, CommandOverload, CommandParam};
/// Register all built-in commands into a registry.
pub use commands::{help_info, register_builtins};
/// Output produced by a command, and the state it runs against.
pub use interpreter::{CommandOutput, Environment, Shell, resolve_path};
/// Registry of available commands with dispatch.
pub use registry::CommandRegistry;
pub use tokenizer::tokenize;
pub use value::{ParamValue, RawValue, ValueParser};
/// Register the variable commands (set, unset, env) into a registry.
pub use variable_commands::register_variable_commands;
pub use variables::{Evaluator, LiteralEvaluator, Variables};
