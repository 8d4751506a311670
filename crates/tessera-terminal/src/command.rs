//! Command descriptors: commands, overloads, parameters, and flags.
//!
//! Descriptors are built once (builder style) by command-definition code,
//! handed to [`CommandRegistry::register`](crate::CommandRegistry::register),
//! and never mutated afterwards.

use std::fmt;
use std::sync::Arc;

use tessera_types::error::{ParseError, Result};

use crate::binding::{BoundFlags, BoundParams};
use crate::interpreter::{CommandOutput, Environment};
use crate::value::{ParamValue, RawValue, ValueParser, parse_text};

/// The body of an overload, invoked with its bound parameters and flags.
pub type Executor = dyn Fn(&BoundParams, &BoundFlags, &mut Environment<'_>) -> Result<CommandOutput>
    + Send
    + Sync;

/// A declared parameter of an overload.
#[derive(Clone)]
pub struct CommandParam {
    name: String,
    description: String,
    optional: bool,
    variadic: bool,
    parser: Arc<dyn ValueParser>,
}

impl CommandParam {
    /// A required, single-token parameter parsed as text.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            optional: false,
            variadic: false,
            parser: Arc::new(parse_text),
        }
    }

    /// Allow the parameter to be left unbound.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Bind a sequence of tokens instead of a single one.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Replace the value parser with a closure or function.
    pub fn with_parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(RawValue<'_>) -> std::result::Result<ParamValue, ParseError> + Send + Sync + 'static,
    {
        self.parser = Arc::new(parser);
        self
    }

    /// Replace the value parser with any [`ValueParser`] implementation.
    pub fn with_value_parser(mut self, parser: impl ValueParser + 'static) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Run the value parser on raw input.
    pub fn parse(&self, raw: RawValue<'_>) -> std::result::Result<ParamValue, ParseError> {
        self.parser.parse(raw)
    }
}

impl fmt::Debug for CommandParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandParam")
            .field("name", &self.name)
            .field("optional", &self.optional)
            .field("variadic", &self.variadic)
            .finish_non_exhaustive()
    }
}

/// A presence-only boolean flag (`-name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFlag {
    name: String,
    description: String,
}

impl CommandFlag {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// One candidate signature of a command.
pub struct CommandOverload {
    help: String,
    params: Vec<CommandParam>,
    flags: Vec<CommandFlag>,
    executor: Box<Executor>,
}

impl CommandOverload {
    /// An overload with no parameters, no flags, and an executor that does
    /// nothing.
    pub fn new(help: impl Into<String>) -> Self {
        Self {
            help: help.into(),
            params: Vec::new(),
            flags: Vec::new(),
            executor: Box::new(no_op),
        }
    }

    pub fn param(mut self, param: CommandParam) -> Self {
        self.params.push(param);
        self
    }

    pub fn flag(mut self, flag: CommandFlag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Set the body run when this overload is selected.
    pub fn executes<F>(mut self, executor: F) -> Self
    where
        F: Fn(&BoundParams, &BoundFlags, &mut Environment<'_>) -> Result<CommandOutput>
            + Send
            + Sync
            + 'static,
    {
        self.executor = Box::new(executor);
        self
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn params(&self) -> &[CommandParam] {
        &self.params
    }

    pub fn flags(&self) -> &[CommandFlag] {
        &self.flags
    }

    /// Invoke the executor. Errors are returned as-is.
    pub fn execute(
        &self,
        params: &BoundParams,
        flags: &BoundFlags,
        env: &mut Environment<'_>,
    ) -> Result<CommandOutput> {
        (self.executor)(params, flags, env)
    }

    /// Usage line, e.g. `test [ov...] <p> <v...> [op]`.
    pub fn syntax(&self, command_name: &str) -> String {
        let mut out = command_name.to_string();
        for p in &self.params {
            let dots = if p.variadic { "..." } else { "" };
            if p.optional {
                out.push_str(&format!(" [{}{dots}]", p.name));
            } else {
                out.push_str(&format!(" <{}{dots}>", p.name));
            }
        }
        out
    }
}

impl fmt::Debug for CommandOverload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandOverload")
            .field("help", &self.help)
            .field("params", &self.params)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

fn no_op(_: &BoundParams, _: &BoundFlags, _: &mut Environment<'_>) -> Result<CommandOutput> {
    Ok(CommandOutput::None)
}

/// A terminal command: ordered overloads plus lookup metadata.
#[derive(Debug, Default)]
pub struct Command {
    name: String,
    overloads: Vec<CommandOverload>,
    aliases: Vec<String>,
    hidden: bool,
}

impl Command {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an overload. Overloads are tried in the order added.
    pub fn overload(mut self, overload: CommandOverload) -> Self {
        self.overloads.push(overload);
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Leave the command out of the `help` summary. It stays invocable.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// The name this command was registered under (empty before
    /// registration).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn overloads(&self) -> &[CommandOverload] {
        &self.overloads
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}
