//! Error types for Tessera.

use std::io;

/// Errors produced by the Tessera terminal.
#[derive(Debug, thiserror::Error)]
pub enum TesseraError {
    #[error("command \"{0}\" does not exist")]
    UnknownCommand(String),

    #[error(
        "no overload of command \"{0}\" matches the provided parameters; try running `help {0}`"
    )]
    NoMatchingOverload(String),

    #[error("missing parameter: {0}")]
    MissingParam(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("evaluation error: {0}")]
    Eval(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Failure raised by a parameter value parser.
///
/// Never surfaces on its own: the resolver treats it as "this overload does
/// not match" and moves on to the next one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ParseError(pub String);

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TesseraError>;
