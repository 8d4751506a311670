//! Overload resolution.
//!
//! Arguments are first classified into named groups (`--name v...`), flags
//! (`-name`), and positional tokens. Each overload is then matched in
//! declaration order; the first one that binds cleanly wins.
//!
//! Within an overload, parameters are evaluated in four buckets: those named
//! explicitly, then the remaining required ones, then optional scalars, then
//! optional variadics (each bucket keeps declaration order). A positional
//! cursor hands out unclaimed tokens. Named parameters advance the cursor
//! too, since their values also sit in the positional list. The overload
//! matches only if the cursor ends exactly at the end of the positional
//! list.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tessera_types::error::{ParseError, Result, TesseraError};

use crate::binding::{BoundFlags, BoundParams};
use crate::command::{Command, CommandOverload, CommandParam};
use crate::interpreter::{CommandOutput, Environment};
use crate::value::{ParamValue, RawValue};

/// Arguments of one invocation, sorted by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenGroups {
    /// `--name` markers and the tokens that follow each, up to the next
    /// `--` marker. A repeated marker replaces the earlier group.
    pub named: HashMap<String, Vec<String>>,
    /// Names of `-name` markers present.
    pub flags: HashSet<String>,
    /// Every other token, in order.
    pub positional: Vec<String>,
}

/// Classify the arguments of a command (command name already removed).
///
/// Every token is visited, including those collected into a named group,
/// so a group's values also show up as positional tokens (or flags).
pub fn classify(args: &[String]) -> TokenGroups {
    let mut groups = TokenGroups::default();
    for (i, token) in args.iter().enumerate() {
        if let Some(name) = token.strip_prefix("--") {
            let values = args[i + 1..]
                .iter()
                .take_while(|t| !t.starts_with("--"))
                .cloned()
                .collect();
            groups.named.insert(name.to_string(), values);
        } else if let Some(name) = token.strip_prefix('-') {
            groups.flags.insert(name.to_string());
        } else {
            groups.positional.push(token.clone());
        }
    }
    groups
}

/// Why an overload did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A required parameter had neither a named value nor a positional
    /// token left.
    MissingValue(String),
    /// The parameter's value parser failed.
    InvalidValue { param: String, error: ParseError },
    /// Positional accounting did not end at the end of the positional list.
    Leftover { consumed: usize, available: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue(param) => write!(f, "missing value for <{param}>"),
            Self::InvalidValue { param, error } => {
                write!(f, "invalid value for <{param}>: {error}")
            },
            Self::Leftover {
                consumed,
                available,
            } => write!(f, "consumed {consumed} of {available} positional tokens"),
        }
    }
}

/// Order in which an overload's parameters claim values.
pub fn evaluation_order<'o>(
    overload: &'o CommandOverload,
    groups: &TokenGroups,
) -> Vec<&'o CommandParam> {
    let bucket = |p: &CommandParam| {
        if groups.named.contains_key(p.name()) {
            0
        } else if !p.is_optional() {
            1
        } else if !p.is_variadic() {
            2
        } else {
            3
        }
    };
    let mut order: Vec<&CommandParam> = overload.params().iter().collect();
    // Stable: declaration order is kept inside each bucket.
    order.sort_by_key(|p| bucket(*p));
    order
}

/// Try to bind one overload against classified arguments.
pub fn match_overload(
    overload: &CommandOverload,
    groups: &TokenGroups,
) -> std::result::Result<(HashMap<String, ParamValue>, BoundFlags), Rejection> {
    let flags: BoundFlags = overload
        .flags()
        .iter()
        .map(|f| (f.name().to_string(), groups.flags.contains(f.name())))
        .collect();

    let positional = &groups.positional;
    let mut values = HashMap::new();
    let mut cursor = 0usize;

    for param in evaluation_order(overload, groups) {
        let name = param.name();
        let raw = if let Some(named) = groups.named.get(name) {
            if param.is_variadic() {
                cursor += named.len();
                Some(RawValue::Many(named))
            } else {
                cursor += 1;
                named.first().map(|v| RawValue::Single(v.as_str()))
            }
        } else if param.is_variadic() {
            let rest = positional.get(cursor..).unwrap_or_default();
            cursor = positional.len();
            Some(RawValue::Many(rest))
        } else if let Some(token) = positional.get(cursor) {
            cursor += 1;
            Some(RawValue::Single(token.as_str()))
        } else if param.is_optional() {
            None
        } else {
            return Err(Rejection::MissingValue(name.to_string()));
        };

        if let Some(raw) = raw {
            let value = param.parse(raw).map_err(|error| Rejection::InvalidValue {
                param: name.to_string(),
                error,
            })?;
            values.insert(name.to_string(), value);
        }
    }

    if cursor != positional.len() {
        return Err(Rejection::Leftover {
            consumed: cursor,
            available: positional.len(),
        });
    }

    Ok((values, flags))
}

/// The overload selected for an invocation, with its bindings.
#[derive(Debug)]
pub struct Resolution<'c> {
    /// Position of the overload in the command's declaration order.
    pub index: usize,
    pub overload: &'c CommandOverload,
    pub params: BoundParams,
    pub flags: BoundFlags,
}

/// Select the first overload of `command` that matches `tokens`.
///
/// `tokens[0]` is the name the command was invoked by; `raw_text` is the
/// line it was tokenized from. Both are attached to the bound parameters.
pub fn resolve<'c>(
    command: &'c Command,
    raw_text: &str,
    tokens: &[String],
) -> Result<Resolution<'c>> {
    let invoked_as = tokens.first().map_or(command.name(), String::as_str);
    let groups = classify(tokens.get(1..).unwrap_or_default());
    log::trace!("{invoked_as}: {groups:?}");

    for (index, overload) in command.overloads().iter().enumerate() {
        match match_overload(overload, &groups) {
            Ok((values, flags)) => {
                log::debug!("{invoked_as}: overload {index} matched");
                return Ok(Resolution {
                    index,
                    overload,
                    params: BoundParams::new(values, raw_text, tokens),
                    flags,
                });
            },
            Err(reason) => log::debug!("{invoked_as}: overload {index} rejected: {reason}"),
        }
    }

    Err(TesseraError::NoMatchingOverload(invoked_as.to_string()))
}

/// Resolve and run. Executor errors are returned unchanged.
pub fn dispatch(
    command: &Command,
    raw_text: &str,
    tokens: &[String],
    env: &mut Environment<'_>,
) -> Result<CommandOutput> {
    let resolution = resolve(command, raw_text, tokens)?;
    resolution
        .overload
        .execute(&resolution.params, &resolution.flags, env)
}
