//! Variable commands: set, unset, env.

use tessera_types::error::Result;

use crate::binding::{BoundFlags, BoundParams};
use crate::command::{Command, CommandOverload, CommandParam};
use crate::interpreter::{CommandOutput, Environment};
use crate::registry::CommandRegistry;
use crate::value::parse_identifier;
use crate::variables::render;

/// `env` shortens longer values to this many characters.
const ENV_VALUE_WIDTH: usize = 50;

/// Register variable commands into the registry.
pub fn register_variable_commands(reg: &mut CommandRegistry) {
    reg.register("set", set_command());
    reg.register("unset", unset_command());
    reg.register("env", env_command());
}

fn variable_param(description: &str) -> CommandParam {
    CommandParam::new("variable", description).with_parser(parse_identifier)
}

// ---------------------------------------------------------------------------
// set
// ---------------------------------------------------------------------------

fn set_command() -> Command {
    Command::new().overload(
        CommandOverload::new("Sets a variable with the specified name and value.")
            .param(variable_param("The name of the variable to set."))
            .param(
                CommandParam::new(
                    "value",
                    "The value to assign to the variable. Can be a JSON value or a variable name.",
                )
                .variadic(),
            )
            .executes(set_variable),
    )
}

fn set_variable(
    params: &BoundParams,
    _flags: &BoundFlags,
    env: &mut Environment<'_>,
) -> Result<CommandOutput> {
    let name = params.require_text("variable")?;
    let expr = raw_value(params, name);
    let value = env.evaluator.evaluate(&expr, env.variables)?;
    log::debug!("set {name} = {value}");
    env.variables.set(name, value);
    Ok(CommandOutput::None)
}

/// Recover the value text exactly as typed: the raw line minus the command
/// name, the `--variable`/`--value` markers, and the variable name.
fn raw_value(params: &BoundParams, name: &str) -> String {
    let invoked = params.tokens().first().map_or("", String::as_str);
    let rest = params
        .raw_text()
        .replacen(invoked, "", 1)
        .replacen("--variable", "", 1)
        .replacen("--value", "", 1);
    remove_word(&rest, name).trim().to_string()
}

/// Remove the first whitespace-delimited occurrence of `word`.
///
/// Occurrences inside a longer token (`s` in `"yes"`) are left alone.
fn remove_word(text: &str, word: &str) -> String {
    let mut from = 0;
    while let Some(pos) = text[from..].find(word) {
        let start = from + pos;
        let end = start + word.len();
        let open = text[..start].chars().next_back().is_none_or(char::is_whitespace);
        let close = text[end..].chars().next().is_none_or(char::is_whitespace);
        if open && close {
            return format!("{}{}", &text[..start], &text[end..]);
        }
        from = end;
    }
    text.to_string()
}

// ---------------------------------------------------------------------------
// unset
// ---------------------------------------------------------------------------

fn unset_command() -> Command {
    Command::new().overload(
        CommandOverload::new("Unsets the specified variable.")
            .param(variable_param(
                "The name of the variable to unset; can only consist of alphanumeric \
                 characters and underscores and must not start with a digit.",
            ))
            .executes(|params, _, env| {
                let name = params.require_text("variable")?;
                if env.variables.unset(name).is_none() {
                    log::debug!("unset: {name} was not set");
                }
                Ok(CommandOutput::None)
            }),
    )
}

// ---------------------------------------------------------------------------
// env
// ---------------------------------------------------------------------------

fn env_command() -> Command {
    Command::new().overload(
        CommandOverload::new("Lists all currently defined variables.").executes(|_, _, env| {
            if env.variables.is_empty() {
                return Ok(CommandOutput::Text("No variables are set.".to_string()));
            }
            let lines: Vec<String> = env
                .variables
                .iter()
                .map(|(name, value)| format!("{name} = {}", truncate(&render(value))))
                .collect();
            Ok(CommandOutput::Text(lines.join("\n")))
        }),
    )
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(ENV_VALUE_WIDTH) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Shell;
    use serde_json::json;
    use tessera_types::config::TesseraConfig;
    use tessera_types::error::TesseraError;

    fn shell() -> Shell {
        let mut reg = CommandRegistry::new();
        register_variable_commands(&mut reg);
        Shell::new(reg, &TesseraConfig::default())
    }

    fn env_text(sh: &mut Shell) -> String {
        match sh.submit("env").unwrap() {
            CommandOutput::Text(s) => s,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn set_number_and_string() {
        let mut sh = shell();
        sh.submit("set n 42").unwrap();
        sh.submit(r#"set greeting "hello   world""#).unwrap();
        assert_eq!(sh.variables().get("n"), Some(&json!(42)));
        assert_eq!(sh.variables().get("greeting"), Some(&json!("hello   world")));
    }

    #[test]
    fn set_value_spanning_several_tokens() {
        let mut sh = shell();
        sh.submit("set list [1, 2, 3]").unwrap();
        assert_eq!(sh.variables().get("list"), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn set_with_named_markers() {
        let mut sh = shell();
        sh.submit("set --variable x --value 7").unwrap();
        assert_eq!(sh.variables().get("x"), Some(&json!(7)));
    }

    #[test]
    fn set_with_value_marker_first() {
        let mut sh = shell();
        sh.submit(r#"set --value "yes" --variable s"#).unwrap();
        assert_eq!(sh.variables().get("s"), Some(&json!("yes")));
    }

    #[test]
    fn set_value_containing_the_name() {
        let mut sh = shell();
        sh.submit(r#"set --value "a b" --variable a"#).unwrap();
        assert_eq!(sh.variables().get("a"), Some(&json!("a b")));
    }

    #[test]
    fn remove_word_skips_partial_matches() {
        assert_eq!(remove_word(r#" "yes"  s"#, "s"), r#" "yes"  "#);
        assert_eq!(remove_word("xs s", "s"), "xs ");
        assert_eq!(remove_word("abc", "b"), "abc");
        assert_eq!(remove_word("s", "s"), "");
    }

    #[test]
    fn set_from_another_variable() {
        let mut sh = shell();
        sh.submit("set a [true]").unwrap();
        sh.submit("set b a").unwrap();
        assert_eq!(sh.variables().get("b"), Some(&json!([true])));
    }

    #[test]
    fn set_rejects_bad_name_and_bad_value() {
        let mut sh = shell();
        assert!(matches!(
            sh.submit("set 1abc 5"),
            Err(TesseraError::NoMatchingOverload(_))
        ));
        assert!(matches!(
            sh.submit("set x not_json"),
            Err(TesseraError::Eval(_))
        ));
        assert!(sh.variables().is_empty());
    }

    #[test]
    fn unset_removes_and_tolerates_missing() {
        let mut sh = shell();
        sh.submit("set x 1").unwrap();
        sh.submit("unset x").unwrap();
        assert!(sh.variables().get("x").is_none());
        assert_eq!(sh.submit("unset x").unwrap(), CommandOutput::None);
    }

    #[test]
    fn env_lists_sorted_and_reports_empty() {
        let mut sh = shell();
        assert_eq!(env_text(&mut sh), "No variables are set.");
        sh.submit(r#"set b "two""#).unwrap();
        sh.submit("set a 1").unwrap();
        assert_eq!(env_text(&mut sh), "a = 1\nb = two");
    }

    #[test]
    fn env_truncates_long_values() {
        let mut sh = shell();
        sh.variables_mut().set("long", json!("x".repeat(60)));
        let out = env_text(&mut sh);
        assert_eq!(out, format!("long = {}...", "x".repeat(50)));
    }

    #[test]
    fn truncate_is_char_aware() {
        let s = "é".repeat(51);
        assert_eq!(truncate(&s), format!("{}...", "é".repeat(50)));
        assert_eq!(truncate("short"), "short");
    }
}
