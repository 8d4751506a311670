//! Built-in commands for the Tessera terminal.

use serde_json::{Map, Value};
use tessera_types::error::{Result, TesseraError};

use crate::binding::{BoundFlags, BoundParams};
use crate::command::{Command, CommandFlag, CommandOverload, CommandParam};
use crate::interpreter::{CommandOutput, Environment, resolve_path};
use crate::registry::CommandRegistry;
use crate::tokenizer::after_first_token;

/// Overloads listed per command in the `help` summary.
const SUMMARY_OVERLOADS: usize = 3;

/// Register all built-in commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register("help", help_command());
    reg.register("clear", clear_command());
    reg.register("echo", echo_command());
    reg.register("cd", cd_command());
    reg.register("color", color_command());
    reg.register("test", test_command());
    crate::register_variable_commands(reg);
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

fn help_command() -> Command {
    Command::new()
        .overload(CommandOverload::new("Displays this help menu.").executes(help_summary))
        .overload(
            CommandOverload::new("Displays detailed help information for the specified command.")
                .param(CommandParam::new(
                    "command",
                    "The name of the command to get detailed help for.",
                ))
                .executes(help_detail),
        )
}

fn help_summary(
    _params: &BoundParams,
    _flags: &BoundFlags,
    env: &mut Environment<'_>,
) -> Result<CommandOutput> {
    let text = env
        .registry
        .visible_commands()
        .into_iter()
        .map(|cmd| help_info(cmd, false))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(CommandOutput::Text(text))
}

fn help_detail(
    params: &BoundParams,
    _flags: &BoundFlags,
    env: &mut Environment<'_>,
) -> Result<CommandOutput> {
    let cmd = env.registry.lookup(params.require_text("command")?)?;
    Ok(CommandOutput::Text(help_info(cmd, true)))
}

/// Usage text for one command.
///
/// The summary form is one `syntax | help` line for each of the first
/// [`SUMMARY_OVERLOADS`] overloads. The detailed form lists every overload
/// with its parameter and flag descriptions.
pub fn help_info(cmd: &Command, detailed: bool) -> String {
    let name = cmd.name();
    if !detailed {
        return cmd
            .overloads()
            .iter()
            .take(SUMMARY_OVERLOADS)
            .map(|o| format!("{} | {}", o.syntax(name), o.help()))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut out = format!("HELP FOR: {name}\n");
    if !cmd.aliases().is_empty() {
        out.push_str(&format!("Aliases: {}\n", cmd.aliases().join(", ")));
    }

    let sections: Vec<String> = cmd
        .overloads()
        .iter()
        .map(|o| {
            let mut text = format!("{} | {}\n\nParameters\n", o.syntax(name), o.help());
            if o.params().is_empty() {
                text.push_str("None.\n");
            }
            for p in o.params() {
                let optional = if p.is_optional() { " (OPTIONAL)" } else { "" };
                text.push_str(&format!("--{}: {}{optional}\n", p.name(), p.description()));
            }
            text.push_str("\nFlags\n");
            if o.flags().is_empty() {
                text.push_str("None.\n");
            }
            for f in o.flags() {
                text.push_str(&format!("-{}: {}\n", f.name(), f.description()));
            }
            text
        })
        .collect();

    out.push('\n');
    out.push_str(sections.join("\n").trim_end());
    out
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

fn clear_command() -> Command {
    Command::new()
        .overload(
            CommandOverload::new("Clears the terminal.")
                .executes(|_, _, _| Ok(CommandOutput::Clear)),
        )
        .alias("cls")
        .alias("cl")
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

fn echo_command() -> Command {
    Command::new()
        .overload(
            CommandOverload::new("Outputs the provided text into the terminal.")
                .param(CommandParam::new("text", "The text to echo.").variadic())
                .executes(|params, _, _| Ok(CommandOutput::Text(echo_text(params)))),
        )
        .alias("say")
}

/// The input line after the command name, minus the first `--text` marker.
///
/// Working from the raw line keeps the user's spacing and quotes intact.
fn echo_text(params: &BoundParams) -> String {
    after_first_token(params.raw_text())
        .replacen("--text", "", 1)
        .trim_start()
        .to_string()
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

fn cd_command() -> Command {
    Command::new().overload(
        CommandOverload::new("Changes the current working directory.")
            .param(CommandParam::new("path", "The path to change to."))
            .executes(|params, _, env| {
                let path = params.require_text("path")?.trim();
                if path.is_empty() {
                    return Err(TesseraError::Command("cd: empty path".to_string()));
                }
                env.cwd = resolve_path(&env.cwd, path);
                log::debug!("cwd is now {}", env.cwd);
                Ok(CommandOutput::None)
            }),
    )
}

// ---------------------------------------------------------------------------
// color
// ---------------------------------------------------------------------------

fn color_command() -> Command {
    Command::new().overload(
        CommandOverload::new("Sets the background and the text color of the terminal.")
            .param(
                CommandParam::new(
                    "background",
                    "The background color. Can be a word, rgb value, or hex code.",
                )
                .optional(),
            )
            .param(
                CommandParam::new(
                    "text",
                    "The text color. Can be a word, rgb value, or hex code.",
                )
                .optional(),
            )
            .executes(|params, _, _| {
                Ok(CommandOutput::Colors {
                    background: params.text("background").map(str::to_string),
                    text: params.text("text").map(str::to_string),
                })
            }),
    )
}

// ---------------------------------------------------------------------------
// test (hidden)
// ---------------------------------------------------------------------------

fn test_command() -> Command {
    Command::new()
        .overload(
            CommandOverload::new("Test command.")
                .param(CommandParam::new("ov", "optional variadic").optional().variadic())
                .param(CommandParam::new("p", "required positional"))
                .param(CommandParam::new("v", "required variadic").variadic())
                .param(CommandParam::new("op", "optional positional").optional())
                .flag(CommandFlag::new("v", "test flag 1"))
                .flag(CommandFlag::new("x", "test flag 2"))
                .executes(test_report),
        )
        .hidden()
}

/// Dump every binding, for checking the resolver by hand.
fn test_report(
    params: &BoundParams,
    flags: &BoundFlags,
    _env: &mut Environment<'_>,
) -> Result<CommandOutput> {
    let show = |name: &str| {
        params
            .get(name)
            .map_or_else(|| "(unbound)".to_string(), ToString::to_string)
    };
    let flag_map: Map<String, Value> = flags
        .iter()
        .map(|(name, set)| (name.to_string(), Value::Bool(set)))
        .collect();

    let lines = [
        format!("raw: {}", params.raw_text()),
        format!("tokens: {}", params.tokens().join(",")),
        format!("ov: {}", show("ov")),
        format!("p: {}", show("p")),
        format!("v: {}", show("v")),
        format!("op: {}", show("op")),
        format!("flags: {}", Value::Object(flag_map)),
    ];
    Ok(CommandOutput::Text(lines.join("\n")))
}
