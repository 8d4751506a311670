//! Shell state and the line-processing pipeline.

use tessera_types::config::TesseraConfig;
use tessera_types::error::Result;

use crate::history::History;
use crate::registry::CommandRegistry;
use crate::substitute::substitute;
use crate::tokenizer::tokenize;
use crate::variables::{Evaluator, LiteralEvaluator, Variables};

/// Output produced by a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to clear the terminal output buffer.
    Clear,
    /// Signal to change the terminal colors. `None` leaves a color as is.
    Colors {
        background: Option<String>,
        text: Option<String>,
    },
}

/// Everything an executor may read or change.
pub struct Environment<'a> {
    /// Current working directory.
    pub cwd: String,
    pub variables: &'a mut Variables,
    pub evaluator: &'a dyn Evaluator,
    /// The registry the command was dispatched from (used by `help`).
    pub registry: &'a CommandRegistry,
}

/// An interactive session: registry, variables, history, and cwd.
pub struct Shell {
    registry: CommandRegistry,
    variables: Variables,
    history: History,
    evaluator: Box<dyn Evaluator>,
    cwd: String,
    prompt_prefix: String,
}

impl Shell {
    pub fn new(registry: CommandRegistry, config: &TesseraConfig) -> Self {
        Self {
            registry,
            variables: Variables::new(),
            history: History::new(config.history_limit),
            evaluator: Box::new(LiteralEvaluator),
            cwd: resolve_path("/", &config.start_dir),
            prompt_prefix: config.prompt_prefix.clone(),
        }
    }

    /// Replace the expression evaluator used by `set` and `${{expr}}`.
    pub fn with_evaluator(mut self, evaluator: Box<dyn Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Process one line of input.
    ///
    /// Blank input does nothing. Otherwise the line is recorded in history,
    /// variables are substituted, and the result is tokenized and
    /// dispatched.
    pub fn submit(&mut self, line: &str) -> Result<CommandOutput> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(CommandOutput::None);
        }
        self.history.push(line);

        let expanded = substitute(line, &self.variables, self.evaluator.as_ref(), &self.cwd)?;
        let tokens = tokenize(&expanded);
        log::trace!("tokens: {tokens:?}");

        let mut env = Environment {
            cwd: self.cwd.clone(),
            variables: &mut self.variables,
            evaluator: self.evaluator.as_ref(),
            registry: &self.registry,
        };
        let output = self.registry.dispatch(&expanded, &tokens, &mut env);
        self.cwd = env.cwd;
        output
    }

    /// The prompt, e.g. `cmd:/home>`.
    pub fn prompt(&self) -> String {
        format!("{}{}>", self.prompt_prefix, self.cwd)
    }

    pub fn history_back(&mut self) -> Option<&str> {
        self.history.back()
    }

    pub fn history_forward(&mut self) -> Option<&str> {
        self.history.forward()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut Variables {
        &mut self.variables
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }
}

/// Resolve a possibly-relative path against a working directory.
pub fn resolve_path(cwd: &str, input: &str) -> String {
    let raw = if input.starts_with('/') {
        input.to_string()
    } else if cwd == "/" {
        format!("/{input}")
    } else {
        format!("{cwd}/{input}")
    };

    let mut parts: Vec<&str> = Vec::new();
    for component in raw.split('/') {
        match component {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, CommandOverload, CommandParam};
    use serde_json::json;
    use tessera_types::error::TesseraError;

    fn shell() -> Shell {
        let mut reg = CommandRegistry::new();
        reg.register(
            "echo",
            Command::new().overload(
                CommandOverload::new("Echo.")
                    .param(CommandParam::new("text", "").variadic())
                    .executes(|params, _, _| {
                        Ok(CommandOutput::Text(
                            params.list("text").unwrap_or_default().join(" "),
                        ))
                    }),
            ),
        );
        reg.register(
            "goto",
            Command::new().overload(
                CommandOverload::new("Change directory.")
                    .param(CommandParam::new("path", ""))
                    .executes(|params, _, env| {
                        env.cwd = resolve_path(&env.cwd, params.require_text("path")?);
                        Ok(CommandOutput::None)
                    }),
            ),
        );
        Shell::new(reg, &TesseraConfig::default())
    }

    #[test]
    fn submit_dispatches() {
        let mut sh = shell();
        assert_eq!(
            sh.submit("echo hello world").unwrap(),
            CommandOutput::Text("hello world".into())
        );
    }

    #[test]
    fn submit_ignores_blank_lines() {
        let mut sh = shell();
        assert_eq!(sh.submit("   ").unwrap(), CommandOutput::None);
        assert!(sh.history().is_empty());
    }

    #[test]
    fn submit_records_trimmed_history_even_on_error() {
        let mut sh = shell();
        assert!(sh.submit("  nope  ").is_err());
        assert_eq!(sh.history().entries(), ["nope"]);
    }

    #[test]
    fn unknown_command_error() {
        let mut sh = shell();
        match sh.submit("foobar x") {
            Err(TesseraError::UnknownCommand(name)) => assert_eq!(name, "foobar"),
            other => panic!("expected UnknownCommand, got {other:?}"),
        }
    }

    #[test]
    fn no_matching_overload_error() {
        let mut sh = shell();
        let err = sh.submit("goto").unwrap_err();
        assert!(matches!(err, TesseraError::NoMatchingOverload(ref n) if n == "goto"));
    }

    #[test]
    fn variables_are_substituted_before_tokenizing() {
        let mut sh = shell();
        sh.variables_mut().set("who", json!("big world"));
        assert_eq!(
            sh.submit("echo hello $who").unwrap(),
            CommandOutput::Text("hello big world".into())
        );
    }

    #[test]
    fn executor_can_change_cwd_and_prompt_follows() {
        let mut sh = shell();
        assert_eq!(sh.prompt(), "cmd:/>");
        sh.submit("goto /home/user").unwrap();
        assert_eq!(sh.cwd(), "/home/user");
        assert_eq!(sh.prompt(), "cmd:/home/user>");
        sh.submit("goto ..").unwrap();
        assert_eq!(sh.cwd(), "/home");
    }

    #[test]
    fn prompt_uses_configured_prefix_and_start_dir() {
        let config = TesseraConfig {
            prompt_prefix: "$ ".into(),
            start_dir: "/srv/./app".into(),
            ..TesseraConfig::default()
        };
        let sh = Shell::new(CommandRegistry::new(), &config);
        assert_eq!(sh.prompt(), "$ /srv/app>");
    }

    #[test]
    fn history_navigation_through_shell() {
        let mut sh = shell();
        sh.submit("echo a").unwrap();
        sh.submit("echo b").unwrap();
        assert_eq!(sh.history_back(), Some("echo b"));
        assert_eq!(sh.history_back(), Some("echo a"));
        assert_eq!(sh.history_forward(), Some("echo b"));
        assert_eq!(sh.history_forward(), Some(""));
    }

    /// Evaluates any expression to its upper-cased text.
    struct Shout;

    impl Evaluator for Shout {
        fn evaluate(&self, expr: &str, _vars: &Variables) -> Result<serde_json::Value> {
            Ok(json!(expr.trim().to_uppercase()))
        }
    }

    #[test]
    fn custom_evaluator_backs_set_and_expressions() {
        let mut reg = CommandRegistry::new();
        crate::commands::register_builtins(&mut reg);
        let mut sh = Shell::new(reg, &TesseraConfig::default()).with_evaluator(Box::new(Shout));

        // Not JSON, so only the custom evaluator accepts it.
        sh.submit("set word hello there").unwrap();
        assert_eq!(sh.variables().get("word"), Some(&json!("HELLO THERE")));
        assert_eq!(
            sh.submit("echo ${{ quiet }}!").unwrap(),
            CommandOutput::Text("QUIET!".into())
        );
    }

    #[test]
    fn default_evaluator_rejects_bare_words() {
        let mut reg = CommandRegistry::new();
        crate::commands::register_builtins(&mut reg);
        let mut sh = Shell::new(reg, &TesseraConfig::default());
        assert!(matches!(
            sh.submit("set word hello"),
            Err(TesseraError::Eval(_))
        ));
    }

    #[test]
    fn resolve_absolute() {
        assert_eq!(resolve_path("/home", "/etc"), "/etc");
    }

    #[test]
    fn resolve_relative() {
        assert_eq!(resolve_path("/home", "user"), "/home/user");
        assert_eq!(resolve_path("/", "tmp"), "/tmp");
    }

    #[test]
    fn resolve_dot_dot() {
        assert_eq!(resolve_path("/home/user", ".."), "/home");
        assert_eq!(resolve_path("/", ".."), "/");
        assert_eq!(resolve_path("/a/b", "../../c/./d"), "/c/d");
    }
}
