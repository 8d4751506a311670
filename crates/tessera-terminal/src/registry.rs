//! Command registry: canonical-name and alias tables.

use std::collections::HashMap;
use std::sync::Arc;

use tessera_types::error::{Result, TesseraError};

use crate::command::Command;
use crate::interpreter::{CommandOutput, Environment};
use crate::resolver;

/// Registry of available commands.
///
/// Filled once at startup and read-only afterwards. Lookup checks canonical
/// names before aliases.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<Command>>,
    aliases: HashMap<String, Arc<Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under `name` and under each of its aliases.
    ///
    /// Replaces any existing command with the same name, and any existing
    /// alias entry with the same alias.
    pub fn register(&mut self, name: &str, mut command: Command) {
        command.set_name(name);
        let command = Arc::new(command);
        for alias in command.aliases() {
            self.aliases.insert(alias.clone(), Arc::clone(&command));
        }
        if self.commands.insert(name.to_string(), command).is_some() {
            log::debug!("command {name:?} re-registered; previous definition replaced");
        }
    }

    /// Find a command by canonical name, falling back to aliases.
    pub fn lookup(&self, name: &str) -> Result<&Command> {
        self.get(name)
            .ok_or_else(|| TesseraError::UnknownCommand(name.to_string()))
    }

    /// Like [`lookup`](Self::lookup), without the error.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands
            .get(name)
            .or_else(|| self.aliases.get(name))
            .map(Arc::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of canonical names registered.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All commands, sorted by canonical name.
    pub fn list_commands(&self) -> Vec<&Command> {
        let mut cmds: Vec<&Command> = self.commands.values().map(Arc::as_ref).collect();
        cmds.sort_by(|a, b| a.name().cmp(b.name()));
        cmds
    }

    /// Commands that appear in summary listings, sorted by name.
    pub fn visible_commands(&self) -> Vec<&Command> {
        let mut cmds = self.list_commands();
        cmds.retain(|c| !c.is_hidden());
        cmds
    }

    /// Return sorted completions (names and aliases) for a partial command
    /// name. Hidden commands are not offered.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        let mut out: Vec<String> = self
            .commands
            .iter()
            .chain(self.aliases.iter())
            .filter(|(name, cmd)| name.starts_with(partial) && !cmd.is_hidden())
            .map(|(name, _)| name.clone())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Look up the command named by `tokens[0]`, resolve an overload, and run
    /// it.
    ///
    /// An empty token list is a no-op. Lookup and resolution failures are
    /// returned as errors; executor errors pass through unchanged.
    pub fn dispatch(
        &self,
        raw_text: &str,
        tokens: &[String],
        env: &mut Environment<'_>,
    ) -> Result<CommandOutput> {
        let Some(name) = tokens.first() else {
            return Ok(CommandOutput::None);
        };
        let command = self.lookup(name)?;
        resolver::dispatch(command, raw_text, tokens, env)
    }
}
