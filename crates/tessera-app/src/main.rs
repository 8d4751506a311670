//! Tessera terminal entry point.
//!
//! Reads commands from stdin one line at a time and writes their output to
//! stdout. The config file path comes from the first argument or
//! `TESSERA_CONFIG`; without one the defaults are used. EOF exits.

mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use tessera_terminal::{CommandRegistry, Shell, register_builtins};
use tessera_types::config::TesseraConfig;

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TESSERA_CONFIG").ok())
        .map(PathBuf::from);
    let config = match &config_path {
        Some(path) => TesseraConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => TesseraConfig::default(),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .init();
    if let Some(path) = &config_path {
        log::info!("Using config {}", path.display());
    }

    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);
    log::info!("Registered {} commands", registry.len());
    let mut shell = Shell::new(registry, &config);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    if config.show_banner {
        writeln!(stdout, "Tessera [Version {}]", env!("CARGO_PKG_VERSION"))?;
        writeln!(stdout)?;
    }

    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "{}", shell.prompt())?;
        stdout.flush()?;
        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            break;
        };
        match shell.submit(&line?) {
            Ok(output) => render::write_output(&mut stdout, &output)?,
            Err(e) => render::write_error(&mut stdout, &e)?,
        }
    }

    log::info!("Exiting");
    Ok(())
}
