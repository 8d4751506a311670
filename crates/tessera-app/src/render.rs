//! Writing command results to a text stream.

use std::io::{self, Write};

use tessera_terminal::CommandOutput;

/// ANSI sequence that clears the screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Write a command's output.
pub fn write_output(out: &mut impl Write, output: &CommandOutput) -> io::Result<()> {
    match output {
        CommandOutput::Text(text) => writeln!(out, "{text}"),
        CommandOutput::None => Ok(()),
        CommandOutput::Clear => write!(out, "{CLEAR_SCREEN}"),
        CommandOutput::Colors { background, text } => {
            if let Some(bg) = background {
                writeln!(out, "Background color: {bg}")?;
            }
            if let Some(fg) = text {
                writeln!(out, "Text color: {fg}")?;
            }
            Ok(())
        },
    }
}

/// Write a failed command's error.
pub fn write_error(out: &mut impl Write, error: &impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "ERROR: {error}")
}
