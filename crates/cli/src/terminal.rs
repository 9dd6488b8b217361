use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const HEADER: Color = Color::Magenta;
    const SUCCESS: Color = Color::Green;
    const ERROR: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
}

/// Colored status lines around the plain report text.
///
/// Reports and CSV go to stdout uncolored so they can be piped; only the
/// framing is styled.
pub struct Terminal;

impl Terminal {
    pub fn new() -> Self {
        Self
    }

    /// Section banner, e.g. one per sweep run.
    pub fn print_header(&self, title: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print(format!("== {} ==\n", title)),
            ResetColor,
        )?;
        Ok(())
    }

    pub fn print_success(&self, message: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::SUCCESS),
            Print(format!("{}\n", message)),
            ResetColor,
        )?;
        Ok(())
    }

    pub fn print_note(&self, message: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::DIM),
            Print(format!("{}\n", message)),
            ResetColor,
        )?;
        Ok(())
    }

    /// Plain text, flushed.
    pub fn print(&self, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_error(&self, message: &str) -> Result<()> {
        let mut stderr = io::stderr();
        execute!(
            stderr,
            SetForegroundColor(Colors::ERROR),
            Print(format!("[error: {}]\n", message)),
            ResetColor,
        )?;
        Ok(())
    }
}
