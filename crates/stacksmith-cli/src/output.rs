//! Terminal output for command handlers.
//!
//! Everything user-facing on stdout funnels through [`OutputManager`] so the
//! `--quiet`, `--no-color`, and `--output-format` flags are honoured in one
//! place. Error reporting does not come through here; `main::handle_error`
//! writes failures to stderr itself.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Auto is resolved here, once; handlers never see it.
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        // The flag and the config file can each turn color off; neither can
        // turn it back on.
        let color = !(args.no_color || config.output.no_color);

        Self {
            format,
            quiet: args.quiet,
            color,
            term: Term::stdout(),
        }
    }

    /// The resolved output format, never [`OutputFormat::Auto`].
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Unstyled line, dropped under `--quiet`.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// `✓ <msg>` in green.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status("\u{2713}", Style::new().green(), msg)
    }

    /// `ℹ <msg>` in blue.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status("\u{2139}", Style::new().blue(), msg)
    }

    /// Section heading, bold cyan.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.color {
            text.cyan().bold().to_string()
        } else {
            text.to_owned()
        };
        self.term.write_line(&line)
    }

    fn status(&self, glyph: &str, style: Style, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.color {
            format!("{} {}", glyph.style(style.bold()), msg.style(style))
        } else {
            format!("{glyph} {msg}")
        };
        self.term.write_line(&line)
    }
}
