//! Flags shared by every stacksmith subcommand.
//!
//! [`GlobalArgs`] is flattened into [`super::Cli`], so these work in any
//! position: `stacksmith -v new my-app` and `stacksmith new my-app -v` parse
//! the same.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Raise the log level.
    ///
    /// Resolver, composition, and injection all emit tracing events; `-v`
    /// surfaces progress, `-vv` the per-axis decisions, `-vvv` everything.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        conflicts_with = "quiet",
        help = "Raise log verbosity (repeatable)",
        long_help = "Raise the log level. By default only warnings and errors \
are shown; -v adds progress, -vv adds per-axis resolver decisions, -vvv \
traces everything. RUST_LOG overrides this entirely."
    )]
    pub verbose: u8,

    /// Print nothing except errors.
    ///
    /// Status lines and the confirmation prompt are skipped; generated files
    /// are still written.
    #[arg(short = 'q', long = "quiet", global = true, help = "Only print errors")]
    pub quiet: bool,

    /// Strip ANSI styling from all output.
    ///
    /// Also picked up from the `NO_COLOR` environment variable
    /// (<https://no-color.org>), and from `output.no_color` in the config
    /// file.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Turn off ANSI styling"
    )]
    pub no_color: bool,

    /// Read defaults from FILE instead of the standard config location.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Path to a stacksmith config file"
    )]
    pub config: Option<PathBuf>,

    /// Select how results are rendered.
    ///
    /// `check` and `list` honour `json` for machine consumption; the default
    /// picks human styling on a terminal and plain text when piped.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How to render results"
    )]
    pub output_format: OutputFormat,
}

/// Rendering mode for command results.
///
/// `Auto` is resolved against the terminal before any command runs; command
/// handlers only ever see the other three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a TTY, plain otherwise.
    #[default]
    Auto,
    /// Styled, colored output.
    Human,
    /// Unstyled text, suitable for pipes.
    Plain,
    /// Machine-readable JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn output_format_defaults_to_auto() {
        assert_eq!(OutputFormat::default(), OutputFormat::Auto);
    }

    #[test]
    fn output_format_accepts_kebab_names() {
        for name in ["auto", "human", "plain", "json"] {
            assert!(OutputFormat::from_str(name, false).is_ok(), "{name} should parse");
        }
        assert!(OutputFormat::from_str("yaml", false).is_err());
    }
}
