//! Command handlers: one module per subcommand.

pub mod check;
pub mod completions;
pub mod list;
pub mod new;
pub mod selection;
