//! Implementation of the `stacksmith list` command.
//!
//! Prints the axis/value matrix so users can discover what `new` and
//! `check` accept without reading documentation.

use stacksmith_core::domain::{
    Addon, Api, Auth, Backend, Database, DbSetup, DirectoryConflict, ExampleApp, Frontend, Orm,
    PackageManager, Payments, Runtime, ServerDeploy, WebDeploy,
};

use crate::{
    cli::{ListArgs, ListFormat, global::GlobalArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// The full axis/value matrix, in flag order.
fn matrix() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("frontend", Frontend::ALL.iter().map(|v| v.as_str()).collect()),
        ("backend", Backend::ALL.iter().map(|v| v.as_str()).collect()),
        ("runtime", Runtime::ALL.iter().map(|v| v.as_str()).collect()),
        ("database", Database::ALL.iter().map(|v| v.as_str()).collect()),
        ("orm", Orm::ALL.iter().map(|v| v.as_str()).collect()),
        ("auth", Auth::ALL.iter().map(|v| v.as_str()).collect()),
        ("payments", Payments::ALL.iter().map(|v| v.as_str()).collect()),
        ("api", Api::ALL.iter().map(|v| v.as_str()).collect()),
        ("addons", Addon::ALL.iter().map(|v| v.as_str()).collect()),
        ("examples", ExampleApp::ALL.iter().map(|v| v.as_str()).collect()),
        ("db-setup", DbSetup::ALL.iter().map(|v| v.as_str()).collect()),
        ("web-deploy", WebDeploy::ALL.iter().map(|v| v.as_str()).collect()),
        (
            "server-deploy",
            ServerDeploy::ALL.iter().map(|v| v.as_str()).collect(),
        ),
        (
            "package-manager",
            PackageManager::ALL.iter().map(|v| v.as_str()).collect(),
        ),
        (
            "directory-conflict",
            DirectoryConflict::ALL.iter().map(|v| v.as_str()).collect(),
        ),
    ]
}

pub fn execute(args: ListArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let mut rows = matrix();

    if let Some(axis) = &args.axis {
        let wanted = axis.to_ascii_lowercase();
        rows.retain(|(name, _)| *name == wanted);
        if rows.is_empty() {
            let axes: Vec<&str> = matrix().iter().map(|(name, _)| *name).collect();
            return Err(CliError::InvalidInput {
                message: format!("unknown axis '{}' (expected one of: {})", axis, axes.join(", ")),
            });
        }
    }

    match args.format {
        ListFormat::Table => {
            output.header("Axes and accepted values:")?;
            let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
            for (name, values) in &rows {
                output.print(&format!("  {name:width$}  {}", values.join(", ")))?;
            }
        }

        ListFormat::List => {
            for (name, values) in &rows {
                for value in values {
                    println!("{name}={value}");
                }
            }
        }

        ListFormat::Json => {
            // Serialise as a JSON object to stdout (bypasses OutputManager
            // because JSON output must be parseable even in non-TTY pipes).
            let map: serde_json::Map<String, serde_json::Value> = rows
                .iter()
                .map(|(name, values)| {
                    (
                        (*name).to_string(),
                        serde_json::Value::from(values.clone()),
                    )
                })
                .collect();
            let json = serde_json::to_string_pretty(&map).map_err(|e| CliError::InvalidInput {
                message: format!("cannot serialize axis matrix: {e}"),
            })?;
            println!("{json}");
        }

        ListFormat::Csv => {
            println!("axis,value");
            for (name, values) in &rows {
                for value in values {
                    println!("{name},{value}");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_covers_every_selection_axis() {
        let names: Vec<&str> = matrix().iter().map(|(name, _)| *name).collect();
        for axis in stacksmith_core::domain::Axis::ALL {
            assert!(names.contains(&axis.as_str()), "missing {axis}");
        }
    }

    #[test]
    fn every_axis_has_values() {
        for (name, values) in matrix() {
            assert!(!values.is_empty(), "axis {name} has no values");
        }
    }
}
