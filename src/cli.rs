//! Command-line argument parsing for the `dockyard` tool
//!
//! Supports:
//! - Inspecting a saved layout (computed rectangles per pane)
//! - Validating a layout document without applying it

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::model::Rect;

/// Inspect and validate dockyard layout documents
#[derive(Parser, Debug)]
#[command(name = "dockyard", version, about = "Inspect and validate dockyard layouts")]
pub struct CliArgs {
    /// Engine config file (defaults to ~/.config/dockyard/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Load a layout with placeholder contents and print every pane rectangle
    Inspect {
        /// Layout document (defaults to ~/.config/dockyard/layout.json)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Host surface width
        #[arg(long, default_value_t = 1280.0)]
        width: f32,

        /// Host surface height
        #[arg(long, default_value_t = 800.0)]
        height: f32,
    },
    /// Check a layout document for structural errors
    Validate {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

impl CliCommand {
    /// Surface to lay the document out on
    pub fn surface(&self) -> Option<Rect> {
        match self {
            CliCommand::Inspect { width, height, .. } => {
                Some(Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0)))
            }
            CliCommand::Validate { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_defaults() {
        let args = CliArgs::try_parse_from(["dockyard", "inspect", "layout.json"]).unwrap();
        assert_eq!(
            args.command,
            CliCommand::Inspect {
                path: Some(PathBuf::from("layout.json")),
                width: 1280.0,
                height: 800.0,
            }
        );
        assert_eq!(args.command.surface(), Some(Rect::new(0.0, 0.0, 1280.0, 800.0)));
    }

    #[test]
    fn test_validate_requires_path() {
        assert!(CliArgs::try_parse_from(["dockyard", "validate"]).is_err());
        let args = CliArgs::try_parse_from(["dockyard", "--config", "c.yaml", "validate", "l.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("c.yaml")));
    }
}
