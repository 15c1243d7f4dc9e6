// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use rota_core::APP_NAME;

/// Command-line interface
#[derive(Debug, Parser)]
#[command(name = APP_NAME)]
#[command(about = "Build and view a weekly class schedule from your terminal")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file. Defaults to
    /// $XDG_CONFIG_HOME/rota/config.toml on Linux and MacOS,
    /// %LOCALAPPDATA%/rota/config.toml on Windows.
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the weekly schedule grid (the default)
    Show,

    /// List all events
    List(ListArgs),

    /// Add a new event with the interactive editor
    Add,

    /// Edit an existing event
    Edit(EditArgs),

    /// Remove one event
    Remove(RemoveArgs),

    /// Delete every event from the schedule
    Clear(ClearArgs),

    /// Render the widget-style summary, grouped by weekday
    Widget,

    /// List the predefined subjects
    Subjects,

    /// List the known teachers
    Teachers,

    /// List the known rooms
    Rooms,

    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Id of the event to edit, as shown by `rota list`
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Id of the event to remove, as shown by `rota list`
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct CompletionArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_edit_with_id() {
        let cli = Cli::try_parse_from(["rota", "edit", "42"]).unwrap();
        match cli.command {
            Some(Commands::Edit(args)) => assert_eq!(args.id, 42),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn edit_requires_an_id() {
        assert!(Cli::try_parse_from(["rota", "edit"]).is_err());
    }

    #[test]
    fn list_output_defaults_to_table() {
        let cli = Cli::try_parse_from(["rota", "list"]).unwrap();
        match cli.command {
            Some(Commands::List(args)) => assert_eq!(args.output, OutputFormat::Table),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["rota", "list", "--output", "json"]).unwrap();
        match cli.command {
            Some(Commands::List(args)) => assert_eq!(args.output, OutputFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["rota"]).unwrap();
        assert!(cli.command.is_none());
    }
}
