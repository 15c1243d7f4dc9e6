// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod config;
mod event_formatter;
mod grid;
mod prompt;
mod tui;
mod widget;

pub use crate::cli::{Cli, Commands};

use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use rota_core::{APP_NAME, Rota};

use crate::cli::{ClearArgs, ListArgs, RemoveArgs};
use crate::event_formatter::EventFormatter;

/// Parse the command line and run the selected command.
pub async fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        None | Some(Commands::Show) => cmd_show(cli.config).await,
        Some(Commands::List(args)) => cmd_list(cli.config, &args).await,
        Some(Commands::Add) => cmd_add(cli.config).await,
        Some(Commands::Edit(args)) => cmd_edit(cli.config, args.id).await,
        Some(Commands::Remove(args)) => cmd_remove(cli.config, &args).await,
        Some(Commands::Clear(args)) => cmd_clear(cli.config, &args).await,
        Some(Commands::Widget) => cmd_widget(cli.config).await,
        Some(Commands::Subjects) => cmd_subjects(cli.config).await,
        Some(Commands::Teachers) => cmd_teachers(cli.config).await,
        Some(Commands::Rooms) => cmd_rooms(cli.config).await,
        Some(Commands::Completion(args)) => cmd_generate_completion(args.shell),
    }
}

async fn open(config: Option<PathBuf>) -> Result<Rota, Box<dyn Error>> {
    tracing::debug!("parsing configuration");
    let config = config::parse_config(config).await?;
    Rota::new(config).await
}

pub async fn cmd_show(config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let rota = open(config).await?;
    let events = rota.list_full_events().await?;
    print!("{}", grid::render_grid(&events));
    rota.close().await
}

pub async fn cmd_list(config: Option<PathBuf>, args: &ListArgs) -> Result<(), Box<dyn Error>> {
    let rota = open(config).await?;
    let events = rota.list_full_events().await?;

    let formatter = EventFormatter::new().with_output_format(args.output);
    print!("{}", formatter.format(&events)?);
    if matches!(args.output, cli::OutputFormat::Json) {
        println!();
    }
    rota.close().await
}

pub async fn cmd_add(config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let rota = open(config).await?;
    tui::add_event(&rota).await?;
    rota.close().await
}

pub async fn cmd_edit(config: Option<PathBuf>, id: i64) -> Result<(), Box<dyn Error>> {
    let rota = open(config).await?;
    tui::edit_event(&rota, id).await?;
    rota.close().await
}

pub async fn cmd_remove(config: Option<PathBuf>, args: &RemoveArgs) -> Result<(), Box<dyn Error>> {
    let rota = open(config).await?;

    let full = rota.get_full_event(args.id).await?;
    println!(
        "{} {} {:02}:00-{:02}:00 in {}",
        full.subject.shortened_code.bold(),
        full.event.day,
        full.event.start_hour,
        full.event.end_hour,
        full.location.room_code,
    );

    if args.yes || prompt::confirm("Remove this event?")? {
        rota.delete_event(args.id).await?;
        println!("Removed event {}", args.id);
    } else {
        println!("Aborted.");
    }
    rota.close().await
}

pub async fn cmd_clear(config: Option<PathBuf>, args: &ClearArgs) -> Result<(), Box<dyn Error>> {
    let rota = open(config).await?;

    let events = rota.list_full_events().await?;
    if events.is_empty() {
        println!("The schedule is already empty.");
        return rota.close().await;
    }

    let question = format!("Delete all {} events?", events.len());
    if args.yes || prompt::confirm(&question)? {
        rota.clear_events().await?;
        println!("Schedule cleared.");
    } else {
        println!("Aborted.");
    }
    rota.close().await
}

pub async fn cmd_widget(config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let rota = open(config).await?;
    let events = rota.list_full_events().await?;
    print!("{}", widget::render_widget(&events));
    rota.close().await
}

pub async fn cmd_subjects(config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let rota = open(config).await?;
    for subject in rota.list_subjects().await? {
        println!(
            "{:<10} {}",
            subject.shortened_code, subject.full_display_name
        );
    }
    rota.close().await
}

pub async fn cmd_teachers(config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let rota = open(config).await?;
    for teacher in rota.list_teachers().await? {
        println!("{}", teacher.teacher_name);
    }
    rota.close().await
}

pub async fn cmd_rooms(config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let rota = open(config).await?;
    for location in rota.list_locations().await? {
        println!("{}", location.room_code);
    }
    rota.close().await
}

pub fn cmd_generate_completion(shell: Shell) -> Result<(), Box<dyn Error>> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, APP_NAME, &mut io::stdout());
    Ok(())
}
