// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::error::Error;

use colored::Colorize;
use rota_core::{FullScheduleEvent, Obligation};
use unicode_width::UnicodeWidthStr;

use crate::cli::OutputFormat;

/// Renders events for `rota list`, as an aligned table or as JSON.
#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    output: OutputFormat,
}

impl EventFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                EventColumn::Id,
                EventColumn::Day,
                EventColumn::Time,
                EventColumn::Subject,
                EventColumn::Name,
                EventColumn::Teacher,
                EventColumn::Room,
                EventColumn::Obligation,
            ],
            output: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn format(&self, events: &[FullScheduleEvent]) -> Result<String, Box<dyn Error>> {
        match self.output {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(events)?),
            OutputFormat::Table => Ok(self.format_table(events)),
        }
    }

    fn format_table(&self, events: &[FullScheduleEvent]) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|col| {
                events
                    .iter()
                    .map(|e| col.format(e).width())
                    .chain([col.name().width()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for (col, width) in self.columns.iter().zip(&widths) {
            out.push_str(&pad(col.name(), *width));
            out.push_str("  ");
        }
        truncate_trailing_spaces(&mut out);
        out.push('\n');

        for event in events {
            for (col, width) in self.columns.iter().zip(&widths) {
                let cell = pad(&col.format(event), *width);
                let cell = match col {
                    EventColumn::Obligation => colorize_obligation(cell, event.event.obligation),
                    _ => cell,
                };
                out.push_str(&cell);
                out.push_str("  ");
            }
            truncate_trailing_spaces(&mut out);
            out.push('\n');
        }

        out
    }
}

impl Default for EventFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum EventColumn {
    Id,
    Day,
    Time,
    Subject,
    Name,
    Teacher,
    Room,
    Obligation,
}

impl EventColumn {
    fn name(&self) -> &'static str {
        match self {
            EventColumn::Id => "Id",
            EventColumn::Day => "Day",
            EventColumn::Time => "Time",
            EventColumn::Subject => "Subject",
            EventColumn::Name => "Name",
            EventColumn::Teacher => "Teacher",
            EventColumn::Room => "Room",
            EventColumn::Obligation => "Obligation",
        }
    }

    fn format<'a>(&self, event: &'a FullScheduleEvent) -> Cow<'a, str> {
        match self {
            EventColumn::Id => event.event.id.to_string().into(),
            EventColumn::Day => event.event.day.short_label().into(),
            EventColumn::Time => format!(
                "{:02}:00-{:02}:00",
                event.event.start_hour, event.event.end_hour
            )
            .into(),
            EventColumn::Subject => event.subject.shortened_code.as_str().into(),
            EventColumn::Name => event.subject.full_display_name.as_str().into(),
            EventColumn::Teacher => event.teacher.teacher_name.as_str().into(),
            EventColumn::Room => event.location.room_code.as_str().into(),
            EventColumn::Obligation => event.event.obligation.label().into(),
        }
    }
}

fn pad(value: &str, width: usize) -> String {
    let padding = width.saturating_sub(value.width());
    format!("{value}{}", " ".repeat(padding))
}

fn colorize_obligation(cell: String, obligation: Obligation) -> String {
    match obligation {
        Obligation::Mandatory => cell.red().to_string(),
        Obligation::PartiallyMandatory => cell.yellow().to_string(),
        Obligation::Optional => cell.green().to_string(),
    }
}

fn truncate_trailing_spaces(out: &mut String) {
    let len = out.trim_end_matches(' ').len();
    out.truncate(len);
}
