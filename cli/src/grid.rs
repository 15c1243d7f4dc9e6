// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Text rendering of the weekly schedule grid.
//!
//! The grid covers Monday to Friday with one column per hour slot from
//! 07:00 to 19:00. Each event becomes a card whose horizontal offset and
//! width are proportional to its start hour and duration. Overlapping
//! events are not stacked: the later card in list order overdraws the
//! earlier one.

use rota_core::{EARLIEST_HOUR, FullScheduleEvent, LATEST_HOUR, Weekday};
use unicode_width::UnicodeWidthChar;

/// First hour column of the grid.
pub const GRID_START_HOUR: i64 = EARLIEST_HOUR;

/// Hour the last grid column starts at. Events may run until
/// [`LATEST_HOUR`], which is the right edge of this column.
pub const GRID_END_HOUR: i64 = LATEST_HOUR - 1;

/// Horizontal characters per hour slot.
pub const CELL_WIDTH: usize = 6;

const SLOT_COUNT: usize = (GRID_END_HOUR - GRID_START_HOUR + 1) as usize;
const DAY_LABEL_WIDTH: usize = 5;

/// Horizontal placement of an event card, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpan {
    /// Characters from the left edge of the hour columns.
    pub offset: usize,

    /// Width of the card.
    pub width: usize,
}

/// Where an event's card sits on a day row. Hours outside the grid range
/// are clamped to its edges.
pub fn card_span(start_hour: i64, end_hour: i64, cell_width: usize) -> CardSpan {
    let start = start_hour.clamp(GRID_START_HOUR, GRID_END_HOUR + 1);
    let end = end_hour.clamp(GRID_START_HOUR, GRID_END_HOUR + 1);

    CardSpan {
        offset: (start - GRID_START_HOUR) as usize * cell_width,
        width: (end - start).max(0) as usize * cell_width,
    }
}

/// Render the full week as plain text, one row per weekday.
pub fn render_grid(events: &[FullScheduleEvent]) -> String {
    let mut out = String::new();

    out.push_str(&" ".repeat(DAY_LABEL_WIDTH));
    for hour in GRID_START_HOUR..=GRID_END_HOUR {
        out.push_str(&format!("{:<CELL_WIDTH$}", format!("{hour:02}:00")));
    }
    truncate_trailing_spaces(&mut out);
    out.push('\n');

    for day in Weekday::ALL {
        let mut row = vec![' '; SLOT_COUNT * CELL_WIDTH];
        for event in events.iter().filter(|e| e.event.day == day) {
            let span = card_span(event.event.start_hour, event.event.end_hour, CELL_WIDTH);
            let card = card_text(event, span.width);
            for (i, ch) in card.into_iter().enumerate() {
                if span.offset + i < row.len() {
                    row[span.offset + i] = ch;
                }
            }
        }

        out.push_str(&format!("{:<DAY_LABEL_WIDTH$}", day.short_label()));
        out.push_str(&row.iter().collect::<String>());
        truncate_trailing_spaces(&mut out);
        out.push('\n');
    }

    out
}

/// The characters of one card: brackets around a clipped
/// "subject room" label.
fn card_text(event: &FullScheduleEvent, width: usize) -> Vec<char> {
    if width == 0 {
        return Vec::new();
    }
    if width == 1 {
        return vec!['|'];
    }

    let inner_width = width - 2;
    let label = format!(
        "{} {}",
        event.event.subject_code, event.location.room_code
    );

    let mut inner = Vec::with_capacity(inner_width);
    let mut used = 0;
    for ch in label.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > inner_width {
            break;
        }
        inner.push(ch);
        used += w;
    }
    while used < inner_width {
        inner.push(' ');
        used += 1;
    }

    let mut card = vec!['['];
    card.extend(inner);
    card.push(']');
    card
}

fn truncate_trailing_spaces(out: &mut String) {
    let len = out.trim_end_matches(' ').len();
    out.truncate(len);
}
