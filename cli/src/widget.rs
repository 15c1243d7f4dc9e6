// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Compact week summary, the same fixed-width listing the home-screen
//! widget shows: events grouped by weekday, one line per event.

use rota_core::{FullScheduleEvent, Weekday};

/// Render all events grouped by weekday. Within a day the input order is
/// kept, so callers should pass events already sorted by start hour.
pub fn render_widget(events: &[FullScheduleEvent]) -> String {
    let mut out = String::new();

    for day in Weekday::ALL {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(day.short_label());
        out.push('\n');

        let mut any = false;
        for event in events.iter().filter(|e| e.event.day == day) {
            out.push_str(&widget_line(event));
            out.push('\n');
            any = true;
        }
        if !any {
            out.push_str("(no classes)\n");
        }
    }

    out
}

/// One widget line: subject code, hour range and room in fixed columns.
pub fn widget_line(event: &FullScheduleEvent) -> String {
    let hours = format!(
        "[{:02}:00 - {:02}:00]",
        event.event.start_hour, event.event.end_hour
    );
    format!(
        "{:<20} {:<20} {:<10}",
        event.event.subject_code, hours, event.location.room_code
    )
}
