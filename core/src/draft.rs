// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use crate::catalog::{Location, Subject, Teacher};
use crate::event::{EARLIEST_HOUR, FullScheduleEvent, LATEST_HOUR, Obligation, ScheduleEvent, Weekday};

/// The in-memory, not-yet-persisted representation of an event being
/// created or edited. Discarded on screen exit unless saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// Row id of the event being edited, 0 for a new event.
    pub id: i64,

    pub subject: Subject,
    pub teacher: Teacher,
    pub location: Location,

    pub obligation: Obligation,
    pub day: Weekday,
    pub start_hour: i64,
    pub end_hour: i64,

    /// Whether the subject was synthesized from free text rather than
    /// chosen from the predefined list.
    pub is_custom_subject: bool,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            id: 0,
            subject: Subject::default(),
            teacher: Teacher::default(),
            location: Location::default(),
            obligation: Obligation::Mandatory,
            day: Weekday::Monday,
            start_hour: EARLIEST_HOUR,
            end_hour: EARLIEST_HOUR + 2,
            is_custom_subject: true,
        }
    }
}

impl EventDraft {
    /// Seed a draft from a persisted event, for the edit flow.
    pub fn from_full_event(full: &FullScheduleEvent) -> Self {
        Self {
            id: full.event.id,
            subject: full.subject.clone(),
            teacher: full.teacher.clone(),
            location: full.location.clone(),
            obligation: full.event.obligation,
            day: full.event.day,
            start_hour: full.event.start_hour,
            end_hour: full.event.end_hour,
            is_custom_subject: false,
        }
    }

    /// Whether the draft may be saved. Checked on every draft update to
    /// drive the UI-enabled flag, and again at save time.
    pub fn is_valid(&self) -> bool {
        !self.subject.shortened_code.trim().is_empty()
            && !self.teacher.teacher_name.trim().is_empty()
            && !self.location.room_code.trim().is_empty()
            && self.start_hour >= EARLIEST_HOUR
            && self.end_hour <= LATEST_HOUR
            && self.start_hour < self.end_hour
    }

    /// The event row this draft persists to.
    pub fn to_event(&self) -> ScheduleEvent {
        ScheduleEvent {
            id: self.id,
            teacher_name: self.teacher.teacher_name.clone(),
            room_code: self.location.room_code.clone(),
            subject_code: self.subject.shortened_code.clone(),
            obligation: self.obligation,
            day: self.day,
            start_hour: self.start_hour,
            end_hour: self.end_hour,
        }
    }
}
