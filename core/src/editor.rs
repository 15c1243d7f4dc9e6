// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use crate::catalog::{Location, Subject, Teacher};
use crate::draft::EventDraft;
use crate::event::FullScheduleEvent;

/// State holder for the entry and edit forms.
///
/// Owns one working draft plus a live filter query per picker. The validity
/// flag is recomputed on every draft update so the UI can enable or disable
/// its save control; the same check runs again at save time in [`crate::Rota`].
#[derive(Debug, Default, Clone)]
pub struct EditorState {
    draft: EventDraft,
    is_valid: bool,

    subject_query: String,
    teacher_query: String,
    location_query: String,
}

impl EditorState {
    /// Fresh entry form with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit form seeded from a persisted event.
    pub fn from_full_event(full: &FullScheduleEvent) -> Self {
        let draft = EventDraft::from_full_event(full);
        let is_valid = draft.is_valid();
        Self {
            draft,
            is_valid,
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Replace the draft and recompute the validity flag.
    pub fn update_draft(&mut self, draft: EventDraft) {
        self.is_valid = draft.is_valid();
        self.draft = draft;
    }

    pub fn subject_query(&self) -> &str {
        &self.subject_query
    }

    pub fn teacher_query(&self) -> &str {
        &self.teacher_query
    }

    pub fn location_query(&self) -> &str {
        &self.location_query
    }

    pub fn set_subject_query(&mut self, query: impl Into<String>) {
        self.subject_query = query.into();
    }

    pub fn set_teacher_query(&mut self, query: impl Into<String>) {
        self.teacher_query = query.into();
    }

    pub fn set_location_query(&mut self, query: impl Into<String>) {
        self.location_query = query.into();
    }

    /// Subjects whose display name contains the current query,
    /// case-insensitively.
    pub fn filtered_subjects<'a>(&self, all: &'a [Subject]) -> Vec<&'a Subject> {
        all.iter()
            .filter(|s| contains_ignore_case(&s.full_display_name, &self.subject_query))
            .collect()
    }

    /// Teachers whose name contains the current query, case-insensitively.
    pub fn filtered_teachers<'a>(&self, all: &'a [Teacher]) -> Vec<&'a Teacher> {
        all.iter()
            .filter(|t| contains_ignore_case(&t.teacher_name, &self.teacher_query))
            .collect()
    }

    /// Locations whose room code contains the current query,
    /// case-insensitively.
    pub fn filtered_locations<'a>(&self, all: &'a [Location]) -> Vec<&'a Location> {
        all.iter()
            .filter(|l| contains_ignore_case(&l.room_code, &self.location_query))
            .collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
