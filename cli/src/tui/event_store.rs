// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use rota_core::{
    EditorState, EventDraft, FullScheduleEvent, Location, Obligation, Subject, Teacher, Weekday,
};

use crate::tui::dispatcher::{Action, Dispatcher};

/// Form state behind the event editor.
///
/// The raw field texts live in [`EventData`]; the embedded [`EditorState`]
/// is re-synced after every action so validity and the filtered picker
/// lists always reflect what is on screen.
#[derive(Debug)]
pub struct EventStore {
    pub data: EventData,
    pub editor: EditorState,

    /// Whether any field changed since the store was created.
    pub dirty: bool,

    /// Whether the user submitted the changes.
    pub submit: bool,

    /// Whether the user confirmed removing the event.
    pub remove: bool,
}

#[derive(Debug)]
pub struct EventData {
    /// Row id of the event being edited, 0 for a new one.
    pub id: i64,

    /// Free text in the subject field. Doubles as the picker query.
    pub subject_text: String,

    /// Set when the subject was chosen from the predefined list. Typing
    /// in the subject field clears it again.
    pub picked_subject: Option<Subject>,

    pub teacher_text: String,
    pub room_text: String,
    pub obligation: Obligation,
    pub day: Weekday,
    pub start_text: String,
    pub end_text: String,
}

impl EventStore {
    /// Store for the entry form, seeded from the default draft.
    pub fn new_entry() -> Self {
        let draft = EventDraft::default();
        Self::new(EventData {
            id: 0,
            subject_text: String::new(),
            picked_subject: None,
            teacher_text: String::new(),
            room_text: String::new(),
            obligation: draft.obligation,
            day: draft.day,
            start_text: draft.start_hour.to_string(),
            end_text: draft.end_hour.to_string(),
        })
    }

    /// Store for the edit form, seeded from a persisted event.
    pub fn new_edit(full: &FullScheduleEvent) -> Self {
        Self::new(EventData {
            id: full.event.id,
            subject_text: full.subject.full_display_name.clone(),
            picked_subject: Some(full.subject.clone()),
            teacher_text: full.teacher.teacher_name.clone(),
            room_text: full.location.room_code.clone(),
            obligation: full.event.obligation,
            day: full.event.day,
            start_text: full.event.start_hour.to_string(),
            end_text: full.event.end_hour.to_string(),
        })
    }

    fn new(data: EventData) -> Self {
        let mut store = Self {
            data,
            editor: EditorState::new(),
            dirty: false,
            submit: false,
            remove: false,
        };
        store.sync_editor();
        store
    }

    /// The draft the current field texts describe. Unparseable hour text
    /// maps to an out-of-range hour, so the draft simply fails validation.
    pub fn draft(&self) -> EventDraft {
        let subject = match &self.data.picked_subject {
            Some(subject) => subject.clone(),
            None => Subject::custom(&self.data.subject_text),
        };

        EventDraft {
            id: self.data.id,
            subject,
            teacher: Teacher::new(self.data.teacher_text.trim()),
            location: Location::new(self.data.room_text.trim()),
            obligation: self.data.obligation,
            day: self.data.day,
            start_hour: parse_hour(&self.data.start_text),
            end_hour: parse_hour(&self.data.end_text),
            is_custom_subject: self.data.picked_subject.is_none(),
        }
    }

    fn sync_editor(&mut self) {
        self.editor.update_draft(self.draft());
        self.editor.set_subject_query(self.data.subject_text.clone());
        self.editor.set_teacher_query(self.data.teacher_text.clone());
        self.editor.set_location_query(self.data.room_text.clone());
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            match action {
                Action::UpdateSubjectText(v) => {
                    that.data.subject_text = v.clone();
                    that.data.picked_subject = None;
                    that.dirty = true;
                }
                Action::PickSubject(v) => {
                    that.data.subject_text = v.full_display_name.clone();
                    that.data.picked_subject = Some(v.clone());
                    that.dirty = true;
                }
                Action::UpdateTeacherText(v) => {
                    that.data.teacher_text = v.clone();
                    that.dirty = true;
                }
                Action::UpdateRoomText(v) => {
                    that.data.room_text = v.clone();
                    that.dirty = true;
                }
                Action::UpdateObligation(v) => {
                    that.data.obligation = *v;
                    that.dirty = true;
                }
                Action::UpdateDay(v) => {
                    that.data.day = *v;
                    that.dirty = true;
                }
                Action::UpdateStartHour(v) => {
                    that.data.start_text = v.clone();
                    that.dirty = true;
                }
                Action::UpdateEndHour(v) => {
                    that.data.end_text = v.clone();
                    that.dirty = true;
                }
                Action::SubmitChanges => that.submit = true,
                Action::ConfirmRemove => that.remove = true,
            }
            that.sync_editor();
        }));
        dispatcher.register(callback);
    }
}

fn parse_hour(text: &str) -> i64 {
    text.trim().parse().unwrap_or(-1)
}
