// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use ratatui::crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, Paragraph};
use ratatui::Frame;
use rota_core::{Obligation, Weekday};

use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_store::EventStore;
use crate::tui::Catalog;

const MAX_SUGGESTIONS: usize = 5;

/// Messages the editor sends back to the run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Leave without saving.
    Exit,

    /// The draft was submitted.
    Submit,

    /// Removal of the event was confirmed.
    Remove,
}

/// Modal state of the editor. While a dialog is open, form keys are
/// swallowed until the dialog is answered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    None,
    ConfirmDiscard,
    ConfirmRemove,
    InvalidEntry,
    StoreError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Subject,
    Teacher,
    Room,
    Obligation,
    Day,
    StartHour,
    EndHour,
}

impl Field {
    const ALL: [Field; 7] = [
        Field::Subject,
        Field::Teacher,
        Field::Room,
        Field::Obligation,
        Field::Day,
        Field::StartHour,
        Field::EndHour,
    ];

    fn title(self) -> &'static str {
        match self {
            Field::Subject => "Subject",
            Field::Teacher => "Teacher",
            Field::Room => "Room",
            Field::Obligation => "Obligation",
            Field::Day => "Day",
            Field::StartHour => "Starts at",
            Field::EndHour => "Ends at",
        }
    }

    fn next(self) -> Field {
        let i = Field::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Field::ALL[(i + 1) % Field::ALL.len()]
    }

    fn prev(self) -> Field {
        let i = Field::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Field::ALL[(i + Field::ALL.len() - 1) % Field::ALL.len()]
    }

    fn is_text(self) -> bool {
        matches!(
            self,
            Field::Subject | Field::Teacher | Field::Room | Field::StartHour | Field::EndHour
        )
    }
}

/// The event entry and edit form.
pub struct EventEditor<'a> {
    title: String,
    catalog: &'a Catalog,
    allow_remove: bool,
    focus: Field,
    dialog: DialogState,
}

impl<'a> EventEditor<'a> {
    pub fn new(title: impl Into<String>, catalog: &'a Catalog, allow_remove: bool) -> Self {
        Self {
            title: title.into(),
            catalog,
            allow_remove,
            focus: Field::Subject,
            dialog: DialogState::None,
        }
    }

    /// Open the editor with a store-error dialog already showing, for the
    /// retry path after a failed save.
    pub fn show_store_error(&mut self, message: String) {
        self.dialog = DialogState::StoreError(message);
    }

    #[cfg(test)]
    fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<EventStore>>,
        key: KeyCode,
    ) -> Option<Message> {
        match self.dialog.clone() {
            DialogState::None => self.on_form_key(dispatcher, store, key),
            DialogState::ConfirmDiscard => {
                self.dialog = DialogState::None;
                match key {
                    KeyCode::Char('y') | KeyCode::Char('Y') => Some(Message::Exit),
                    _ => None,
                }
            }
            DialogState::ConfirmRemove => {
                self.dialog = DialogState::None;
                match key {
                    KeyCode::Char('y') | KeyCode::Char('Y') => {
                        dispatcher.dispatch(&Action::ConfirmRemove);
                        Some(Message::Remove)
                    }
                    _ => None,
                }
            }
            DialogState::InvalidEntry | DialogState::StoreError(_) => {
                self.dialog = DialogState::None;
                None
            }
        }
    }

    fn on_form_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<EventStore>>,
        key: KeyCode,
    ) -> Option<Message> {
        match key {
            KeyCode::Esc => {
                if store.borrow().dirty {
                    self.dialog = DialogState::ConfirmDiscard;
                    None
                } else {
                    Some(Message::Exit)
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::F(2) => {
                if store.borrow().editor.is_valid() {
                    dispatcher.dispatch(&Action::SubmitChanges);
                    Some(Message::Submit)
                } else {
                    self.dialog = DialogState::InvalidEntry;
                    None
                }
            }
            KeyCode::F(8) if self.allow_remove => {
                self.dialog = DialogState::ConfirmRemove;
                None
            }
            KeyCode::Enter => {
                self.complete_from_picker(dispatcher, store);
                None
            }
            KeyCode::Left => {
                self.cycle_choice(dispatcher, store, -1);
                None
            }
            KeyCode::Right => {
                self.cycle_choice(dispatcher, store, 1);
                None
            }
            KeyCode::Char(c) if self.focus.is_text() => {
                let mut text = self.current_text(store);
                text.push(c);
                dispatcher.dispatch(&self.text_action(text));
                None
            }
            KeyCode::Backspace if self.focus.is_text() => {
                let mut text = self.current_text(store);
                text.pop();
                dispatcher.dispatch(&self.text_action(text));
                None
            }
            _ => None,
        }
    }

    /// Replace the focused picker field with its first matching candidate.
    fn complete_from_picker(&self, dispatcher: &mut Dispatcher, store: &Rc<RefCell<EventStore>>) {
        let action = {
            let store = store.borrow();
            match self.focus {
                Field::Subject => store
                    .editor
                    .filtered_subjects(&self.catalog.subjects)
                    .first()
                    .map(|s| Action::PickSubject((*s).clone())),
                Field::Teacher => store
                    .editor
                    .filtered_teachers(&self.catalog.teachers)
                    .first()
                    .map(|t| Action::UpdateTeacherText(t.teacher_name.clone())),
                Field::Room => store
                    .editor
                    .filtered_locations(&self.catalog.locations)
                    .first()
                    .map(|l| Action::UpdateRoomText(l.room_code.clone())),
                _ => None,
            }
        };
        if let Some(action) = action {
            dispatcher.dispatch(&action);
        }
    }

    fn cycle_choice(
        &self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<EventStore>>,
        step: i64,
    ) {
        let action = {
            let store = store.borrow();
            match self.focus {
                Field::Obligation => {
                    const CHOICES: [Obligation; 3] = [
                        Obligation::Mandatory,
                        Obligation::PartiallyMandatory,
                        Obligation::Optional,
                    ];
                    Some(Action::UpdateObligation(cycle(
                        &CHOICES,
                        store.data.obligation,
                        step,
                    )))
                }
                Field::Day => Some(Action::UpdateDay(cycle(
                    &Weekday::ALL,
                    store.data.day,
                    step,
                ))),
                _ => None,
            }
        };
        if let Some(action) = action {
            dispatcher.dispatch(&action);
        }
    }

    fn current_text(&self, store: &Rc<RefCell<EventStore>>) -> String {
        let store = store.borrow();
        match self.focus {
            Field::Subject => store.data.subject_text.clone(),
            Field::Teacher => store.data.teacher_text.clone(),
            Field::Room => store.data.room_text.clone(),
            Field::StartHour => store.data.start_text.clone(),
            Field::EndHour => store.data.end_text.clone(),
            _ => String::new(),
        }
    }

    fn text_action(&self, text: String) -> Action {
        match self.focus {
            Field::Subject => Action::UpdateSubjectText(text),
            Field::Teacher => Action::UpdateTeacherText(text),
            Field::Room => Action::UpdateRoomText(text),
            Field::StartHour => Action::UpdateStartHour(text),
            Field::EndHour => Action::UpdateEndHour(text),
            _ => unreachable!("not a text field"),
        }
    }

    pub fn render(&self, store: &Rc<RefCell<EventStore>>, frame: &mut Frame) {
        let store = store.borrow();
        let area = frame.area();

        let block = Block::bordered().title(self.title.as_str());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = vec![Constraint::Length(3); Field::ALL.len()];
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        for (i, field) in Field::ALL.iter().enumerate() {
            let focused = *field == self.focus;
            let style = if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            let value = self.field_display(&store, *field);
            let widget = Paragraph::new(value)
                .block(Block::bordered().title(field.title()).border_style(style));
            frame.render_widget(widget, rows[i]);
        }

        let status = self.status_line(&store);
        frame.render_widget(Paragraph::new(status), rows[Field::ALL.len()]);

        self.render_suggestions(&store, frame, rows[Field::ALL.len() + 1]);

        if self.dialog != DialogState::None {
            self.render_dialog(frame, area);
        }
    }

    fn field_display(&self, store: &EventStore, field: Field) -> String {
        match field {
            Field::Subject => match &store.data.picked_subject {
                Some(subject) => {
                    format!("{} [{}]", subject.full_display_name, subject.shortened_code)
                }
                None => store.data.subject_text.clone(),
            },
            Field::Teacher => store.data.teacher_text.clone(),
            Field::Room => store.data.room_text.clone(),
            Field::Obligation => format!("< {} >", store.data.obligation.label()),
            Field::Day => format!("< {} >", store.data.day),
            Field::StartHour => store.data.start_text.clone(),
            Field::EndHour => store.data.end_text.clone(),
        }
    }

    fn status_line(&self, store: &EventStore) -> Line<'static> {
        let mut spans = vec![Span::raw(" Esc cancel  Tab next  Enter pick ")];
        if self.allow_remove {
            spans.push(Span::raw(" F8 remove "));
        }
        if store.editor.is_valid() {
            spans.push(Span::styled(" F2 save ", Style::default().fg(Color::Green)));
        } else {
            spans.push(Span::styled(
                " incomplete ",
                Style::default().fg(Color::Red),
            ));
        }
        Line::from(spans)
    }

    fn render_suggestions(&self, store: &EventStore, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = match self.focus {
            Field::Subject => store
                .editor
                .filtered_subjects(&self.catalog.subjects)
                .into_iter()
                .take(MAX_SUGGESTIONS)
                .map(|s| ListItem::new(format!("{} [{}]", s.full_display_name, s.shortened_code)))
                .collect(),
            Field::Teacher => store
                .editor
                .filtered_teachers(&self.catalog.teachers)
                .into_iter()
                .take(MAX_SUGGESTIONS)
                .map(|t| ListItem::new(t.teacher_name.clone()))
                .collect(),
            Field::Room => store
                .editor
                .filtered_locations(&self.catalog.locations)
                .into_iter()
                .take(MAX_SUGGESTIONS)
                .map(|l| ListItem::new(l.room_code.clone()))
                .collect(),
            _ => Vec::new(),
        };

        if !items.is_empty() {
            let list = List::new(items).block(Block::bordered().title("Matches"));
            frame.render_widget(list, area);
        }
    }

    fn render_dialog(&self, frame: &mut Frame, area: Rect) {
        let text = match &self.dialog {
            DialogState::None => return,
            DialogState::ConfirmDiscard => "Discard unsaved changes? (y/n)".to_string(),
            DialogState::ConfirmRemove => "Remove this event? (y/n)".to_string(),
            DialogState::InvalidEntry => {
                "The entry is incomplete or its hours are invalid. Press any key.".to_string()
            }
            DialogState::StoreError(e) => {
                format!("Saving failed: {e}. Press any key to edit again.")
            }
        };

        let popup = popup_area(area, 60, 5);
        frame.render_widget(Clear, popup);
        let widget = Paragraph::new(text)
            .block(Block::bordered().title("Rota").border_style(Style::default().bold()));
        frame.render_widget(widget, popup);
    }
}

fn cycle<T: Copy + PartialEq>(choices: &[T], current: T, step: i64) -> T {
    let i = choices.iter().position(|c| *c == current).unwrap_or(0) as i64;
    let n = choices.len() as i64;
    choices[((i + step).rem_euclid(n)) as usize]
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_core::{Subject, Teacher};

    fn catalog() -> Catalog {
        Catalog {
            subjects: vec![Subject::new("CS101", "Introduction to Programming")],
            teachers: vec![Teacher::new("Dr. Johnson")],
            locations: vec![rota_core::Location::new("A101")],
        }
    }

    fn setup(store: EventStore) -> (Rc<RefCell<EventStore>>, Dispatcher) {
        let store = Rc::new(RefCell::new(store));
        let mut dispatcher = Dispatcher::new();
        EventStore::register_to(store.clone(), &mut dispatcher);
        (store, dispatcher)
    }

    fn type_text(
        editor: &mut EventEditor,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<EventStore>>,
        text: &str,
    ) {
        for c in text.chars() {
            editor.on_key(dispatcher, store, KeyCode::Char(c));
        }
    }

    fn fill_valid_entry(
        editor: &mut EventEditor,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<EventStore>>,
    ) {
        type_text(editor, dispatcher, store, "Calculus II");
        editor.on_key(dispatcher, store, KeyCode::Tab);
        type_text(editor, dispatcher, store, "Dr. Johnson");
        editor.on_key(dispatcher, store, KeyCode::Tab);
        type_text(editor, dispatcher, store, "B205");
        // obligation and day keep their defaults; the default hours 7-9
        // are already valid
    }

    #[test]
    fn esc_on_a_clean_form_exits() {
        let cat = catalog();
        let (store, mut dispatcher) = setup(EventStore::new_entry());
        let mut editor = EventEditor::new("Add event", &cat, false);

        let msg = editor.on_key(&mut dispatcher, &store, KeyCode::Esc);
        assert_eq!(msg, Some(Message::Exit));
    }

    #[test]
    fn esc_on_a_dirty_form_asks_before_discarding() {
        let cat = catalog();
        let (store, mut dispatcher) = setup(EventStore::new_entry());
        let mut editor = EventEditor::new("Add event", &cat, false);

        type_text(&mut editor, &mut dispatcher, &store, "Phys");
        let msg = editor.on_key(&mut dispatcher, &store, KeyCode::Esc);
        assert_eq!(msg, None);
        assert_eq!(*editor.dialog(), DialogState::ConfirmDiscard);

        // answering no returns to the form
        let msg = editor.on_key(&mut dispatcher, &store, KeyCode::Char('n'));
        assert_eq!(msg, None);
        assert_eq!(*editor.dialog(), DialogState::None);

        // answering yes exits without submitting
        editor.on_key(&mut dispatcher, &store, KeyCode::Esc);
        let msg = editor.on_key(&mut dispatcher, &store, KeyCode::Char('y'));
        assert_eq!(msg, Some(Message::Exit));
        assert!(!store.borrow().submit);
    }

    #[test]
    fn submitting_an_invalid_entry_opens_the_invalid_dialog() {
        let cat = catalog();
        let (store, mut dispatcher) = setup(EventStore::new_entry());
        let mut editor = EventEditor::new("Add event", &cat, false);

        let msg = editor.on_key(&mut dispatcher, &store, KeyCode::F(2));
        assert_eq!(msg, None);
        assert_eq!(*editor.dialog(), DialogState::InvalidEntry);
        assert!(!store.borrow().submit);

        // any key dismisses it
        editor.on_key(&mut dispatcher, &store, KeyCode::Enter);
        assert_eq!(*editor.dialog(), DialogState::None);
    }

    #[test]
    fn submitting_a_valid_entry_sets_the_submit_flag() {
        let cat = catalog();
        let (store, mut dispatcher) = setup(EventStore::new_entry());
        let mut editor = EventEditor::new("Add event", &cat, false);

        fill_valid_entry(&mut editor, &mut dispatcher, &store);
        let msg = editor.on_key(&mut dispatcher, &store, KeyCode::F(2));
        assert_eq!(msg, Some(Message::Submit));
        assert!(store.borrow().submit);
    }

    #[test]
    fn remove_needs_confirmation() {
        let cat = catalog();
        let (store, mut dispatcher) = setup(EventStore::new_entry());
        let mut editor = EventEditor::new("Edit event", &cat, true);

        editor.on_key(&mut dispatcher, &store, KeyCode::F(8));
        assert_eq!(*editor.dialog(), DialogState::ConfirmRemove);

        let msg = editor.on_key(&mut dispatcher, &store, KeyCode::Char('n'));
        assert_eq!(msg, None);
        assert!(!store.borrow().remove);

        editor.on_key(&mut dispatcher, &store, KeyCode::F(8));
        let msg = editor.on_key(&mut dispatcher, &store, KeyCode::Char('y'));
        assert_eq!(msg, Some(Message::Remove));
        assert!(store.borrow().remove);
    }

    #[test]
    fn remove_key_is_ignored_in_the_entry_form() {
        let cat = catalog();
        let (store, mut dispatcher) = setup(EventStore::new_entry());
        let mut editor = EventEditor::new("Add event", &cat, false);

        editor.on_key(&mut dispatcher, &store, KeyCode::F(8));
        assert_eq!(*editor.dialog(), DialogState::None);
        assert!(!store.borrow().remove);
    }

    #[test]
    fn enter_completes_the_first_picker_match() {
        let cat = catalog();
        let (store, mut dispatcher) = setup(EventStore::new_entry());
        let mut editor = EventEditor::new("Add event", &cat, false);

        type_text(&mut editor, &mut dispatcher, &store, "intro");
        editor.on_key(&mut dispatcher, &store, KeyCode::Enter);

        let store_ref = store.borrow();
        let draft = store_ref.draft();
        assert!(!draft.is_custom_subject);
        assert_eq!(draft.subject.shortened_code, "CS101");
    }

    #[test]
    fn arrows_cycle_day_and_obligation() {
        let cat = catalog();
        let (store, mut dispatcher) = setup(EventStore::new_entry());
        let mut editor = EventEditor::new("Add event", &cat, false);

        // focus the obligation field
        editor.on_key(&mut dispatcher, &store, KeyCode::Tab);
        editor.on_key(&mut dispatcher, &store, KeyCode::Tab);
        editor.on_key(&mut dispatcher, &store, KeyCode::Tab);
        editor.on_key(&mut dispatcher, &store, KeyCode::Right);
        assert_eq!(
            store.borrow().data.obligation,
            Obligation::PartiallyMandatory
        );

        editor.on_key(&mut dispatcher, &store, KeyCode::Tab);
        editor.on_key(&mut dispatcher, &store, KeyCode::Right);
        assert_eq!(store.borrow().data.day, Weekday::Tuesday);
        editor.on_key(&mut dispatcher, &store, KeyCode::Left);
        editor.on_key(&mut dispatcher, &store, KeyCode::Left);
        assert_eq!(store.borrow().data.day, Weekday::Friday);
    }

    #[test]
    fn store_error_dialog_returns_to_the_form() {
        let cat = catalog();
        let (store, mut dispatcher) = setup(EventStore::new_entry());
        let mut editor = EventEditor::new("Add event", &cat, false);
        editor.show_store_error("disk full".into());

        let msg = editor.on_key(&mut dispatcher, &store, KeyCode::Enter);
        assert_eq!(msg, None);
        assert_eq!(*editor.dialog(), DialogState::None);
    }
}
