// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use tokio::fs;
use tokio::sync::watch;

use crate::config::Config;
use crate::draft::EventDraft;
use crate::event::FullScheduleEvent;
use crate::localdb::LocalDb;
use crate::{Location, Subject, Teacher};

const DB_NAME: &str = "rota.db";

/// Result of a save attempt. Ordinary validation failure is a value, not
/// an error: the store is simply left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The draft was persisted; carries the event's row id.
    Saved(i64),

    /// The draft failed validation and nothing was written.
    Invalid,
}

/// Rota schedule application core.
#[derive(Debug, Clone)]
pub struct Rota {
    config: Config,
    db: LocalDb,
}

impl Rota {
    /// Creates a new Rota instance with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;
        prepare(&config).await?;

        let file = config.state_dir.as_ref().map(|dir| dir.join(DB_NAME));
        let db = LocalDb::open(file.as_deref())
            .await
            .map_err(|e| format!("Failed to initialize db: {e}"))?;

        db.seed_defaults()
            .await
            .map_err(|e| format!("Failed to seed predefined rows: {e}"))?;

        Ok(Self { config, db })
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Persist a new event from the given draft, creating any referenced
    /// subject, teacher and location rows that do not exist yet. The four
    /// writes happen in one transaction.
    pub async fn save_new_event(&self, draft: &EventDraft) -> Result<SaveOutcome, Box<dyn Error>> {
        if !draft.is_valid() {
            tracing::debug!("rejecting invalid event draft");
            return Ok(SaveOutcome::Invalid);
        }

        let mut event = draft.to_event();
        event.id = 0; // force an insert
        let id = self
            .db
            .save_event(&draft.subject, &draft.teacher, &draft.location, &event)
            .await
            .map_err(|e| format!("Failed to save event: {e}"))?;

        tracing::info!(id, "saved new event");
        Ok(SaveOutcome::Saved(id))
    }

    /// Persist edits to an existing event, identified by the draft's id.
    pub async fn save_event_edits(
        &self,
        draft: &EventDraft,
    ) -> Result<SaveOutcome, Box<dyn Error>> {
        if !draft.is_valid() {
            tracing::debug!(id = draft.id, "rejecting invalid event draft");
            return Ok(SaveOutcome::Invalid);
        }

        let event = draft.to_event();
        let id = self
            .db
            .save_event(&draft.subject, &draft.teacher, &draft.location, &event)
            .await
            .map_err(|e| format!("Failed to save event edits: {e}"))?;

        tracing::info!(id, "saved event edits");
        Ok(SaveOutcome::Saved(id))
    }

    /// Delete one event by id.
    pub async fn delete_event(&self, id: i64) -> Result<(), Box<dyn Error>> {
        self.db
            .events
            .delete(id)
            .await
            .map_err(|e| format!("Failed to delete event: {e}").into())
    }

    /// Delete every event, leaving subjects, teachers and locations alone.
    pub async fn clear_events(&self) -> Result<(), Box<dyn Error>> {
        self.db
            .events
            .delete_all()
            .await
            .map_err(|e| format!("Failed to clear schedule: {e}").into())
    }

    /// Fetch one event joined with its relations. Errors when the id does
    /// not exist: a missing id is a caller bug in the edit flow, not a
    /// recoverable state.
    pub async fn get_full_event(&self, id: i64) -> Result<FullScheduleEvent, Box<dyn Error>> {
        match self.db.events.get_full(id).await {
            Ok(Some(event)) => Ok(event),
            Ok(None) => Err(format!("Event {id} not found").into()),
            Err(e) => Err(e.into()),
        }
    }

    /// List all events joined with their relations, ordered by day and
    /// start hour.
    pub async fn list_full_events(&self) -> Result<Vec<FullScheduleEvent>, Box<dyn Error>> {
        self.db
            .events
            .list_full()
            .await
            .map_err(|e| format!("Failed to list events: {e}").into())
    }

    pub async fn list_subjects(&self) -> Result<Vec<Subject>, Box<dyn Error>> {
        self.db
            .subjects
            .list()
            .await
            .map_err(|e| format!("Failed to list subjects: {e}").into())
    }

    pub async fn list_teachers(&self) -> Result<Vec<Teacher>, Box<dyn Error>> {
        self.db
            .teachers
            .list()
            .await
            .map_err(|e| format!("Failed to list teachers: {e}").into())
    }

    pub async fn list_locations(&self) -> Result<Vec<Location>, Box<dyn Error>> {
        self.db
            .locations
            .list()
            .await
            .map_err(|e| format!("Failed to list locations: {e}").into())
    }

    /// Delete a subject. Fails while any event still references it.
    pub async fn delete_subject(&self, shortened_code: &str) -> Result<(), Box<dyn Error>> {
        self.db
            .subjects
            .delete(shortened_code)
            .await
            .map_err(|e| format!("Failed to delete subject: {e}").into())
    }

    /// Delete a teacher. Fails while any event still references them.
    pub async fn delete_teacher(&self, teacher_name: &str) -> Result<(), Box<dyn Error>> {
        self.db
            .teachers
            .delete(teacher_name)
            .await
            .map_err(|e| format!("Failed to delete teacher: {e}").into())
    }

    /// Delete a location. Fails while any event still references it.
    pub async fn delete_location(&self, room_code: &str) -> Result<(), Box<dyn Error>> {
        self.db
            .locations
            .delete(room_code)
            .await
            .map_err(|e| format!("Failed to delete location: {e}").into())
    }

    /// Re-emits whenever event rows change. Doubles as the home-widget
    /// refresh signal: every event write bumps this feed.
    pub fn watch_events(&self) -> watch::Receiver<u64> {
        self.db.events.watch()
    }

    pub fn watch_subjects(&self) -> watch::Receiver<u64> {
        self.db.subjects.watch()
    }

    pub fn watch_teachers(&self) -> watch::Receiver<u64> {
        self.db.teachers.watch()
    }

    pub fn watch_locations(&self) -> watch::Receiver<u64> {
        self.db.locations.watch()
    }

    /// Close the Rota instance, saving any changes to the database.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        self.db.close().await
    }
}

async fn prepare(config: &Config) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = &config.state_dir {
        tracing::debug!(path = %dir.display(), "ensuring state directory exists");
        fs::create_dir_all(dir).await?;
    }
    Ok(())
}
