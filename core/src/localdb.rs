// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

mod events;
mod locations;
mod subjects;
mod teachers;

use std::error::Error;
use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::localdb::events::Events;
use crate::localdb::locations::Locations;
use crate::localdb::subjects::Subjects;
use crate::localdb::teachers::Teachers;
use crate::{Location, ScheduleEvent, Subject, Teacher};

const SEED_TEACHERS: [&str; 3] = ["Dr. Johnson", "Prof. Smith", "Dr. Garcia"];
const SEED_LOCATIONS: [&str; 3] = ["A101", "B205", "C310"];
const SEED_SUBJECTS: [(&str, &str); 3] = [
    ("CS101", "Introduction to Programming"),
    ("MATH202", "Calculus II"),
    ("PHYS101", "Physics Fundamentals"),
];

#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,

    pub events: Events,
    pub subjects: Subjects,
    pub teachers: Teachers,
    pub locations: Locations,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let options = if let Some(filename) = filename {
            tracing::info!(file = %filename.display(), "connecting to SQLite database");
            SqliteConnectOptions::new()
                .filename(filename.to_str().ok_or("Invalid path encoding")?)
                .create_if_missing(true)
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            SqliteConnectOptions::new().in_memory(true)
        };

        // restrict-on-delete relies on SQLite enforcing foreign keys
        let options = options.foreign_keys(true);

        // every in-memory connection is its own database, so the pool
        // must never open a second one
        let pool_options = match filename {
            Some(_) => SqlitePoolOptions::new(),
            None => SqlitePoolOptions::new().max_connections(1),
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to connect to SQLite database: {e}"))?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await
            .map_err(|e| format!("Failed to run migrations: {e}"))?;

        tracing::debug!("ensuring tables in the database");
        let events = Events::new(pool.clone());
        let subjects = Subjects::new(pool.clone());
        let teachers = Teachers::new(pool.clone());
        let locations = Locations::new(pool.clone());
        Ok(LocalDb {
            pool,
            events,
            subjects,
            teachers,
            locations,
        })
    }

    /// Insert the predefined teachers, locations and subjects. Idempotent:
    /// every row is insert-or-ignore, so reopening an existing database
    /// leaves user edits alone.
    pub async fn seed_defaults(&self) -> Result<(), sqlx::Error> {
        for name in SEED_TEACHERS {
            self.teachers.insert(&Teacher::new(name)).await?;
        }
        for room in SEED_LOCATIONS {
            self.locations.insert(&Location::new(room)).await?;
        }
        for (code, name) in SEED_SUBJECTS {
            self.subjects.insert(&Subject::new(code, name)).await?;
        }
        Ok(())
    }

    /// Persist a draft's subject, teacher, location and event in a single
    /// transaction. The three referenced rows are insert-or-ignore; the
    /// event row is inserted when `event.id` is 0 and updated otherwise.
    /// Either all four writes land or none of them do.
    pub async fn save_event(
        &self,
        subject: &Subject,
        teacher: &Teacher,
        location: &Location,
        event: &ScheduleEvent,
    ) -> Result<i64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(subjects::INSERT_SQL)
            .bind(&subject.shortened_code)
            .bind(&subject.full_display_name)
            .execute(&mut *tx)
            .await?;

        sqlx::query(teachers::INSERT_SQL)
            .bind(&teacher.teacher_name)
            .execute(&mut *tx)
            .await?;

        sqlx::query(locations::INSERT_SQL)
            .bind(&location.room_code)
            .execute(&mut *tx)
            .await?;

        let id = if event.id == 0 {
            let result = sqlx::query(events::INSERT_SQL)
                .bind(&event.teacher_name)
                .bind(&event.room_code)
                .bind(&event.subject_code)
                .bind(event.obligation.as_ref())
                .bind(event.day.number())
                .bind(event.start_hour)
                .bind(event.end_hour)
                .execute(&mut *tx)
                .await?;
            result.last_insert_rowid()
        } else {
            sqlx::query(events::UPDATE_SQL)
                .bind(&event.teacher_name)
                .bind(&event.room_code)
                .bind(&event.subject_code)
                .bind(event.obligation.as_ref())
                .bind(event.day.number())
                .bind(event.start_hour)
                .bind(event.end_hour)
                .bind(event.id)
                .execute(&mut *tx)
                .await?;
            event.id
        };

        tx.commit().await?;

        self.events.feed().mark_changed();
        self.subjects.feed().mark_changed();
        self.teachers.feed().mark_changed();
        self.locations.feed().mark_changed();
        Ok(id)
    }

    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!("closing database connection");
        self.pool.close().await;
        Ok(())
    }
}
