// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;
use tokio::sync::watch;

use crate::feed::ChangeFeed;
use crate::{FullScheduleEvent, Location, Obligation, ScheduleEvent, Subject, Teacher, Weekday};

pub(crate) const INSERT_SQL: &str = "\
INSERT INTO schedule_events (teacher_name, room_code, subject_code, obligation, day, start_hour, end_hour)
VALUES (?, ?, ?, ?, ?, ?, ?);
";

pub(crate) const UPDATE_SQL: &str = "\
UPDATE schedule_events SET
    teacher_name = ?,
    room_code    = ?,
    subject_code = ?,
    obligation   = ?,
    day          = ?,
    start_hour   = ?,
    end_hour     = ?
WHERE id = ?;
";

const FULL_SELECT: &str = "\
SELECT e.id, e.teacher_name, e.room_code, e.subject_code,
       e.obligation, e.day, e.start_hour, e.end_hour,
       s.full_display_name AS subject_display_name
FROM schedule_events e
JOIN subjects s ON s.shortened_code = e.subject_code
JOIN teachers t ON t.teacher_name = e.teacher_name
JOIN locations l ON l.room_code = e.room_code
";

#[derive(Debug, Clone)]
pub struct Events {
    pool: SqlitePool,
    feed: ChangeFeed,
}

impl Events {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            feed: ChangeFeed::new(),
        }
    }

    pub(crate) fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Re-emits whenever event rows change. This is also the refresh
    /// trigger for the home-widget surface.
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.feed.watch()
    }

    /// Insert a new event, returning its generated id. The referenced
    /// subject, teacher and location rows must already exist.
    pub async fn insert(&self, event: &ScheduleEvent) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(INSERT_SQL)
            .bind(&event.teacher_name)
            .bind(&event.room_code)
            .bind(&event.subject_code)
            .bind(event.obligation.as_ref())
            .bind(event.day.number())
            .bind(event.start_hour)
            .bind(event.end_hour)
            .execute(&self.pool)
            .await?;

        self.feed.mark_changed();
        Ok(result.last_insert_rowid())
    }

    /// Update an existing event by id.
    pub async fn update(&self, event: &ScheduleEvent) -> Result<(), sqlx::Error> {
        sqlx::query(UPDATE_SQL)
            .bind(&event.teacher_name)
            .bind(&event.room_code)
            .bind(&event.subject_code)
            .bind(event.obligation.as_ref())
            .bind(event.day.number())
            .bind(event.start_hour)
            .bind(event.end_hour)
            .bind(event.id)
            .execute(&self.pool)
            .await?;

        self.feed.mark_changed();
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        const SQL: &str = "DELETE FROM schedule_events WHERE id = ?;";

        sqlx::query(SQL).bind(id).execute(&self.pool).await?;

        self.feed.mark_changed();
        Ok(())
    }

    /// Remove every event. Subject, teacher and location rows are left
    /// untouched.
    pub async fn delete_all(&self) -> Result<(), sqlx::Error> {
        const SQL: &str = "DELETE FROM schedule_events;";

        sqlx::query(SQL).execute(&self.pool).await?;

        self.feed.mark_changed();
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Option<ScheduleEvent>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, teacher_name, room_code, subject_code, obligation, day, start_hour, end_hour
FROM schedule_events
WHERE id = ?;
";

        let record: Option<EventRecord> = sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record.map(EventRecord::into_event))
    }

    /// Fetch one event joined with its subject, teacher and location.
    pub async fn get_full(&self, id: i64) -> Result<Option<FullScheduleEvent>, sqlx::Error> {
        let sql = format!("{FULL_SELECT}WHERE e.id = ?;");

        let record: Option<FullEventRecord> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record.map(FullEventRecord::into_full_event))
    }

    pub async fn list(&self) -> Result<Vec<ScheduleEvent>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, teacher_name, room_code, subject_code, obligation, day, start_hour, end_hour
FROM schedule_events
ORDER BY day ASC, start_hour ASC;
";

        let records: Vec<EventRecord> = sqlx::query_as(SQL).fetch_all(&self.pool).await?;
        Ok(records.into_iter().map(EventRecord::into_event).collect())
    }

    /// Fetch all events joined with their relations, ordered by day and
    /// start hour.
    pub async fn list_full(&self) -> Result<Vec<FullScheduleEvent>, sqlx::Error> {
        let sql = format!("{FULL_SELECT}ORDER BY e.day ASC, e.start_hour ASC;");

        let records: Vec<FullEventRecord> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(records
            .into_iter()
            .map(FullEventRecord::into_full_event)
            .collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EventRecord {
    id: i64,
    teacher_name: String,
    room_code: String,
    subject_code: String,
    obligation: String,
    day: i64,
    start_hour: i64,
    end_hour: i64,
}

impl EventRecord {
    fn into_event(self) -> ScheduleEvent {
        ScheduleEvent {
            id: self.id,
            teacher_name: self.teacher_name,
            room_code: self.room_code,
            subject_code: self.subject_code,
            // CHECK constraints keep these columns well-formed
            obligation: self.obligation.parse().unwrap_or_default(),
            day: Weekday::from_number(self.day).unwrap_or_default(),
            start_hour: self.start_hour,
            end_hour: self.end_hour,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FullEventRecord {
    id: i64,
    teacher_name: String,
    room_code: String,
    subject_code: String,
    obligation: String,
    day: i64,
    start_hour: i64,
    end_hour: i64,
    subject_display_name: String,
}

impl FullEventRecord {
    fn into_full_event(self) -> FullScheduleEvent {
        let subject = Subject::new(self.subject_code.clone(), self.subject_display_name.clone());
        let teacher = Teacher::new(self.teacher_name.clone());
        let location = Location::new(self.room_code.clone());

        let event = EventRecord {
            id: self.id,
            teacher_name: self.teacher_name,
            room_code: self.room_code,
            subject_code: self.subject_code,
            obligation: self.obligation,
            day: self.day,
            start_hour: self.start_hour,
            end_hour: self.end_hour,
        }
        .into_event();

        FullScheduleEvent {
            event,
            subject,
            teacher,
            location,
        }
    }
}
