// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;
use tokio::sync::watch;

use crate::Subject;
use crate::feed::ChangeFeed;

pub(crate) const INSERT_SQL: &str = "\
INSERT INTO subjects (shortened_code, full_display_name)
VALUES (?, ?)
ON CONFLICT(shortened_code) DO NOTHING;
";

#[derive(Debug, Clone)]
pub struct Subjects {
    pool: SqlitePool,
    feed: ChangeFeed,
}

impl Subjects {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            feed: ChangeFeed::new(),
        }
    }

    pub(crate) fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Re-emits whenever subject rows change.
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.feed.watch()
    }

    /// Insert a subject, ignoring the write if the code already exists.
    pub async fn insert(&self, subject: &Subject) -> Result<(), sqlx::Error> {
        sqlx::query(INSERT_SQL)
            .bind(&subject.shortened_code)
            .bind(&subject.full_display_name)
            .execute(&self.pool)
            .await?;

        self.feed.mark_changed();
        Ok(())
    }

    pub async fn get(&self, shortened_code: &str) -> Result<Option<Subject>, sqlx::Error> {
        const SQL: &str = "\
SELECT shortened_code, full_display_name
FROM subjects
WHERE shortened_code = ?;
";

        let record: Option<SubjectRecord> = sqlx::query_as(SQL)
            .bind(shortened_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record.map(SubjectRecord::into_subject))
    }

    pub async fn list(&self) -> Result<Vec<Subject>, sqlx::Error> {
        const SQL: &str = "\
SELECT shortened_code, full_display_name
FROM subjects
ORDER BY shortened_code ASC;
";

        let records: Vec<SubjectRecord> = sqlx::query_as(SQL).fetch_all(&self.pool).await?;
        Ok(records.into_iter().map(SubjectRecord::into_subject).collect())
    }

    /// Delete a subject. Fails with a foreign key violation while any
    /// event still references it.
    pub async fn delete(&self, shortened_code: &str) -> Result<(), sqlx::Error> {
        const SQL: &str = "DELETE FROM subjects WHERE shortened_code = ?;";

        sqlx::query(SQL)
            .bind(shortened_code)
            .execute(&self.pool)
            .await?;

        self.feed.mark_changed();
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubjectRecord {
    shortened_code: String,
    full_display_name: String,
}

impl SubjectRecord {
    fn into_subject(self) -> Subject {
        Subject {
            shortened_code: self.shortened_code,
            full_display_name: self.full_display_name,
        }
    }
}
