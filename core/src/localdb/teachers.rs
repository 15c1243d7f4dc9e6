// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;
use tokio::sync::watch;

use crate::Teacher;
use crate::feed::ChangeFeed;

pub(crate) const INSERT_SQL: &str = "\
INSERT INTO teachers (teacher_name)
VALUES (?)
ON CONFLICT(teacher_name) DO NOTHING;
";

#[derive(Debug, Clone)]
pub struct Teachers {
    pool: SqlitePool,
    feed: ChangeFeed,
}

impl Teachers {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            feed: ChangeFeed::new(),
        }
    }

    pub(crate) fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Re-emits whenever teacher rows change.
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.feed.watch()
    }

    /// Insert a teacher, ignoring the write if the name already exists.
    pub async fn insert(&self, teacher: &Teacher) -> Result<(), sqlx::Error> {
        sqlx::query(INSERT_SQL)
            .bind(&teacher.teacher_name)
            .execute(&self.pool)
            .await?;

        self.feed.mark_changed();
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Teacher>, sqlx::Error> {
        const SQL: &str = "SELECT teacher_name FROM teachers ORDER BY teacher_name ASC;";

        let rows: Vec<(String,)> = sqlx::query_as(SQL).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(name,)| Teacher::new(name)).collect())
    }

    /// Delete a teacher. Fails with a foreign key violation while any
    /// event still references them.
    pub async fn delete(&self, teacher_name: &str) -> Result<(), sqlx::Error> {
        const SQL: &str = "DELETE FROM teachers WHERE teacher_name = ?;";

        sqlx::query(SQL)
            .bind(teacher_name)
            .execute(&self.pool)
            .await?;

        self.feed.mark_changed();
        Ok(())
    }
}
