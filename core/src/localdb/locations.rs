// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;
use tokio::sync::watch;

use crate::Location;
use crate::feed::ChangeFeed;

pub(crate) const INSERT_SQL: &str = "\
INSERT INTO locations (room_code)
VALUES (?)
ON CONFLICT(room_code) DO NOTHING;
";

#[derive(Debug, Clone)]
pub struct Locations {
    pool: SqlitePool,
    feed: ChangeFeed,
}

impl Locations {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            feed: ChangeFeed::new(),
        }
    }

    pub(crate) fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Re-emits whenever location rows change.
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.feed.watch()
    }

    /// Insert a location, ignoring the write if the room already exists.
    pub async fn insert(&self, location: &Location) -> Result<(), sqlx::Error> {
        sqlx::query(INSERT_SQL)
            .bind(&location.room_code)
            .execute(&self.pool)
            .await?;

        self.feed.mark_changed();
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Location>, sqlx::Error> {
        const SQL: &str = "SELECT room_code FROM locations ORDER BY room_code ASC;";

        let rows: Vec<(String,)> = sqlx::query_as(SQL).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(code,)| Location::new(code)).collect())
    }

    /// Delete a location. Fails with a foreign key violation while any
    /// event still references it.
    pub async fn delete(&self, room_code: &str) -> Result<(), sqlx::Error> {
        const SQL: &str = "DELETE FROM locations WHERE room_code = ?;";

        sqlx::query(SQL)
            .bind(room_code)
            .execute(&self.pool)
            .await?;

        self.feed.mark_changed();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_db() -> crate::localdb::LocalDb {
        crate::localdb::LocalDb::open(None)
            .await
            .expect("Failed to create test database")
    }

    #[tokio::test]
    async fn locations_insert_twice_is_a_noop() {
        let db = setup_test_db().await;

        db.locations.insert(&Location::new("A101")).await.unwrap();
        db.locations
            .insert(&Location::new("A101"))
            .await
            .expect("Duplicate insert must not error");

        assert_eq!(db.locations.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn locations_list_orders_by_room_code() {
        let db = setup_test_db().await;
        db.locations.insert(&Location::new("C310")).await.unwrap();
        db.locations.insert(&Location::new("A101")).await.unwrap();
        db.locations.insert(&Location::new("B205")).await.unwrap();

        let all = db.locations.list().await.unwrap();
        let codes: Vec<_> = all.iter().map(|l| l.room_code.as_str()).collect();
        assert_eq!(codes, vec!["A101", "B205", "C310"]);
    }

    #[tokio::test]
    async fn locations_delete_removes_unreferenced_room() {
        let db = setup_test_db().await;
        db.locations.insert(&Location::new("B205")).await.unwrap();

        db.locations.delete("B205").await.unwrap();

        assert!(db.locations.list().await.unwrap().is_empty());
    }
}
