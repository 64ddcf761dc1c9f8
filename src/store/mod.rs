//! SQLite-backed artwork store
//!
//! The table is fully rebuilt per search: dropped and recreated, then
//! written once by the aggregation run and read until the next rebuild.
//! Writes from concurrent adapters are serialized through the connection
//! mutex.

use crate::model::Artwork;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

/// Storage error type
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Filter state for the results listing.
///
/// Medium membership is OR'd within the set and AND'd with the date
/// bounds; absent bounds are omitted from the predicate entirely. Date
/// comparisons are lexicographic over the free-form date strings, which
/// mirrors the original behavior and is a documented weak point.
#[derive(Debug, Clone, Default)]
pub struct ArtworkFilter {
    pub mediums: Vec<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl ArtworkFilter {
    pub fn is_empty(&self) -> bool {
        self.mediums.is_empty() && self.date_from.is_none() && self.date_to.is_none()
    }

    /// Build the WHERE clause and its bind parameters
    fn predicate(&self) -> (String, Vec<String>) {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        if !self.mediums.is_empty() {
            let placeholders = vec!["?"; self.mediums.len()].join(", ");
            clauses.push(format!("medium IN ({})", placeholders));
            params.extend(self.mediums.iter().cloned());
        }

        if let Some(ref from) = self.date_from {
            clauses.push("date >= ?".to_string());
            params.push(from.clone());
        }

        if let Some(ref to) = self.date_to {
            clauses.push("date <= ?".to_string());
            params.push(to.clone());
        }

        if clauses.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", clauses.join(" AND ")), params)
        }
    }
}

/// Ordering for the results listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    /// Alphabetical by title, then artist (the unfiltered listing)
    TitleArtist,
    /// By the museum-provided identifier (the filtered listing)
    ExternalId,
}

impl OrderBy {
    fn as_sql(self) -> &'static str {
        match self {
            OrderBy::TitleArtist => "title, artist",
            OrderBy::ExternalId => "external_id",
        }
    }
}

const COLUMNS: &str = "surrogate_key, external_id, title, artist, medium, \
                       date, url, image_url, museum, museum_url";

/// SQLite store holding the normalized records of one search
pub struct ArtworkStore {
    conn: Mutex<Connection>,
}

impl ArtworkStore {
    /// Open (or create) the store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_table()?;
        Ok(store)
    }

    /// Open an in-memory store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_table()?;
        Ok(store)
    }

    fn create_table(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS artwork (
                surrogate_key INTEGER PRIMARY KEY,
                external_id   TEXT NOT NULL,
                title         TEXT,
                artist        TEXT,
                medium        TEXT NOT NULL DEFAULT '',
                date          TEXT NOT NULL DEFAULT '',
                url           TEXT NOT NULL DEFAULT '',
                image_url     TEXT NOT NULL DEFAULT '',
                museum        TEXT NOT NULL DEFAULT '',
                museum_url    TEXT NOT NULL DEFAULT ''
            );
            CREATE INDEX IF NOT EXISTS idx_artwork_medium ON artwork (medium);
            CREATE INDEX IF NOT EXISTS idx_artwork_date ON artwork (date);",
        )?;
        Ok(())
    }

    /// Drop and recreate the table, discarding the previous search
    pub fn rebuild(&self) -> Result<(), StoreError> {
        {
            let conn = self.conn.lock().unwrap();
            conn.execute_batch("DROP TABLE IF EXISTS artwork")?;
        }
        self.create_table()
    }

    /// Insert one record; a colliding surrogate key overwrites
    pub fn insert(&self, work: &Artwork) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO artwork (surrogate_key, external_id, title, artist, \
             medium, date, url, image_url, museum, museum_url) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                work.surrogate_key,
                work.external_id,
                work.title,
                work.artist,
                work.medium,
                work.date,
                work.url,
                work.image_url,
                work.museum,
                work.museum_url,
            ],
        )?;
        Ok(())
    }

    /// Distinct non-empty medium values, ascending (the facet list)
    pub fn mediums(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut statement = conn
            .prepare("SELECT DISTINCT medium FROM artwork WHERE medium != '' ORDER BY medium ASC")?;
        let rows = statement.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<String>, _>>()?)
    }

    /// Number of rows matching the filter
    pub fn count(&self, filter: &ArtworkFilter) -> Result<u64, StoreError> {
        let (predicate, params) = filter.predicate();
        let sql = format!("SELECT COUNT(*) FROM artwork{}", predicate);

        let conn = self.conn.lock().unwrap();
        let count: i64 =
            conn.query_row(&sql, rusqlite::params_from_iter(params.iter()), |row| {
                row.get(0)
            })?;
        Ok(count as u64)
    }

    /// One page of rows matching the filter, 1-indexed.
    ///
    /// A page past the end of the result set returns an empty vec.
    pub fn page(
        &self,
        filter: &ArtworkFilter,
        order: OrderBy,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Artwork>, StoreError> {
        let page = page.max(1);
        let offset = (page as u64 - 1) * per_page as u64;
        let (predicate, params) = filter.predicate();
        let sql = format!(
            "SELECT {} FROM artwork{} ORDER BY {} LIMIT {} OFFSET {}",
            COLUMNS,
            predicate,
            order.as_sql(),
            per_page,
            offset
        );

        let conn = self.conn.lock().unwrap();
        let mut statement = conn.prepare(&sql)?;
        let rows = statement.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            Ok(Artwork {
                surrogate_key: row.get(0)?,
                external_id: row.get(1)?,
                title: row.get(2)?,
                artist: row.get(3)?,
                medium: row.get(4)?,
                date: row.get(5)?,
                url: row.get(6)?,
                image_url: row.get(7)?,
                museum: row.get(8)?,
                museum_url: row.get(9)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<Artwork>, _>>()?)
    }
}
