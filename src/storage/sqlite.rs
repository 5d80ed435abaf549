//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, TransactionBehavior};
use crate::Result;
use crate::seed::SeedAuthor;
use super::schema;
use super::session::Session;

/// SQLite-backed store for authors and their articles
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create the `users` and `posts` tables if they are missing
    pub fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(&stmt, [])?;
        }
        tracing::debug!("Schema ready ({} tables)", schema::TABLES.len());
        Ok(())
    }

    /// Begin a read session (deferred transaction)
    pub fn session(&mut self) -> Result<Session<'_>> {
        let tx = self.conn.transaction()?;
        Ok(Session::new(tx))
    }

    /// Begin a write session, taking the write lock up front
    pub fn write_session(&mut self) -> Result<Session<'_>> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        Ok(Session::new(tx))
    }

    /// Insert `authors` and their articles if the store has no authors yet.
    ///
    /// The count and the inserts share one write transaction. Returns `true`
    /// when rows were inserted.
    pub fn seed_if_empty(&mut self, authors: &[SeedAuthor]) -> Result<bool> {
        let session = self.write_session()?;

        let existing = session.count_authors()?;
        if existing > 0 {
            tracing::debug!("Store already holds {} authors, skipping seed", existing);
            return Ok(false);
        }

        let mut articles = 0;
        for seed in authors {
            let author = session.insert_author(&seed.name)?;
            for article in &seed.articles {
                session.insert_article(author.id, &article.title, &article.body)?;
                articles += 1;
            }
        }
        session.commit()?;

        tracing::info!("Seeded {} authors and {} articles", authors.len(), articles);
        Ok(true)
    }

    /// Get database statistics
    pub fn stats(&mut self) -> Result<StoreStats> {
        let session = self.session()?;
        Ok(StoreStats {
            authors: session.count_authors()?,
            articles: session.count_articles()?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub authors: usize,
    pub articles: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Authors: {}", self.authors)?;
        write!(f, "  Articles: {}", self.articles)
    }
}
