//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - users(id, name)
//! - posts(id, title, content, user_id -> users.id)

pub mod schema;
pub mod session;
pub mod sqlite;

pub use session::{LazyAuthor, Session};
pub use sqlite::{RecordStore, StoreStats};
