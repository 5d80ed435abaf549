//! Record types for the two mapped tables.
//!
//! An [`Author`] is a row of `users`, an [`Article`] is a row of `posts`.
//! The relationship between them lives only in `Article::author_id`.

use std::fmt;

/// A row of the `users` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

impl Author {
    /// Column list matching [`Author::from_row`] at the given offset
    pub(crate) const COLUMNS: &'static str = "users.id, users.name";

    pub(crate) fn from_row(row: &rusqlite::Row, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
        })
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Id: {}, Name: {}>", self.id, self.name)
    }
}

/// A row of the `posts` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: i64,
    pub title: String,
    /// Stored in the `content` column
    pub body: String,
    /// Foreign key to `users.id`
    pub author_id: i64,
}

impl Article {
    pub(crate) const COLUMNS: &'static str = "posts.id, posts.title, posts.content, posts.user_id";

    pub(crate) fn from_row(row: &rusqlite::Row, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            title: row.get(offset + 1)?,
            body: row.get(offset + 2)?,
            author_id: row.get(offset + 3)?,
        })
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Id: {}, Title: {}, Content: {}>", self.id, self.title, self.body)
    }
}

/// An author with all of its articles already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorWithArticles {
    pub author: Author,
    pub articles: Vec<Article>,
}

/// Formats a slice of records as `[a, b, c]`
pub struct RecordList<'a, T>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for RecordList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}
