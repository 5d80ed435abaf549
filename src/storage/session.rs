//! Units of work over a [`RecordStore`](super::RecordStore)
//!
//! A [`Session`] wraps one SQLite transaction. Every statement it sends is a
//! round-trip and is counted, which makes the cost of each load pattern
//! observable:
//! - [`Session::eager_load`] costs exactly one round-trip
//! - [`Session::lazy_load`] costs one, plus one per author whose articles are read

use std::cell::Cell;
use std::collections::HashMap;
use rusqlite::{Params, Row, Transaction, params};
use crate::Result;
use crate::model::{Article, Author, AuthorWithArticles};

pub struct Session<'conn> {
    tx: Transaction<'conn>,
    round_trips: Cell<usize>,
}

impl<'conn> Session<'conn> {
    pub(crate) fn new(tx: Transaction<'conn>) -> Self {
        Self {
            tx,
            round_trips: Cell::new(0),
        }
    }

    /// Number of statements sent to the store by this session
    pub fn round_trips(&self) -> usize {
        self.round_trips.get()
    }

    /// Commit the unit of work. Dropping a session without committing rolls back.
    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }

    fn round_trip(&self, what: &str) {
        let n = self.round_trips.get() + 1;
        self.round_trips.set(n);
        tracing::debug!(round_trip = n, "{}", what);
    }

    fn fetch<T, P, F>(&self, what: &str, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.round_trip(what);
        let mut stmt = self.tx.prepare(sql)?;
        let rows = stmt
            .query_map(params, map)?
            .collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(rows)
    }

    fn count(&self, table: &str) -> Result<usize> {
        self.round_trip("count");
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.tx.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Writes ==========

    pub fn insert_author(&self, name: &str) -> Result<Author> {
        self.round_trip("insert author");
        self.tx.execute("INSERT INTO users (name) VALUES (?1)", [name])?;
        Ok(Author {
            id: self.tx.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Insert an article owned by `author_id`; the author must exist
    pub fn insert_article(&self, author_id: i64, title: &str, body: &str) -> Result<Article> {
        self.round_trip("insert article");
        self.tx.execute(
            "INSERT INTO posts (title, content, user_id) VALUES (?1, ?2, ?3)",
            params![title, body, author_id],
        )?;
        Ok(Article {
            id: self.tx.last_insert_rowid(),
            title: title.to_string(),
            body: body.to_string(),
            author_id,
        })
    }

    /// Delete an author. Fails with a referential-integrity error while the
    /// author still owns articles. Returns whether a row was deleted.
    pub fn delete_author(&self, author_id: i64) -> Result<bool> {
        self.round_trip("delete author");
        let deleted = self.tx.execute("DELETE FROM users WHERE id = ?1", [author_id])?;
        Ok(deleted > 0)
    }

    // ========== Reads ==========

    pub fn count_authors(&self) -> Result<usize> {
        self.count("users")
    }

    pub fn count_articles(&self) -> Result<usize> {
        self.count("posts")
    }

    /// The author with the lowest id, if any
    pub fn first_author(&self) -> Result<Option<Author>> {
        let sql = format!("SELECT {} FROM users ORDER BY users.id LIMIT 1", Author::COLUMNS);
        let mut authors = self.fetch("first author", &sql, [], |row| Author::from_row(row, 0))?;
        Ok(authors.pop())
    }

    /// Articles whose foreign key points at `author_id`, by article id
    pub fn articles_of(&self, author_id: i64) -> Result<Vec<Article>> {
        let sql = format!(
            "SELECT {} FROM posts WHERE posts.user_id = ?1 ORDER BY posts.id",
            Article::COLUMNS
        );
        self.fetch("articles of author", &sql, [author_id], |row| Article::from_row(row, 0))
    }

    /// Join `users` and `posts` on the foreign key for one author.
    ///
    /// The author is repeated in every pair. Unknown authors and authors
    /// without articles both yield an empty result.
    pub fn explicit_join(&self, author_id: i64) -> Result<Vec<(Author, Article)>> {
        let sql = format!(
            "SELECT {}, {} FROM users JOIN posts ON posts.user_id = users.id \
             WHERE users.id = ?1 ORDER BY posts.id",
            Author::COLUMNS,
            Article::COLUMNS
        );
        self.fetch("explicit join", &sql, [author_id], row_to_pair)
    }

    /// Every (author, article) pair, by author id then article id
    pub fn all_pairs(&self) -> Result<Vec<(Author, Article)>> {
        let sql = format!(
            "SELECT {}, {} FROM users JOIN posts ON posts.user_id = users.id \
             ORDER BY users.id, posts.id",
            Author::COLUMNS,
            Article::COLUMNS
        );
        self.fetch("all pairs", &sql, [], row_to_pair)
    }

    /// All authors with their articles, fetched in a single joined statement
    pub fn eager_load(&self) -> Result<Vec<AuthorWithArticles>> {
        let sql = format!(
            "SELECT {}, {} FROM users LEFT OUTER JOIN posts ON posts.user_id = users.id \
             ORDER BY users.id, posts.id",
            Author::COLUMNS,
            Article::COLUMNS
        );
        let rows = self.fetch("eager load", &sql, [], |row| {
            let author = Author::from_row(row, 0)?;
            let article_id: Option<i64> = row.get(2)?;
            let article = match article_id {
                Some(_) => Some(Article::from_row(row, 2)?),
                None => None,
            };
            Ok((author, article))
        })?;

        let mut loaded: Vec<AuthorWithArticles> = Vec::new();
        let mut index: HashMap<i64, usize> = HashMap::new();
        for (author, article) in rows {
            let slot = *index.entry(author.id).or_insert_with(|| {
                loaded.push(AuthorWithArticles {
                    author,
                    articles: Vec::new(),
                });
                loaded.len() - 1
            });
            if let Some(article) = article {
                loaded[slot].articles.push(article);
            }
        }
        Ok(loaded)
    }

    /// All authors, with articles left to be fetched on first access
    pub fn lazy_load(&self) -> Result<Vec<LazyAuthor<'_>>> {
        let sql = format!("SELECT {} FROM users ORDER BY users.id", Author::COLUMNS);
        let authors = self.fetch("lazy load authors", &sql, [], |row| Author::from_row(row, 0))?;
        Ok(authors
            .into_iter()
            .map(|author| LazyAuthor {
                author,
                articles: None,
                session: self,
            })
            .collect())
    }
}

fn row_to_pair(row: &Row<'_>) -> rusqlite::Result<(Author, Article)> {
    Ok((Author::from_row(row, 0)?, Article::from_row(row, 2)?))
}

/// An author whose articles are fetched on first access and cached for the
/// rest of the session.
///
/// The cache belongs to this handle, not to the session: another
/// [`Session::lazy_load`] returns fresh handles that fetch again.
pub struct LazyAuthor<'s> {
    author: Author,
    articles: Option<Vec<Article>>,
    session: &'s Session<'s>,
}

impl LazyAuthor<'_> {
    pub fn author(&self) -> &Author {
        &self.author
    }

    /// Whether the articles have been fetched yet
    pub fn is_loaded(&self) -> bool {
        self.articles.is_some()
    }

    /// The author's articles. The first call costs one round-trip.
    pub fn articles(&mut self) -> Result<&[Article]> {
        let articles = match self.articles.take() {
            Some(cached) => cached,
            None => self.session.articles_of(self.author.id)?,
        };
        let articles: &[Article] = self.articles.insert(articles);
        Ok(articles)
    }
}

impl std::fmt::Debug for LazyAuthor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyAuthor")
            .field("author", &self.author)
            .field("articles", &self.articles)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, RecordStore};
    use crate::seed::{SeedAuthor, default_authors};

    fn seeded_store() -> RecordStore {
        let mut store = RecordStore::open_in_memory().unwrap();
        store.seed_if_empty(&default_authors()).unwrap();
        store
    }

    fn store_with(authors: &[SeedAuthor]) -> RecordStore {
        let mut store = RecordStore::open_in_memory().unwrap();
        store.seed_if_empty(authors).unwrap();
        store
    }

    #[test]
    fn test_all_pairs() {
        let mut store = seeded_store();
        let session = store.session().unwrap();

        let pairs = session.all_pairs().unwrap();
        assert_eq!(pairs.len(), 3);
        for (author, article) in &pairs {
            assert_eq!(article.author_id, author.id);
        }
        assert_eq!(pairs[0].0.name, "LarsSvensson");
        assert_eq!(pairs[2].0.name, "GÃ¶ran");
        assert_eq!(pairs[2].1.title, "Testing Testing Demo Testing");
    }

    #[test]
    fn test_explicit_join_for_one_author() {
        let mut store = seeded_store();
        let session = store.session().unwrap();

        let lars = session.first_author().unwrap().unwrap();
        assert_eq!(lars.name, "LarsSvensson");

        let pairs = session.explicit_join(lars.id).unwrap();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|(author, _)| author.name == "LarsSvensson"));
        assert_eq!(pairs[0].1.title, "My first blog post");
        assert_eq!(pairs[1].1.title, "My second blog post");
    }

    #[test]
    fn test_explicit_join_unknown_author_is_empty() {
        let mut store = seeded_store();
        let session = store.session().unwrap();
        assert!(session.explicit_join(9999).unwrap().is_empty());
    }

    #[test]
    fn test_explicit_join_author_without_articles_is_empty() {
        let mut store = store_with(&[SeedAuthor::new("Quiet")]);
        let session = store.session().unwrap();
        let quiet = session.first_author().unwrap().unwrap();
        assert!(session.explicit_join(quiet.id).unwrap().is_empty());
    }

    #[test]
    fn test_eager_load_single_round_trip() {
        let mut store = seeded_store();
        let session = store.session().unwrap();

        let loaded = session.eager_load().unwrap();
        assert_eq!(session.round_trips(), 1);

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].articles.len(), 2);
        assert_eq!(loaded[1].articles.len(), 1);
        assert_eq!(session.round_trips(), 1);
    }

    #[test]
    fn test_eager_load_keeps_authors_without_articles() {
        let mut store = store_with(&[
            SeedAuthor::new("Quiet"),
            SeedAuthor::new("Chatty").with_article("Hello", "World"),
        ]);
        let session = store.session().unwrap();

        let loaded = session.eager_load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].author.name, "Quiet");
        assert!(loaded[0].articles.is_empty());
        assert_eq!(loaded[1].articles.len(), 1);
    }

    #[test]
    fn test_eager_load_empty_store() {
        let mut store = RecordStore::open_in_memory().unwrap();
        let session = store.session().unwrap();
        assert!(session.eager_load().unwrap().is_empty());
    }

    #[test]
    fn test_eager_and_join_agree() {
        let mut store = seeded_store();
        let session = store.session().unwrap();

        let mut from_join: Vec<(i64, i64)> = session
            .all_pairs()
            .unwrap()
            .iter()
            .map(|(author, article)| (author.id, article.id))
            .collect();
        let mut from_eager: Vec<(i64, i64)> = session
            .eager_load()
            .unwrap()
            .iter()
            .flat_map(|loaded| loaded.articles.iter().map(|a| (loaded.author.id, a.id)))
            .collect();

        from_join.sort();
        from_eager.sort();
        assert_eq!(from_join, from_eager);
    }

    #[test]
    fn test_lazy_load_costs_one_plus_n() {
        let mut store = store_with(&[
            SeedAuthor::new("A").with_article("a1", "x").with_article("a2", "x"),
            SeedAuthor::new("B").with_article("b1", "x"),
            SeedAuthor::new("C").with_article("c1", "x"),
        ]);
        let session = store.session().unwrap();

        let mut authors = session.lazy_load().unwrap();
        assert_eq!(session.round_trips(), 1);
        assert!(authors.iter().all(|a| !a.is_loaded()));

        for author in authors.iter_mut() {
            assert!(!author.articles().unwrap().is_empty());
        }
        assert_eq!(session.round_trips(), 1 + 3);

        // cached: no further fetches
        for author in authors.iter_mut() {
            author.articles().unwrap();
        }
        assert_eq!(session.round_trips(), 1 + 3);
    }

    #[test]
    fn test_lazy_cache_is_per_handle() {
        let mut store = seeded_store();
        let session = store.session().unwrap();

        let mut first = session.lazy_load().unwrap();
        first[0].articles().unwrap();
        first[0].articles().unwrap();
        assert_eq!(session.round_trips(), 2);

        let mut second = session.lazy_load().unwrap();
        assert!(!second[0].is_loaded());
        second[0].articles().unwrap();
        assert_eq!(session.round_trips(), 4);
        assert!(first[0].is_loaded());
    }

    #[test]
    fn test_lazy_articles_match_foreign_key() {
        let mut store = seeded_store();
        let session = store.session().unwrap();

        let mut authors = session.lazy_load().unwrap();
        let first = &mut authors[0];
        let id = first.author().id;
        let articles = first.articles().unwrap();
        assert_eq!(articles.len(), 2);
        assert!(articles.iter().all(|a| a.author_id == id));
    }

    #[test]
    fn test_insert_article_for_missing_author() {
        let mut store = seeded_store();
        let session = store.write_session().unwrap();

        let err = session.insert_article(4242, "Orphan", "nobody owns me").unwrap_err();
        assert!(matches!(err, Error::ReferentialIntegrity(_)));
    }

    #[test]
    fn test_every_article_has_an_author() {
        let mut store = seeded_store();
        let session = store.session().unwrap();

        let authors: Vec<i64> = session
            .eager_load()
            .unwrap()
            .iter()
            .map(|loaded| loaded.author.id)
            .collect();
        for (_, article) in session.all_pairs().unwrap() {
            assert!(authors.contains(&article.author_id));
        }
        assert_eq!(session.all_pairs().unwrap().len(), session.count_articles().unwrap());
    }

    #[test]
    fn test_delete_author_is_restricted() {
        let mut store = seeded_store();
        let session = store.write_session().unwrap();

        let lars = session.first_author().unwrap().unwrap();
        let err = session.delete_author(lars.id).unwrap_err();
        assert!(matches!(err, Error::ReferentialIntegrity(_)), "got {:?}", err);
        assert_eq!(session.count_authors().unwrap(), 2);
        assert_eq!(session.explicit_join(lars.id).unwrap().len(), 2);

        let loner = session.insert_author("Loner").unwrap();
        assert!(session.delete_author(loner.id).unwrap());
        assert!(!session.delete_author(loner.id).unwrap());
    }

    #[test]
    fn test_overlong_name_rejected() {
        let mut store = RecordStore::open_in_memory().unwrap();
        let session = store.write_session().unwrap();

        let err = session.insert_author(&"x".repeat(256)).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
        assert!(session.insert_author(&"x".repeat(255)).is_ok());
    }

    #[test]
    fn test_uncommitted_session_rolls_back() {
        let mut store = RecordStore::open_in_memory().unwrap();
        {
            let session = store.write_session().unwrap();
            session.insert_author("Ghost").unwrap();
        }
        let session = store.session().unwrap();
        assert_eq!(session.count_authors().unwrap(), 0);
    }
}
