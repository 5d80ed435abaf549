//! Demonstration seed data

/// An author to insert, together with the articles it owns
#[derive(Debug, Clone)]
pub struct SeedAuthor {
    pub name: String,
    pub articles: Vec<SeedArticle>,
}

#[derive(Debug, Clone)]
pub struct SeedArticle {
    pub title: String,
    pub body: String,
}

impl SeedAuthor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            articles: Vec::new(),
        }
    }

    pub fn with_article(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.articles.push(SeedArticle {
            title: title.into(),
            body: body.into(),
        });
        self
    }
}

/// Two authors and three articles: two for the first author, one for the second
pub fn default_authors() -> Vec<SeedAuthor> {
    vec![
        SeedAuthor::new("LarsSvensson")
            .with_article("My first blog post", "This is very exciting, my first blog post!")
            .with_article(
                "My second blog post",
                "Let's talk about the weather! Is the snow coming soon?",
            ),
        SeedAuthor::new("GÃ¶ran").with_article("Testing Testing Demo Testing", "I am only testing"),
    ]
}
