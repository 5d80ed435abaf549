use crate::model::{Article, Author, RecordList};
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

/// Rule, centered caption, rule; each `width` columns wide
pub fn banner_lines(caption: &str, width: usize) -> [String; 3] {
    let rule = "*".repeat(width);
    [rule.clone(), format!("{:^width$}", caption, width = width), rule]
}

pub fn banner(caption: &str, width: usize) {
    let [top, middle, bottom] = banner_lines(caption, width);
    println!("{}", top.style(theme().rule.clone()));
    println!("{}", middle.style(theme().caption.clone()));
    println!("{}", bottom.style(theme().rule.clone()));
}

/// Blank lines between sections
pub fn gap() {
    println!("\n\n\n");
}

pub fn status(icon: &str, label: &str, value: &str) {
    println!("{} {}: {}", icon, label.style(theme().dim.clone()), value);
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn pair(author: &Author, article: &Article) {
    println!(
        "{} {}",
        author.style(theme().author.clone()),
        article.style(theme().article.clone())
    );
}

pub fn author_with_articles(author: &Author, articles: &[Article]) {
    println!(
        "{} {}",
        author.style(theme().author.clone()),
        RecordList(articles).style(theme().article.clone())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_lines() {
        let [top, middle, bottom] = banner_lines("Printing using explicit join", 50);
        assert_eq!(top, "*".repeat(50));
        assert_eq!(bottom, top);
        assert_eq!(middle.len(), 50);
        assert_eq!(middle.trim(), "Printing using explicit join");
        // 22 columns of padding split evenly
        assert!(middle.starts_with(&" ".repeat(11)));
        assert!(!middle.starts_with(&" ".repeat(12)));
    }

    #[test]
    fn test_banner_caption_wider_than_rule() {
        let [_, middle, _] = banner_lines("a caption that is wider", 10);
        assert_eq!(middle, "a caption that is wider");
    }
}
