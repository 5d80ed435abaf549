use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub rule: Style,
    pub caption: Style,
    pub author: Style,
    pub article: Style,
    pub success: Style,
    pub dim: Style,
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            rule: Style::new().bright_black(),
            caption: Style::new().cyan().bold(),
            author: Style::new().magenta(),
            article: Style::new(),
            success: Style::new().green().bold(),
            dim: Style::new().white().dimmed(),
        }
    }

    pub fn plain() -> Self {
        Self {
            rule: Style::new(),
            caption: Style::new(),
            author: Style::new(),
            article: Style::new(),
            success: Style::new(),
            dim: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
