pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{author_with_articles, banner, gap, pair, status, success};
pub use table::RoundTripTable;
pub use theme::{theme, Theme};
