//! relmap CLI - seeds a small blog database and prints it through each load pattern

use clap::Parser;
use std::path::PathBuf;
use relmap::config::{self, RelmapConfig};
use relmap::seed;
use relmap::storage::RecordStore;
use relmap::ui::{self, Icons, RoundTripTable};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "relmap")]
#[command(version = "0.0.1")]
#[command(about = "One-to-many relational mapping demo over SQLite")]
#[command(long_about = r#"
relmap seeds a SQLite file with authors and their articles (once), then reads
the relationship back four ways:
  • an explicit join for the first author
  • lazy access to the first author's articles
  • every (author, article) pair
  • eager loading (1 round-trip) vs lazy loading (1 + N round-trips)

Example usage:
  relmap
  relmap --database ./data/blog.db --verbose
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    run(&config, cli.database)
}

fn run(config: &RelmapConfig, database: Option<PathBuf>) -> anyhow::Result<()> {
    let db_path = config.database_path(database.as_deref());
    let width = config.banner_width();
    config::ensure_db_dir(&db_path)?;

    ui::status(Icons::DATABASE, "Database", &db_path.display().to_string());
    let mut store = RecordStore::open(&db_path)?;

    if store.seed_if_empty(&seed::default_authors())? {
        ui::status(Icons::SEED, "Seeded", "empty store with demo authors and articles");
    }

    let mut summary = RoundTripTable::new();

    {
        let session = store.session()?;

        ui::banner("Printing using explicit join", width);
        if let Some(first) = session.first_author()? {
            for (author, article) in session.explicit_join(first.id)? {
                ui::pair(&author, &article);
            }
        }

        ui::gap();
        ui::banner("Printing using my relationship", width);
        let mut authors = session.lazy_load()?;
        if let Some(first) = authors.first_mut() {
            let author = first.author().clone();
            let articles = first.articles()?;
            ui::author_with_articles(&author, articles);
        }

        ui::gap();
        ui::banner("Printing all pairs", width);
        for (author, article) in session.all_pairs()? {
            ui::pair(&author, &article);
        }
    }

    {
        let session = store.session()?;
        ui::gap();
        ui::banner("Printing using eager loading", width);
        let loaded = session.eager_load()?;
        for entry in &loaded {
            ui::author_with_articles(&entry.author, &entry.articles);
        }
        summary.add_row("eager (joined)", loaded.len(), session.round_trips());
    }

    {
        let session = store.session()?;
        ui::gap();
        ui::banner("Printing using lazy loading", width);
        let mut authors = session.lazy_load()?;
        for lazy in authors.iter_mut() {
            let author = lazy.author().clone();
            let articles = lazy.articles()?;
            ui::author_with_articles(&author, articles);
        }
        summary.add_row("lazy (per author)", authors.len(), session.round_trips());
    }

    ui::gap();
    ui::status(Icons::STATS, "Round-trips per load pattern", "");
    println!("{}", summary.build());
    println!("{}", store.stats()?);
    ui::success("Done");

    Ok(())
}
