//! `capictive` command-line entry point.
//!
//! # Responsibility
//! - Pick the initiative store (hosted or local SQLite) and load the plan.
//! - Apply filter and selection flags, then print the dashboard.
//! - Fill a local store from a saved store response or the built-in plan.

mod render;

use anyhow::{Context, Result};
use capictive_core::db::open_db;
use capictive_core::{
    default_log_level, import_records, init_logging, parse_rows_json, resolve, seed_fallback,
    ImportSummary, LoadOutcome, PlanView, RestInitiativeRepository, SqliteInitiativeRepository,
    StatusFilter,
};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "capictive")]
#[command(about = "Government plan initiative tracker")]
struct Cli {
    /// Local SQLite store to use instead of the hosted one
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory for rotating log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the plan and print the dashboard
    Plan {
        /// Case-insensitive text matched against title and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Status filter: all, completed, in-progress, delayed or pending
        #[arg(long, default_value = "all")]
        status: String,

        /// Initiative id to open in the detail panel
        #[arg(long)]
        select: Option<String>,

        /// Print the view as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write the demonstration plan into the local store given by --db
    Seed,

    /// Copy a saved store response (JSON array of rows) into the local store given by --db
    Import {
        /// JSON file holding the rows
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = absolute_dir(log_dir)?;
        init_logging(level, &log_dir.to_string_lossy())
            .with_context(|| format!("failed to start logging in {}", log_dir.display()))?;
    }

    match cli.command {
        Commands::Plan {
            search,
            status,
            select,
            json,
        } => {
            let mut view = load_view(cli.db.as_deref());
            view.set_search_text(search);
            view.set_status_filter(StatusFilter::parse(&status));
            if let Some(id) = select {
                if !view.select(&id) {
                    eprintln!("unknown initiative id `{id}`; nothing selected");
                }
            }

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &render::PlanReport::new(&view))?;
                writeln!(out)?;
            } else {
                render::write_text(&view, &mut out)?;
            }
            Ok(())
        }
        Commands::Seed => {
            let db = local_store(cli.db.as_deref())?;
            let summary = with_local_store(db, |repo| Ok(seed_fallback(repo)?))?;
            print_summary(&summary, db);
            Ok(())
        }
        Commands::Import { path } => {
            let db = local_store(cli.db.as_deref())?;
            let body = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let records = parse_rows_json(&body)
                .with_context(|| format!("{} is not a store response", path.display()))?;
            let summary = with_local_store(db, |repo| Ok(import_records(repo, &records)?))?;
            print_summary(&summary, db);
            Ok(())
        }
    }
}

/// Loads the plan view; store problems fall back instead of failing.
fn load_view(db: Option<&Path>) -> PlanView {
    match db {
        Some(path) => match open_db(path) {
            Ok(conn) => PlanView::load(&SqliteInitiativeRepository::new(&conn)),
            Err(err) => PlanView::new(resolve(LoadOutcome::Failed(err.into()))),
        },
        None => match RestInitiativeRepository::from_env() {
            Ok(repo) => PlanView::load(&repo),
            Err(err) => PlanView::new(resolve(LoadOutcome::Failed(err))),
        },
    }
}

fn local_store(db: Option<&Path>) -> Result<&Path> {
    db.context("this command needs a local store; pass --db <path>")
}

fn with_local_store<T>(
    path: &Path,
    run: impl FnOnce(&SqliteInitiativeRepository<'_>) -> Result<T>,
) -> Result<T> {
    let conn = open_db(path).with_context(|| format!("failed to open {}", path.display()))?;
    run(&SqliteInitiativeRepository::new(&conn))
}

fn print_summary(summary: &ImportSummary, path: &Path) {
    println!(
        "imported {} initiatives into {} ({} already present)",
        summary.inserted,
        path.display(),
        summary.skipped
    );
}

fn absolute_dir(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()
        .context("cannot resolve current directory")?
        .join(path))
}
