use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pagestate::config::Config;
use pagestate::fetch::{FetchStatus, HttpListSource};
use pagestate::logging::init_tracing;
use pagestate::mvi::Reducer;
use pagestate::navigation::{menu, Navigate, Navigator};
use pagestate::pages::{ApiPage, Field, FormIntent, FormReducer, FormState, StatePage};
use pagestate::storage::{FileMedium, PersistentValueStore};

#[derive(Parser, Debug)]
#[command(name = "pagestate", version, about = "Walk through the course pages")]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the course outline
    Routes,
    /// Show where a location leads
    Open { path: String },
    /// Show or change the persisted name
    Name {
        #[arg(long, conflicts_with = "clear")]
        set: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    /// Validate and submit the contact form
    Form {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Fetch the remote user list
    Users {
        /// Show every record instead of the capped list
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load config")?;

    match cli.command {
        Command::Routes => {
            for item in menu() {
                println!("{:<10} {:<12} {}", item.route.path(), item.label, item.description);
            }
        }
        Command::Open { path } => {
            let mut navigator = Navigator::new();
            let route = navigator.navigate(&path);
            println!("{}: {}", route.title(), route.description());
            for link in route.next().into_iter().chain(route.home_link()) {
                println!("  -> {} ({})", link.label, link.route.path());
            }
        }
        Command::Name { set, clear } => {
            let medium = FileMedium::with_quota(config.storage_path(), config.storage.quota_bytes);
            let store = PersistentValueStore::new(Arc::new(medium));
            let mut page = StatePage::open(&store);
            if let Some(value) = set {
                page.on_name_change(value);
            } else if clear {
                page.clear_name();
            }
            println!("Current Value: {}", page.name_display());
        }
        Command::Form {
            first_name,
            email,
            message,
        } => {
            let state = [
                (Field::FirstName, first_name),
                (Field::Email, email),
                (Field::Message, message),
            ]
            .into_iter()
            .fold(FormState::default(), |state, (field, value)| {
                FormReducer::reduce(state, FormIntent::Change { field, value })
            });
            if !state.can_submit() {
                anyhow::bail!("first name and email are required to submit");
            }
            let state = FormReducer::reduce(state, FormIntent::Submit);
            match state.success_message() {
                Some(line) => {
                    tracing::info!("form submitted");
                    println!("{line}");
                }
                None => {
                    for field in [Field::FirstName, Field::Email, Field::Message] {
                        if let Some(error) = state.errors.get(field) {
                            println!("{}: {}", field.name(), error);
                        }
                    }
                }
            }
        }
        Command::Users { all } => {
            let source = HttpListSource::new(&config.api).context("failed to build HTTP client")?;
            let max_items = if all { usize::MAX } else { config.display.max_items };
            let page = ApiPage::new(source, max_items);
            page.open().await.context("fetch task panicked")?;
            for line in page.render_lines() {
                println!("{line}");
            }
            if let FetchStatus::Error { message } = page.state().status() {
                anyhow::bail!("fetch from {} failed: {message}", config.api.endpoint);
            }
        }
    }

    Ok(())
}
