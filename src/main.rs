//! # Snippet DB CLI (`snip`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `snip init` | Create the snippet folder and the index database |
//! | `snip add --language L --file F` | Ingest a snippet file (`-` reads stdin) |
//! | `snip search --language L [--query Q]` | List snippets whose title contains Q |
//! | `snip languages` | List languages present in the index |
//! | `snip show <id>` | Print a snippet's metadata and current body |
//!
//! ## Exit codes
//!
//! `0` success, `2` invalid input, `3` not found, `4` filesystem error,
//! `5` index error, `1` anything else (bad config, bad arguments).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use snippet_db::config::Config;
use snippet_db::{get, ingest, search, SnippetError};

/// Snippet DB: language-tagged code snippets with a searchable index.
#[derive(Parser)]
#[command(
    name = "snip",
    about = "Snippet DB: store code snippets by language and search them by title",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./snip.toml` when present, otherwise built-in settings
    /// (`./snippets` and `./snippets.db`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the snippet folder and index database.
    ///
    /// Idempotent; running it multiple times is safe.
    Init,

    /// Add a snippet from a file.
    ///
    /// The first commented line is the title, an optional second commented
    /// line the description. Prints where the snippet was saved.
    Add {
        /// Language label; selects the comment markers and the folder.
        #[arg(long)]
        language: String,

        /// Snippet file to read, or `-` for stdin.
        #[arg(long)]
        file: PathBuf,
    },

    /// Search snippet titles within one language.
    Search {
        /// Language to search in.
        #[arg(long)]
        language: String,

        /// Substring to look for in titles. Omit to list everything.
        #[arg(long)]
        query: Option<String>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List languages that have at least one snippet.
    Languages,

    /// Show a snippet's metadata and body by index id.
    Show {
        /// Index id, as assigned on ingestion.
        id: i64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let cfg = match Config::resolve(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(command: Commands, cfg: &Config) -> Result<(), SnippetError> {
    match command {
        Commands::Init => {
            let index = ingest::init(cfg).await?;
            index.close().await;
            println!("Initialized database and snippet folder");
        }
        Commands::Add { language, file } => {
            ingest::run_add(cfg, &language, &file).await?;
        }
        Commands::Search {
            language,
            query,
            json,
        } => {
            search::run_search(cfg, &language, query.as_deref(), json).await?;
        }
        Commands::Languages => {
            search::run_languages(cfg).await?;
        }
        Commands::Show { id } => {
            get::run_show(cfg, id).await?;
        }
    }

    Ok(())
}
