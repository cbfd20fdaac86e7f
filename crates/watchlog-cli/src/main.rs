use clap::{ArgAction, Parser, Subcommand};
use commands::{add, config, delete, list, search, update};
use std::num::NonZeroUsize;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchlog")]
#[command(about = "watchlog - A personal log of everything you watch")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search TMDB for movies and TV shows
    #[command(long_about = "Search TMDB multi-search for movies and TV shows. People and other result kinds are filtered out. Requires a configured API key; run 'watchlog config tmdb' first.")]
    Search {
        /// Free-text query
        query: String,
    },

    /// Record a new watch entry
    #[command(long_about = "Record a watch entry. With --tmdb-id, --title and --media-kind the entry is created from flags; without them an interactive wizard searches TMDB and prompts for the details.")]
    Add {
        /// TMDB id of the title (skips the interactive wizard)
        #[arg(long)]
        tmdb_id: Option<u64>,

        /// Title as it should appear in the log
        #[arg(long)]
        title: Option<String>,

        /// 'movie' or 'tv'
        #[arg(long)]
        media_kind: Option<String>,

        /// Watch date (YYYY-MM-DD or RFC 3339); defaults to today
        #[arg(long)]
        watched: Option<String>,

        /// Rating 0-10
        #[arg(long)]
        rating: Option<u8>,

        /// Review text
        #[arg(long)]
        review: Option<String>,

        /// Private note
        #[arg(long)]
        note: Option<String>,

        /// 'completed', 'watching', 'plan_to_watch', or 'dropped' (default: completed)
        #[arg(long)]
        status: Option<String>,

        /// Episodes watched (tv)
        #[arg(long)]
        progress: Option<u32>,

        /// Total episodes (tv)
        #[arg(long)]
        total_episodes: Option<u32>,

        /// Poster path fragment from TMDB
        #[arg(long)]
        poster_path: Option<String>,
    },

    /// List recorded entries
    #[command(long_about = "List entries, newest watch date first. Filters combine with AND. JSON output carries the data page, pagination metadata, and a collection summary.")]
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        /// Minimum rating (inclusive)
        #[arg(long)]
        min_rating: Option<u8>,

        /// Filter by media kind ('movie' or 'tv')
        #[arg(long)]
        media_kind: Option<String>,

        /// Case-insensitive title substring
        #[arg(long)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Page size
        #[arg(long, default_value = "10")]
        limit: NonZeroUsize,

        /// Ignore filters and pagination; print every entry
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["status", "min_rating", "media_kind", "search", "page"])]
        all: bool,
    },

    /// Edit fields of an existing entry
    #[command(long_about = "Merge the supplied fields into an existing entry. Unsupplied fields are left untouched; id and creation time cannot change.")]
    Update {
        /// Entry id
        id: String,

        #[arg(long)]
        tmdb_id: Option<u64>,

        #[arg(long)]
        title: Option<String>,

        /// 'movie' or 'tv'
        #[arg(long)]
        media_kind: Option<String>,

        /// Watch date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        watched: Option<String>,

        /// Rating 0-10
        #[arg(long)]
        rating: Option<u8>,

        #[arg(long)]
        review: Option<String>,

        #[arg(long)]
        note: Option<String>,

        /// 'completed', 'watching', 'plan_to_watch', or 'dropped'
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        progress: Option<u32>,

        #[arg(long)]
        total_episodes: Option<u32>,

        #[arg(long)]
        poster_path: Option<String>,
    },

    /// Delete an entry
    #[command(long_about = "Delete an entry by id. Deleting an id that does not exist is not an error. Prompts for confirmation unless --yes is given.")]
    Delete {
        /// Entry id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Configure credentials and settings
    #[command(long_about = "Manage configuration for watchlog. Use subcommands to view settings, set the TMDB API key, or choose the storage backend.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show,

    /// Configure the TMDB API key
    #[command(long_about = "Set the TMDB API key. Create one at https://www.themoviedb.org/settings/api. Prompts with hidden input when --api-key is not given.")]
    Tmdb {
        /// TMDB API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Configure the storage backend
    #[command(long_about = "Choose where entries live: 'json' (a document-collection file) or 'csv' (a flat table file), with an optional data directory override.")]
    Storage {
        /// 'json' or 'csv'
        #[arg(long)]
        backend: Option<String>,

        /// Data directory override
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => search::run_search(&query, &output).await,
        Commands::Add {
            tmdb_id,
            title,
            media_kind,
            watched,
            rating,
            review,
            note,
            status,
            progress,
            total_episodes,
            poster_path,
        } => {
            add::run_add(
                add::AddArgs {
                    tmdb_id,
                    title,
                    media_kind,
                    watched,
                    rating,
                    review,
                    note,
                    status,
                    progress,
                    total_episodes,
                    poster_path,
                },
                &output,
            )
            .await
        }
        Commands::List {
            status,
            min_rating,
            media_kind,
            search,
            page,
            limit,
            all,
        } => list::run_list(
            list::ListArgs {
                status,
                min_rating,
                media_kind,
                search,
                page,
                limit,
                all,
            },
            &output,
        ),
        Commands::Update {
            id,
            tmdb_id,
            title,
            media_kind,
            watched,
            rating,
            review,
            note,
            status,
            progress,
            total_episodes,
            poster_path,
        } => update::run_update(
            &id,
            update::UpdateArgs {
                tmdb_id,
                title,
                media_kind,
                watched,
                rating,
                review,
                note,
                status,
                progress,
                total_episodes,
                poster_path,
            },
            &output,
        ),
        Commands::Delete { id, yes } => delete::run_delete(&id, yes, &output),
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(cmd, &output)
        }
    }
}
