use crate::commands::{
    load_environment, parse_opt, parse_watched_date, prompts, spinner, validate_rating,
};
use crate::output::{Output, OutputFormat};
use chrono::Utc;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use watchlog_config::Config;
use watchlog_models::{MediaKind, NewEntry, WatchStatus};
use watchlog_store::open_store;
use watchlog_tmdb::TmdbClient;

pub struct AddArgs {
    pub tmdb_id: Option<u64>,
    pub title: Option<String>,
    pub media_kind: Option<String>,
    pub watched: Option<String>,
    pub rating: Option<u8>,
    pub review: Option<String>,
    pub note: Option<String>,
    pub status: Option<String>,
    pub progress: Option<u32>,
    pub total_episodes: Option<u32>,
    pub poster_path: Option<String>,
}

pub async fn run_add(args: AddArgs, output: &Output) -> Result<()> {
    let (config, paths) = load_environment()?;

    let new = match args.tmdb_id {
        Some(tmdb_id) => entry_from_flags(tmdb_id, args)?,
        None => interactive_add(&config).await?,
    };
    validate_rating(new.rating)?;

    let store = open_store(&config, &paths);
    let entry = store.create(new)?;

    match output.format() {
        OutputFormat::Human => {
            output.success(format!("Added {} ({})", entry.title, entry.id));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&entry)?);
        }
    }
    Ok(())
}

fn entry_from_flags(tmdb_id: u64, args: AddArgs) -> Result<NewEntry> {
    let title = args
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| eyre!("--title is required (and cannot be empty) when --tmdb-id is given"))?;

    let media_kind: MediaKind = args
        .media_kind
        .ok_or_else(|| eyre!("--media-kind is required when --tmdb-id is given"))?
        .parse()
        .map_err(|e: String| eyre!(e))?;

    let watched_at = match args.watched.as_deref() {
        Some(w) => parse_watched_date(w)?,
        None => Utc::now(),
    };

    let status = parse_opt::<WatchStatus>(args.status.as_deref())?.unwrap_or_default();

    Ok(NewEntry {
        tmdb_id,
        title,
        poster_path: args.poster_path,
        media_kind,
        watched_at,
        rating: args.rating,
        review: args.review,
        note: args.note,
        status,
        progress: args.progress,
        total_episodes: args.total_episodes,
    })
}

/// Wizard path: search TMDB, pick a hit, prompt for the rest
async fn interactive_add(config: &Config) -> Result<NewEntry> {
    let tmdb = config.require_tmdb().map_err(|e| eyre!("{}", e))?;
    let client = TmdbClient::new(tmdb);

    let query = prompts::prompt_string("Search TMDB", None)?;

    let progress = spinner(format!("Searching TMDB for \"{}\"", query));
    let results = client.search(&query).await;
    progress.finish_and_clear();
    let results = results?;

    if results.is_empty() {
        return Err(eyre!("No movie or TV results for \"{}\"", query));
    }

    let labels: Vec<String> = results
        .iter()
        .map(|r| match r.year() {
            Some(year) => format!("{} ({}) [{}]", r.display_title(), year, r.media_kind()),
            None => format!("{} [{}]", r.display_title(), r.media_kind()),
        })
        .collect();
    let picked = &results[prompts::prompt_select("Select a title", &labels, 0)?];

    let today = Utc::now().format("%Y-%m-%d").to_string();
    let watched_str = prompts::prompt_string("Watched on (YYYY-MM-DD)", Some(&today))?;
    let watched_at = parse_watched_date(&watched_str)?;

    let status_items: Vec<String> = ["completed", "watching", "plan_to_watch", "dropped"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let status: WatchStatus = status_items[prompts::prompt_select("Status", &status_items, 0)?]
        .parse()
        .map_err(|e: String| eyre!(e))?;

    let rating = prompts::prompt_optional_number::<u8>("Rating 0-10 (empty to skip)")?;
    let review = prompts::prompt_optional("Review (empty to skip)")?;
    let note = prompts::prompt_optional("Private note (empty to skip)")?;

    let (progress, total_episodes) = if picked.media_kind() == MediaKind::Tv {
        (
            prompts::prompt_optional_number::<u32>("Episodes watched (empty to skip)")?,
            prompts::prompt_optional_number::<u32>("Total episodes (empty to skip)")?,
        )
    } else {
        (None, None)
    };

    Ok(NewEntry {
        tmdb_id: picked.tmdb_id(),
        title: picked.display_title().to_string(),
        poster_path: picked.poster_path().map(str::to_string),
        media_kind: picked.media_kind(),
        watched_at,
        rating,
        review,
        note,
        status,
        progress,
        total_episodes,
    })
}
