use crate::commands::{load_environment, parse_opt, parse_watched_date, validate_rating};
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use watchlog_models::{EntryPatch, MediaKind, WatchStatus};
use watchlog_store::open_store;

pub struct UpdateArgs {
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

pub fn run_update(id: &str, args: UpdateArgs, output: &Output) -> Result<()> {
    validate_rating(args.rating)?;

    let patch = EntryPatch {
        tmdb_id: args.tmdb_id,
        title: args.title,
        poster_path: args.poster_path,
        media_kind: parse_opt::<MediaKind>(args.media_kind.as_deref())?,
        watched_at: args.watched.as_deref().map(parse_watched_date).transpose()?,
        rating: args.rating,
        review: args.review,
        note: args.note,
        status: parse_opt::<WatchStatus>(args.status.as_deref())?,
        progress: args.progress,
        total_episodes: args.total_episodes,
    };

    if patch.is_empty() {
        output.warn("No fields supplied, nothing to update");
        return Ok(());
    }

    let (config, paths) = load_environment()?;
    let store = open_store(&config, &paths);
    let entry = store.update(id, patch)?;

    match output.format() {
        OutputFormat::Human => {
            output.success(format!("Updated {} ({})", entry.title, entry.id));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&entry)?);
        }
    }
    Ok(())
}
