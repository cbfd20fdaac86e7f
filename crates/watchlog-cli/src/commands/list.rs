use crate::commands::{load_environment, parse_opt};
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::Table;
use std::num::NonZeroUsize;
use watchlog_models::WatchEntry;
use watchlog_store::{open_store, run_query, sorted_by_watched_desc, EntryQuery};

pub struct ListArgs {
    pub status: Option<String>,
    pub min_rating: Option<u8>,
    pub media_kind: Option<String>,
    pub search: Option<String>,
    pub page: usize,
    pub limit: NonZeroUsize,
    pub all: bool,
}

pub fn run_list(args: ListArgs, output: &Output) -> Result<()> {
    let (config, paths) = load_environment()?;
    let store = open_store(&config, &paths);
    let entries = store.list()?;

    if args.all {
        let entries = sorted_by_watched_desc(entries);
        match output.format() {
            OutputFormat::Human => {
                output.println(entry_table(&entries).to_string());
                output.println(format!("{} entries", entries.len()));
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                output.json(&serde_json::to_value(&entries)?);
            }
        }
        return Ok(());
    }

    let query = EntryQuery {
        status: parse_opt(args.status.as_deref())?,
        min_rating: args.min_rating,
        media_kind: parse_opt(args.media_kind.as_deref())?,
        title_search: args.search,
        page: args.page,
        per_page: args.limit,
    };
    let response = run_query(&entries, &query);

    match output.format() {
        OutputFormat::Human => {
            output.println(entry_table(&response.data).to_string());
            output.println(response.summary.clone());
            output.println(format!(
                "Page {} of {} ({} items)",
                response.pagination.current_page,
                response.pagination.total_pages,
                response.pagination.total_items
            ));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&response)?);
        }
    }

    Ok(())
}

fn entry_table(entries: &[WatchEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(["ID", "Title", "Kind", "Status", "Rating", "Progress", "Watched"]);

    for entry in entries {
        let progress = match (entry.progress, entry.total_episodes) {
            (Some(done), Some(total)) => format!("{}/{}", done, total),
            (Some(done), None) => done.to_string(),
            _ => "-".to_string(),
        };
        table.add_row([
            entry.id.clone(),
            entry.title.clone(),
            entry.media_kind.to_string(),
            entry.status.to_string(),
            entry
                .rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            progress,
            entry.watched_at.format("%Y-%m-%d").to_string(),
        ]);
    }

    table
}
