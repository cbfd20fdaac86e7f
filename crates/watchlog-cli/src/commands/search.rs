use crate::commands::{load_environment, spinner};
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Table;
use watchlog_tmdb::{SearchResult, TmdbClient};

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let (config, _paths) = load_environment()?;
    let tmdb = config.require_tmdb().map_err(|e| eyre!("{}", e))?;
    let client = TmdbClient::new(tmdb);

    let progress = if output.format() == OutputFormat::Human && !output.is_quiet() {
        Some(spinner(format!("Searching TMDB for \"{}\"", query)))
    } else {
        None
    };

    let results = client.search(query).await;

    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let results = results?;

    if results.is_empty() {
        output.info(format!("No movie or TV results for \"{}\"", query));
        return Ok(());
    }

    match output.format() {
        OutputFormat::Human => {
            output.println(render_results(&results).to_string());
            output.println(format!("{} results", results.len()));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&results)?);
        }
    }

    Ok(())
}

fn render_results(results: &[SearchResult]) -> Table {
    let mut table = Table::new();
    table.set_header(["#", "Kind", "Title", "Year", "TMDB ID", "Score"]);

    for (i, result) in results.iter().enumerate() {
        let score = match result {
            SearchResult::Movie(m) => m.vote_average,
            SearchResult::Tv(t) => t.vote_average,
        };
        table.add_row([
            (i + 1).to_string(),
            result.media_kind().to_string(),
            result.display_title().to_string(),
            result.year().unwrap_or("-").to_string(),
            result.tmdb_id().to_string(),
            score.map(|s| format!("{:.1}", s)).unwrap_or_else(|| "-".to_string()),
        ]);
    }

    table
}
