use crate::commands::load_environment;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Table;
use serde_json::json;
use std::path::PathBuf;
use watchlog_config::{StorageBackend, TmdbConfig};

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(output),
        ConfigCommands::Tmdb { api_key } => set_tmdb(api_key, output),
        ConfigCommands::Storage { backend, path } => set_storage(backend, path, output),
    }
}

fn show_config(output: &Output) -> Result<()> {
    let (config, paths) = load_environment()?;

    let api_key = config
        .tmdb
        .as_ref()
        .map(|t| mask_secret(&t.api_key))
        .unwrap_or_else(|| "(not set)".to_string());
    let data_dir = config
        .storage
        .path
        .clone()
        .unwrap_or_else(|| paths.data_dir().to_path_buf());

    let config_file = paths.config_file().display().to_string();
    let backend = config.storage.backend.to_string();
    let data_dir_display = data_dir.display().to_string();

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.set_header(["Setting", "Value"]);
            table.add_row(["Config file", config_file.as_str()]);
            table.add_row(["TMDB API key", api_key.as_str()]);
            table.add_row(["Storage backend", backend.as_str()]);
            table.add_row(["Data directory", data_dir_display.as_str()]);
            output.println(table.to_string());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": paths.config_file(),
                "tmdb_api_key": api_key,
                "storage_backend": config.storage.backend.to_string(),
                "data_dir": data_dir,
            }));
        }
    }
    Ok(())
}

fn set_tmdb(api_key: Option<String>, output: &Output) -> Result<()> {
    let (mut config, paths) = load_environment()?;

    let key = match api_key {
        Some(key) => key,
        None => rpassword::prompt_password("TMDB API key: ")
            .map_err(|e| eyre!("Failed to read API key: {}", e))?,
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    config.tmdb = match config.tmdb.take() {
        // Keep a custom base_url if one was configured
        Some(mut tmdb) => {
            tmdb.api_key = key;
            Some(tmdb)
        }
        None => Some(TmdbConfig::new(key)),
    };

    config
        .save_to_file(&paths.config_file())
        .map_err(|e| eyre!("{}", e))?;
    output.success("TMDB API key saved");
    Ok(())
}

fn set_storage(backend: Option<String>, path: Option<PathBuf>, output: &Output) -> Result<()> {
    if backend.is_none() && path.is_none() {
        let (config, _paths) = load_environment()?;
        output.warn(format!(
            "No changes requested. Current backend: {}. Use --backend or --path",
            config.storage.backend
        ));
        return Ok(());
    }

    let (mut config, paths) = load_environment()?;

    if let Some(backend) = backend {
        config.storage.backend = backend
            .parse::<StorageBackend>()
            .map_err(|e| eyre!(e))?;
    }
    if let Some(path) = path {
        config.storage.path = Some(path);
    }

    config
        .save_to_file(&paths.config_file())
        .map_err(|e| eyre!("{}", e))?;
    output.success(format!("Storage backend set to {}", config.storage.backend));
    Ok(())
}

fn mask_secret(secret: &str) -> String {
    if secret.len() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", &secret[..4])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secrets_are_fully_masked() {
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret("abcd1234"), "abcd****");
    }
}
