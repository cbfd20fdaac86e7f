pub mod add;
pub mod config;
pub mod delete;
pub mod list;
pub mod prompts;
pub mod search;
pub mod update;

use chrono::{DateTime, NaiveDate, Utc};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use indicatif::ProgressBar;
use std::str::FromStr;
use std::time::Duration;
use watchlog_config::{Config, PathManager};

/// Load the config file (or defaults when absent) and the platform paths.
/// Every command starts here.
pub fn load_environment() -> Result<(Config, PathManager)> {
    let paths = PathManager::default();
    let config =
        Config::load_or_default(&paths.config_file()).map_err(|e| eyre!("{}", e))?;
    tracing::debug!(
        config_file = %paths.config_file().display(),
        backend = %config.storage.backend,
        "loaded configuration"
    );
    Ok((config, paths))
}

/// Normalize a user-supplied watch date to a UTC instant. Accepts a full
/// RFC 3339 timestamp or a bare YYYY-MM-DD date taken as UTC midnight.
pub fn parse_watched_date(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| eyre!("Invalid date '{}'. Use YYYY-MM-DD or an RFC 3339 timestamp", s))?;
    date.and_hms_opt(0, 0, 0)
        .and_then(|dt| dt.and_local_timezone(Utc).earliest())
        .ok_or_else(|| eyre!("Failed to convert date '{}' to UTC", s))
}

/// Parse an optional string flag into its typed value
pub fn parse_opt<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    value.map(|s| s.parse::<T>().map_err(|e| eyre!(e))).transpose()
}

/// Ratings are capped at 10 by every input surface; the store stays loose
pub fn validate_rating(rating: Option<u8>) -> Result<()> {
    if let Some(r) = rating {
        if r > 10 {
            return Err(eyre!("Rating must be between 0 and 10, got {}", r));
        }
    }
    Ok(())
}

pub fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use watchlog_models::{MediaKind, WatchStatus};

    #[test]
    fn bare_date_becomes_utc_midnight() {
        let parsed = parse_watched_date("2024-06-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn rfc3339_timestamp_is_normalized_to_utc() {
        let parsed = parse_watched_date("2024-06-01T20:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 1, 18, 30, 0).unwrap());
    }

    #[test]
    fn garbage_date_is_rejected() {
        assert!(parse_watched_date("last tuesday").is_err());
        assert!(parse_watched_date("2024-13-99").is_err());
    }

    #[test]
    fn parse_opt_maps_flag_values() {
        let status: Option<WatchStatus> = parse_opt(Some("watching")).unwrap();
        assert_eq!(status, Some(WatchStatus::Watching));

        let kind: Option<MediaKind> = parse_opt(Some("tv")).unwrap();
        assert_eq!(kind, Some(MediaKind::Tv));

        let none: Option<WatchStatus> = parse_opt(None).unwrap();
        assert_eq!(none, None);

        assert!(parse_opt::<WatchStatus>(Some("paused")).is_err());
    }

    #[test]
    fn rating_cap_is_inclusive() {
        assert!(validate_rating(Some(10)).is_ok());
        assert!(validate_rating(None).is_ok());
        assert!(validate_rating(Some(11)).is_err());
    }
}
