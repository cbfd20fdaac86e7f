use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a recorded entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    /// Finished watching (the default for new entries)
    #[default]
    Completed,
    /// Currently watching
    Watching,
    /// Want to watch
    PlanToWatch,
    /// Stopped watching
    Dropped,
}

impl WatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Completed => "completed",
            WatchStatus::Watching => "watching",
            WatchStatus::PlanToWatch => "plan_to_watch",
            WatchStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(WatchStatus::Completed),
            "watching" => Ok(WatchStatus::Watching),
            "plan_to_watch" | "plan-to-watch" => Ok(WatchStatus::PlanToWatch),
            "dropped" => Ok(WatchStatus::Dropped),
            _ => Err(format!(
                "Invalid status: {}. Use 'completed', 'watching', 'plan_to_watch', or 'dropped'",
                s
            )),
        }
    }
}
