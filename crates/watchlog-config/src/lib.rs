pub mod config;
pub mod paths;

pub use config::{Config, StorageBackend, StorageConfig, TmdbConfig};
pub use paths::{base_path_override, PathManager};
