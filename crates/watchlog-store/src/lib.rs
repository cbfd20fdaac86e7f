pub mod csv_store;
pub mod error;
pub mod json_store;
pub mod query;
pub mod store;

pub use csv_store::CsvStore;
pub use error::{Result, StoreError};
pub use json_store::JsonStore;
pub use query::{run_query, sorted_by_watched_desc, EntryQuery, Pagination, QueryResponse};
pub use store::{open_store, EntryStore};
