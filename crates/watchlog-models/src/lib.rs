pub mod entry;
pub mod media;
pub mod status;

pub use entry::{EntryPatch, NewEntry, WatchEntry};
pub use media::MediaKind;
pub use status::WatchStatus;
