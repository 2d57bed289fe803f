pub mod reporter;
pub mod types;
pub mod watcher;

pub use reporter::StatusReporter;
pub use types::WatchOutcome;
pub use watcher::Watcher;
