pub mod backend;
pub mod status;
pub mod tracker;

pub use backend::StatsBackend;
pub use status::{JobState, JobStatus};
pub use tracker::{JobTracker, PollOutcome, SubmitOutcome};
