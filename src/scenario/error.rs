use crate::sim::SchedulerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("read scenario {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse scenario json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported schema_version {0} (expected 1)")]
    UnsupportedSchema(u32),

    #[error("events[{index}]: repeat.every must be > 0")]
    InvalidRepeat { index: usize },

    #[error("start_time {start} is after max_time {max}")]
    StartAfterMaxTime { start: u64, max: u64 },

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}
