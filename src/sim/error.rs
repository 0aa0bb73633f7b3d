//! 调度错误
//!
//! 动作失败不在调度器内部恢复，原样作为 `source` 返回给 run 的调用方。

use super::event::EventId;
use super::time::SimTime;
use thiserror::Error;

/// 事件动作返回的错误。
pub type ActionError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type ActionResult = Result<(), ActionError>;

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// 动作失败。此时事件已出队，时钟停在该事件的时间。
    #[error("event {id:?} at {time} failed: {source}")]
    Action {
        time: SimTime,
        id: EventId,
        #[source]
        source: ActionError,
    },

    #[error("cannot run until {max_time}: clock is already at {now}")]
    TimeReversal { now: SimTime, max_time: SimTime },

    /// 在事件动作内部调用了 `step`/`run*`。
    #[error("cannot drive the scheduler from inside an action (at {now})")]
    Reentrant { now: SimTime },
}

impl SchedulerError {
    /// 动作失败时取出原始错误。
    pub fn into_action_error(self) -> Option<ActionError> {
        match self {
            SchedulerError::Action { source, .. } => Some(source),
            SchedulerError::TimeReversal { .. } | SchedulerError::Reentrant { .. } => None,
        }
    }
}
