//! 仿真核心模块
//!
//! 此模块包含离散事件仿真的核心组件：仿真时间、事件、日志策略和调度器。

// 子模块声明
mod error;
mod event;
mod log_policy;
mod scheduled_event;
mod scheduler;
mod time;

// 重新导出公共接口
pub use error::{ActionError, ActionResult, SchedulerError};
pub use event::{Action, Context, Event, EventId};
pub use log_policy::LogPolicy;
pub use scheduler::EventScheduler;
pub use time::SimTime;
