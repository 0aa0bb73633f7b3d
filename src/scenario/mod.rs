//! 场景描述（scenario.json）
//!
//! 用 JSON 描述一组初始事件、日志筛选和运行边界，供命令行工具加载运行。

mod error;
mod runner;
mod spec;

pub use error::ScenarioError;
pub use runner::{EventRecord, ScenarioReport, run_scenario};
pub use spec::{EventSpec, LoggingSpec, RepeatSpec, SCHEMA_VERSION, ScenarioMeta, ScenarioSpec};
