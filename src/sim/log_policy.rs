//! 日志策略
//!
//! 决定 run 调用返回的执行日志里包含哪些已执行事件。

use super::event::Event;
use std::fmt;

/// 记录全部、全不记录，或按谓词筛选。
#[derive(Default)]
pub enum LogPolicy {
    #[default]
    All,
    Nothing,
    If(Box<dyn Fn(&Event) -> bool>),
}

impl LogPolicy {
    pub fn filter<F>(pred: F) -> Self
    where
        F: Fn(&Event) -> bool + 'static,
    {
        LogPolicy::If(Box::new(pred))
    }

    pub fn includes(&self, event: &Event) -> bool {
        match self {
            LogPolicy::All => true,
            LogPolicy::Nothing => false,
            LogPolicy::If(pred) => pred(event),
        }
    }
}

impl From<bool> for LogPolicy {
    fn from(enabled: bool) -> Self {
        if enabled {
            LogPolicy::All
        } else {
            LogPolicy::Nothing
        }
    }
}

impl fmt::Debug for LogPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogPolicy::All => f.write_str("All"),
            LogPolicy::Nothing => f.write_str("Nothing"),
            LogPolicy::If(_) => f.write_str("If(..)"),
        }
    }
}
