//! 事件
//!
//! 定义仿真事件：在某个仿真时间执行一个动作，并携带调用方的上下文。

use super::error::ActionResult;
use super::scheduler::EventScheduler;
use super::time::SimTime;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// 事件上下文：字符串键到任意 JSON 值的映射，调度器不解释其内容。
pub type Context = BTreeMap<String, Value>;

/// 事件动作。执行时拿到调度器的可变引用，因此可以在动作内部继续调度新事件。
pub type Action = Box<dyn FnMut(&mut EventScheduler) -> ActionResult>;

/// 调度器为每个已调度事件分配的编号，同时作为同一时刻事件的 FIFO 次序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(pub u64);

/// 仿真事件：`time` 时刻执行 `action`，附带 `context`。
///
/// 事件一旦创建，调度器不会修改它的时间、上下文或动作；唯一可变的是激活标志。
pub struct Event {
    time: SimTime,
    context: Context,
    action: Action,
    active: bool,
}

impl Event {
    pub fn new<F>(time: SimTime, context: Context, action: F) -> Self
    where
        F: FnMut(&mut EventScheduler) -> ActionResult + 'static,
    {
        Self {
            time,
            context,
            action: Box::new(action),
            active: true,
        }
    }

    /// 构造阶段追加一个上下文条目。
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// 未激活的事件仍按时间出队并推进时钟，但不执行动作、不进入日志。
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub(crate) fn fire(&mut self, sched: &mut EventScheduler) -> ActionResult {
        (self.action)(sched)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("time", &self.time)
            .field("context", &self.context)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
