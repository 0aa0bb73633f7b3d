//! 调度事件
//!
//! 队列中的条目：事件本身加上调度编号，定义出队优先级。

use super::event::{Event, EventId};
use super::time::SimTime;
use std::cmp::{Ordering, Reverse};

/// 调度事件，包含执行时间、调度编号和事件对象。
pub(crate) struct ScheduledEvent {
    pub(crate) at: SimTime,
    pub(crate) id: EventId,
    pub(crate) event: Event,
}

impl ScheduledEvent {
    pub(crate) fn new(id: EventId, event: Event) -> Self {
        Self {
            at: event.time(),
            id,
            event,
        }
    }

    /// 堆顶是 `(at, id)` 最小的条目：时间优先，同一时刻按调度顺序。
    fn priority(&self) -> Reverse<(SimTime, EventId)> {
        Reverse((self.at, self.id))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.priority() == other.priority()
    }
}

impl Eq for ScheduledEvent {}
