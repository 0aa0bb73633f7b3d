//! 事件调度器
//!
//! 维护仿真时钟与按时间排序的事件队列，驱动运行循环并产出执行日志。

use super::error::{ActionResult, SchedulerError};
use super::event::{Context, Event, EventId};
use super::log_policy::LogPolicy;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace, warn};

/// 离散事件调度器：维护当前时间与事件队列。
///
/// 时钟单调不减；同一时刻的事件按调度顺序（FIFO）执行。动作在执行时拿到
/// `&mut EventScheduler`，可以重入地调度新事件，新事件在同一次 run 中可见；
/// 但不能在动作内部再次驱动运行循环（`step`/`run*` 返回 `Reentrant`）。
#[derive(Default)]
pub struct EventScheduler {
    now: SimTime,
    next_id: u64,
    executed: u64,
    q: BinaryHeap<ScheduledEvent>,
    /// 正在执行某个事件的动作
    running: bool,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从指定的起始时间开始的调度器。
    pub fn with_start_time(start: SimTime) -> Self {
        Self {
            now: start,
            ..Self::default()
        }
    }

    /// 获取当前仿真时间
    pub fn current_time(&self) -> SimTime {
        self.now
    }

    /// 累计执行过的动作数
    pub fn executed_count(&self) -> u64 {
        self.executed
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// 下一个将被执行的事件
    pub fn peek(&self) -> Option<&Event> {
        self.q.peek().map(|item| &item.event)
    }

    pub fn next_event_time(&self) -> Option<SimTime> {
        self.q.peek().map(|item| item.at)
    }

    /// 尚未执行的事件，按执行顺序排列。
    pub fn event_queue(&self) -> Vec<&Event> {
        let mut items: Vec<&ScheduledEvent> = self.q.iter().collect();
        items.sort_by(|a, b| b.cmp(a));
        items.into_iter().map(|item| &item.event).collect()
    }

    /// 调度事件在其自身时间执行
    #[tracing::instrument(skip(self, event), fields(schedule_at = ?event.time()))]
    pub fn schedule(&mut self, event: Event) -> EventId {
        let id = EventId(self.next_id);
        trace!(now = ?self.now, seq = id.0, "调度事件");

        if event.time() < self.now {
            warn!(now = ?self.now, seq = id.0, "事件时间早于当前时钟，将在当前时刻执行");
        }

        self.next_id = self.next_id.wrapping_add(1);
        self.q.push(ScheduledEvent::new(id, event));

        debug!(queue_size = self.q.len(), "事件已加入队列");
        id
    }

    /// 在当前时间之后 `delay` 调度一个事件。
    pub fn timeout<F>(&mut self, delay: SimTime, context: Context, action: F) -> EventId
    where
        F: FnMut(&mut EventScheduler) -> ActionResult + 'static,
    {
        let at = self.now.saturating_add(delay);
        self.schedule(Event::new(at, context, action))
    }

    /// 撤销一个尚未执行的事件。
    pub fn cancel(&mut self, id: EventId) -> Option<Event> {
        let mut items = std::mem::take(&mut self.q).into_vec();
        let removed = items
            .iter()
            .position(|item| item.id == id)
            .map(|idx| items.swap_remove(idx).event);
        self.q = BinaryHeap::from(items);
        if removed.is_some() {
            debug!(seq = id.0, queue_size = self.q.len(), "事件已撤销");
        }
        removed
    }

    /// 撤销所有满足条件的事件，按原执行顺序返回。
    pub fn cancel_all_if<P>(&mut self, mut pred: P) -> Vec<Event>
    where
        P: FnMut(&Event) -> bool,
    {
        let (mut removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.q)
            .into_vec()
            .into_iter()
            .partition(|item| pred(&item.event));
        self.q = BinaryHeap::from(kept);
        removed.sort_by(|a, b| b.cmp(a));
        debug!(
            cancelled = removed.len(),
            queue_size = self.q.len(),
            "批量撤销事件"
        );
        removed.into_iter().map(|item| item.event).collect()
    }

    /// 激活所有满足条件的事件，返回匹配数。
    pub fn activate_all_if<P>(&mut self, pred: P) -> usize
    where
        P: FnMut(&Event) -> bool,
    {
        self.set_active_if(pred, true)
    }

    /// 停用所有满足条件的事件，返回匹配数。
    pub fn deactivate_all_if<P>(&mut self, pred: P) -> usize
    where
        P: FnMut(&Event) -> bool,
    {
        self.set_active_if(pred, false)
    }

    fn set_active_if<P>(&mut self, mut pred: P, active: bool) -> usize
    where
        P: FnMut(&Event) -> bool,
    {
        // 激活标志不参与排序，重建堆不会改变执行顺序。
        let mut items = std::mem::take(&mut self.q).into_vec();
        let mut matched = 0;
        for item in items.iter_mut().filter(|item| pred(&item.event)) {
            if active {
                item.event.activate();
            } else {
                item.event.deactivate();
            }
            matched += 1;
        }
        self.q = BinaryHeap::from(items);
        matched
    }

    /// 执行队首事件，不受任何时间边界限制。
    ///
    /// 返回被执行的事件；队列为空或该事件未激活时返回 `None`。
    pub fn step(&mut self) -> Result<Option<Event>, SchedulerError> {
        self.ensure_idle()?;
        match self.q.pop() {
            Some(item) => self.fire(item),
            None => Ok(None),
        }
    }

    /// 运行直到队首事件晚于 `max_time` 或队列为空，随后把时钟设为 `max_time`。
    ///
    /// 返回通过日志策略的已执行事件（按执行顺序）。动作失败时立即返回错误：
    /// 失败事件已出队，时钟停在它的时间，其余事件保持原样。
    #[tracing::instrument(skip(self, logging))]
    pub fn run_until_max_time(
        &mut self,
        max_time: SimTime,
        logging: impl Into<LogPolicy>,
    ) -> Result<Vec<Event>, SchedulerError> {
        self.ensure_idle()?;
        if max_time < self.now {
            return Err(SchedulerError::TimeReversal {
                now: self.now,
                max_time,
            });
        }

        let policy = logging.into();
        info!("▶️  开始运行仿真");
        debug!(now = ?self.now, queue_size = self.q.len(), ?policy, "初始状态");

        let log = self.drain_while(&policy, |sched| {
            sched.next_event_time().is_some_and(|at| at <= max_time)
        })?;
        self.now = max_time;

        info!(
            logged = log.len(),
            remaining_queue = self.q.len(),
            final_time = ?self.now,
            "✅ 仿真推进完成"
        );
        Ok(log)
    }

    /// 运行直到队列为空或 `stop` 返回 true（每次出队前检查）。不改动结束时的时钟。
    pub fn run<S>(
        &mut self,
        mut stop: S,
        logging: impl Into<LogPolicy>,
    ) -> Result<Vec<Event>, SchedulerError>
    where
        S: FnMut(&EventScheduler) -> bool,
    {
        self.ensure_idle()?;
        let policy = logging.into();
        self.drain_while(&policy, |sched| !sched.is_empty() && !stop(sched))
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, logging))]
    pub fn run_until_empty(
        &mut self,
        logging: impl Into<LogPolicy>,
    ) -> Result<Vec<Event>, SchedulerError> {
        self.ensure_idle()?;
        info!("▶️  开始运行仿真");
        let before = self.executed;
        let log = self.run(|_| false, logging)?;
        info!(
            total_events = self.executed - before,
            final_time = ?self.now,
            "✅ 仿真完成"
        );
        Ok(log)
    }

    fn drain_while<C>(&mut self, policy: &LogPolicy, mut cond: C) -> Result<Vec<Event>, SchedulerError>
    where
        C: FnMut(&Self) -> bool,
    {
        let mut log = Vec::new();
        while cond(&*self) {
            let Some(item) = self.q.pop() else {
                break;
            };
            if let Some(event) = self.fire(item)? {
                if policy.includes(&event) {
                    log.push(event);
                }
            }
        }
        Ok(log)
    }

    fn fire(&mut self, item: ScheduledEvent) -> Result<Option<Event>, SchedulerError> {
        let ScheduledEvent { at, id, mut event } = item;
        // 出队和推进时钟都发生在动作之前。
        self.now = self.now.max(at);

        if !event.is_active() {
            trace!(now = ?self.now, seq = id.0, "跳过未激活事件");
            return Ok(None);
        }

        self.executed += 1;
        debug!(
            event_num = self.executed,
            now = ?self.now,
            scheduled_at = ?at,
            seq = id.0,
            remaining_queue = self.q.len(),
            "执行事件"
        );

        let time = self.now;
        self.running = true;
        let result = event.fire(self);
        self.running = false;
        result.map_err(|source| SchedulerError::Action { time, id, source })?;
        Ok(Some(event))
    }

    fn ensure_idle(&self) -> Result<(), SchedulerError> {
        if self.running {
            warn!(now = ?self.now, "动作内部不能再次驱动运行循环");
            return Err(SchedulerError::Reentrant { now: self.now });
        }
        Ok(())
    }
}
