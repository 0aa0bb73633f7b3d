use super::error::ScenarioError;
use super::spec::{RepeatSpec, ScenarioSpec};
use crate::sim::{Action, ActionResult, Context, Event, EventScheduler, SimTime};
use serde::{Deserialize, Serialize};
use tracing::info;

/// 执行日志中的一条记录（JSON）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    /// 事件时间（和 `SimTime.0` 同口径）
    pub t: u64,
    pub context: Context,
}

impl From<&Event> for EventRecord {
    fn from(ev: &Event) -> Self {
        Self {
            t: ev.time().0,
            context: ev.context().clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub final_time: u64,
    /// 实际执行的动作数（不受日志策略影响）
    pub executed: u64,
    /// 结束时仍在队列中的事件数
    pub pending: usize,
    pub logged: Vec<EventRecord>,
}

/// 按场景调度全部事件并运行到 `max_time`（可被覆盖）。
pub fn run_scenario(
    spec: &ScenarioSpec,
    max_time_override: Option<u64>,
) -> Result<ScenarioReport, ScenarioError> {
    spec.validate()?;
    let max = max_time_override.unwrap_or(spec.max_time);
    let start_at = spec.start_time.unwrap_or(0);
    if start_at > max {
        return Err(ScenarioError::StartAfterMaxTime {
            start: start_at,
            max,
        });
    }
    let max_time = SimTime(max);
    let start = SimTime(start_at);
    info!(
        name = spec.meta.as_ref().and_then(|m| m.name.as_deref()),
        events = spec.events.len(),
        ?start,
        ?max_time,
        "加载场景"
    );

    let mut sched = EventScheduler::with_start_time(start);
    for ev in &spec.events {
        let action = scenario_action(ev.context.clone(), ev.repeat, ev.fail.clone());
        let mut event = Event::new(SimTime(ev.time), ev.context.clone(), action);
        if ev.active == Some(false) {
            event.deactivate();
        }
        sched.schedule(event);
    }

    let logged = sched.run_until_max_time(max_time, spec.logging.to_policy())?;

    Ok(ScenarioReport {
        final_time: sched.current_time().0,
        executed: sched.executed_count(),
        pending: sched.len(),
        logged: logged.iter().map(EventRecord::from).collect(),
    })
}

// 重复事件在动作内部调度下一次执行，剩余次数随之递减。
fn scenario_action(context: Context, repeat: Option<RepeatSpec>, fail: Option<String>) -> Action {
    Box::new(move |sched: &mut EventScheduler| -> ActionResult {
        if let Some(msg) = &fail {
            return Err(msg.clone().into());
        }
        if let Some(r) = repeat.filter(|r| r.count > 0) {
            let next = RepeatSpec {
                every: r.every,
                count: r.count - 1,
            };
            sched.timeout(
                SimTime(r.every),
                context.clone(),
                scenario_action(context.clone(), Some(next), None),
            );
        }
        Ok(())
    })
}
