use crate::scenario::{EventRecord, ScenarioError, ScenarioSpec, run_scenario};
use crate::sim::SchedulerError;
use serde_json::json;

fn spec(raw: &str) -> ScenarioSpec {
    ScenarioSpec::from_json(raw).expect("parse scenario")
}

#[test]
fn scenario_runs_to_max_time_and_reports_pending() {
    let s = spec(
        r#"
        {
            "schema_version": 1,
            "max_time": 7,
            "events": [ { "time": 10 }, { "time": 5, "context": { "n": 1 } } ]
        }
        "#,
    );
    let report = run_scenario(&s, None).expect("run scenario");
    assert_eq!(report.final_time, 7);
    assert_eq!(report.executed, 1);
    assert_eq!(report.pending, 1);
    assert_eq!(
        report.logged,
        vec![EventRecord {
            t: 5,
            context: [("n".to_string(), json!(1))].into_iter().collect(),
        }]
    );
}

#[test]
fn repeating_event_reschedules_itself_from_its_action() {
    let s = spec(
        r#"
        {
            "schema_version": 1,
            "max_time": 100,
            "events": [ { "time": 10, "context": { "type": "tick" }, "repeat": { "every": 5, "count": 3 } } ]
        }
        "#,
    );
    let report = run_scenario(&s, None).expect("run scenario");
    let ts: Vec<u64> = report.logged.iter().map(|r| r.t).collect();
    assert_eq!(ts, vec![10, 15, 20, 25]);
    assert!(report.logged.iter().all(|r| r.context.get("type") == Some(&json!("tick"))));
    assert_eq!(report.executed, 4);
    assert_eq!(report.pending, 0);
}

#[test]
fn match_logging_keeps_only_matching_events() {
    let s = spec(
        r#"
        {
            "schema_version": 1,
            "max_time": 15,
            "logging": { "mode": "match", "key": "type", "value": "important" },
            "events": [
                { "time": 5, "context": { "type": "important" } },
                { "time": 10, "context": { "type": "normal" } }
            ]
        }
        "#,
    );
    let report = run_scenario(&s, None).expect("run scenario");
    assert_eq!(report.executed, 2);
    assert_eq!(report.logged.len(), 1);
    assert_eq!(report.logged[0].t, 5);
}

#[test]
fn inactive_and_unlogged_events() {
    let s = spec(
        r#"
        {
            "schema_version": 1,
            "max_time": 15,
            "logging": { "mode": "none" },
            "events": [ { "time": 5, "active": false }, { "time": 10 } ]
        }
        "#,
    );
    let report = run_scenario(&s, None).expect("run scenario");
    assert_eq!(report.executed, 1);
    assert!(report.logged.is_empty());
    assert_eq!(report.final_time, 15);
}

#[test]
fn failing_event_surfaces_as_scheduler_error() {
    let s = spec(
        r#"
        {
            "schema_version": 1,
            "max_time": 20,
            "events": [ { "time": 5, "fail": "boom" }, { "time": 8 } ]
        }
        "#,
    );
    let err = run_scenario(&s, None).expect_err("fail must propagate");
    match err {
        ScenarioError::Scheduler(SchedulerError::Action { time, source, .. }) => {
            assert_eq!(time.0, 5);
            assert_eq!(source.to_string(), "boom");
        }
        other => panic!("expected action failure, got {other:?}"),
    }
}

#[test]
fn max_time_override_replaces_scenario_boundary() {
    let s = spec(
        r#"
        {
            "schema_version": 1,
            "max_time": 100,
            "events": [ { "time": 5 }, { "time": 50 } ]
        }
        "#,
    );
    let report = run_scenario(&s, Some(20)).expect("run scenario");
    assert_eq!(report.final_time, 20);
    assert_eq!(report.executed, 1);
    assert_eq!(report.pending, 1);

    let err = run_scenario(
        &spec(r#"{ "schema_version": 1, "start_time": 30, "max_time": 40 }"#),
        Some(10),
    )
    .expect_err("override before start");
    assert!(matches!(
        err,
        ScenarioError::StartAfterMaxTime { start: 30, max: 10 }
    ));
}

#[test]
fn report_serializes_to_json() {
    let s = spec(
        r#"{ "schema_version": 1, "max_time": 3, "events": [ { "time": 1, "context": { "k": "v" } } ] }"#,
    );
    let report = run_scenario(&s, None).expect("run scenario");
    let v = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(v["final_time"], json!(3));
    assert_eq!(v["logged"][0], json!({ "t": 1, "context": { "k": "v" } }));
}
