use crate::scenario::{LoggingSpec, RepeatSpec, ScenarioError, ScenarioSpec};
use serde_json::json;

#[test]
fn scenario_spec_parses_minimal_json_with_defaults() {
    let raw = r#"
    {
        "schema_version": 1,
        "max_time": 100
    }
    "#;
    let spec = ScenarioSpec::from_json(raw).expect("parse scenario");
    assert_eq!(spec.schema_version, 1);
    assert_eq!(spec.max_time, 100);
    assert!(spec.meta.is_none());
    assert!(spec.start_time.is_none());
    assert_eq!(spec.logging, LoggingSpec::All);
    assert!(spec.events.is_empty());
}

#[test]
fn scenario_spec_parses_events_and_match_logging() {
    let raw = r#"
    {
        "schema_version": 1,
        "meta": { "name": "bank" },
        "start_time": 2,
        "max_time": 50,
        "logging": { "mode": "match", "key": "type", "value": "important" },
        "events": [
            { "time": 5, "context": { "type": "important", "teller": 1 } },
            { "time": 10, "repeat": { "every": 3, "count": 2 }, "active": false },
            { "time": 12, "fail": "teller crashed" }
        ]
    }
    "#;
    let spec = ScenarioSpec::from_json(raw).expect("parse scenario");
    assert_eq!(
        spec.meta.as_ref().and_then(|m| m.name.as_deref()),
        Some("bank")
    );
    assert_eq!(spec.start_time, Some(2));
    assert_eq!(
        spec.logging,
        LoggingSpec::Match {
            key: "type".to_string(),
            value: json!("important"),
        }
    );
    assert_eq!(spec.events.len(), 3);
    assert_eq!(spec.events[0].context.get("teller"), Some(&json!(1)));
    assert_eq!(
        spec.events[1].repeat,
        Some(RepeatSpec { every: 3, count: 2 })
    );
    assert_eq!(spec.events[1].active, Some(false));
    assert!(spec.events[1].context.is_empty());
    assert_eq!(spec.events[2].fail.as_deref(), Some("teller crashed"));
}

#[test]
fn logging_mode_none_parses_snake_case() {
    let decoded: LoggingSpec = serde_json::from_str(r#"{ "mode": "none" }"#).expect("parse");
    assert_eq!(decoded, LoggingSpec::None);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let err = ScenarioSpec::from_json(r#"{ "schema_version": 2, "max_time": 1 }"#)
        .expect_err("schema 2 is unknown");
    assert!(matches!(err, ScenarioError::UnsupportedSchema(2)));
}

#[test]
fn zero_repeat_interval_is_rejected() {
    let raw = r#"
    {
        "schema_version": 1,
        "max_time": 10,
        "events": [ { "time": 1 }, { "time": 2, "repeat": { "every": 0, "count": 3 } } ]
    }
    "#;
    let err = ScenarioSpec::from_json(raw).expect_err("every=0 never advances");
    assert!(matches!(err, ScenarioError::InvalidRepeat { index: 1 }));
}

#[test]
fn start_after_max_time_is_rejected() {
    let err = ScenarioSpec::from_json(r#"{ "schema_version": 1, "start_time": 9, "max_time": 3 }"#)
        .expect_err("start beyond boundary");
    assert!(matches!(
        err,
        ScenarioError::StartAfterMaxTime { start: 9, max: 3 }
    ));
}

#[test]
fn malformed_json_reports_parse_error() {
    let err = ScenarioSpec::from_json("{ not json").expect_err("garbage input");
    assert!(matches!(err, ScenarioError::Parse(_)));
}

#[test]
fn missing_file_reports_io_error_with_path() {
    let path = std::path::Path::new("/definitely/not/here/scenario.json");
    let err = ScenarioSpec::load(path).expect_err("file does not exist");
    assert!(err.to_string().contains("scenario.json"), "{err}");
    assert!(matches!(err, ScenarioError::Io { .. }));
}
