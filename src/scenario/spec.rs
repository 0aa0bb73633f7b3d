use super::error::ScenarioError;
use crate::sim::{Context, LogPolicy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub meta: Option<ScenarioMeta>,
    #[serde(default)]
    pub start_time: Option<u64>,
    pub max_time: u64,
    #[serde(default)]
    pub logging: LoggingSpec,
    #[serde(default)]
    pub events: Vec<EventSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// 执行日志的筛选方式
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LoggingSpec {
    #[default]
    All,
    None,
    /// 只记录 `context[key] == value` 的事件
    Match { key: String, value: Value },
}

impl LoggingSpec {
    pub fn to_policy(&self) -> LogPolicy {
        match self {
            LoggingSpec::All => LogPolicy::All,
            LoggingSpec::None => LogPolicy::Nothing,
            LoggingSpec::Match { key, value } => {
                let key = key.clone();
                let value = value.clone();
                LogPolicy::filter(move |ev| ev.context().get(&key) == Some(&value))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSpec {
    pub time: u64,
    #[serde(default)]
    pub context: Context,
    /// 首次执行后再重复 `count` 次，每次间隔 `every`。
    #[serde(default)]
    pub repeat: Option<RepeatSpec>,
    /// 动作以该消息失败（用于演练错误传播）。
    #[serde(default)]
    pub fail: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepeatSpec {
    pub every: u64,
    pub count: u32,
}

impl ScenarioSpec {
    pub fn from_json(raw: &str) -> Result<Self, ScenarioError> {
        let spec: ScenarioSpec = serde_json::from_str(raw)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ScenarioError::UnsupportedSchema(self.schema_version));
        }
        let start = self.start_time.unwrap_or(0);
        if start > self.max_time {
            return Err(ScenarioError::StartAfterMaxTime {
                start,
                max: self.max_time,
            });
        }
        if let Some(index) = self
            .events
            .iter()
            .position(|ev| ev.repeat.is_some_and(|r| r.every == 0))
        {
            return Err(ScenarioError::InvalidRepeat { index });
        }
        Ok(())
    }
}
