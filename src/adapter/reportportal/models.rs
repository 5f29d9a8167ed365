//! ReportPortal API v1 request/response models
//!
//! 時刻は全てエポックミリ秒

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const LAUNCH_MODE_DEFAULT: &str = "DEFAULT";
pub const ITEM_TYPE_SUITE: &str = "SUITE";
pub const ITEM_TYPE_STEP: &str = "STEP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemAttributeRq {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartLaunchRq {
    pub name: String,
    pub description: String,
    pub start_time: i64,
    pub mode: String,
    pub attributes: Vec<ItemAttributeRq>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTestItemRq {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: i64,
    #[serde(rename = "type")]
    pub item_type: String,
    pub launch_uuid: String,
    pub attributes: Vec<ItemAttributeRq>,
}

/// ローンチ／アイテムの終了リクエスト
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishExecutionRq {
    pub end_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_uuid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogFileRq {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLogRq {
    pub launch_uuid: String,
    pub item_uuid: String,
    pub time: i64,
    pub message: String,
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<LogFileRq>,
}

/// 作成系エンドポイントの応答
#[derive(Debug, Clone, Deserialize)]
pub struct EntryCreatedRs {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadataRs {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemsPageRs {
    #[serde(default)]
    pub content: Vec<TestItemRs>,
    #[serde(default)]
    pub page: PageMetadataRs,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutionsRs {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub passed: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub skipped: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticsRs {
    #[serde(default)]
    pub executions: ExecutionsRs,
}

/// エポックミリ秒（数値、数値文字列、またはRFC 3339文字列）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimestampRs {
    Millis(i64),
    Text(String),
}

impl TimestampRs {
    pub fn to_millis(&self) -> Option<i64> {
        match self {
            TimestampRs::Millis(ms) => Some(*ms),
            TimestampRs::Text(text) => text.parse::<i64>().ok().or_else(|| {
                DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc).timestamp_millis())
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestItemRs {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub statistics: StatisticsRs,
    pub start_time: Option<TimestampRs>,
    pub end_time: Option<TimestampRs>,
}
