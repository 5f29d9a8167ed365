//! # LaunchItem / LaunchSummary
//!
//! 既存ローンチのトップレベルアイテムと、その正規化された要約

use serde::{Deserialize, Serialize};

/// ローンチ内のスイート（レベル1アイテム）の統計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchItem {
    pub id: u64,
    pub name: String,
    /// "PASSED", "FAILED", "IN_PROGRESS" など、サービスが返した値そのまま
    pub status: String,
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    /// エポックミリ秒
    pub start_time: Option<i64>,
    /// エポックミリ秒
    pub end_time: Option<i64>,
}

impl LaunchItem {
    pub const IN_PROGRESS: &'static str = "IN_PROGRESS";

    pub fn is_in_progress(&self) -> bool {
        self.status == Self::IN_PROGRESS
    }

    /// 開始・終了の両方がある場合のみ実行時間を返す
    pub fn execution_time(&self) -> Option<i64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// クエリモードの出力レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSummary {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    #[serde(rename = "executionTime", skip_serializing_if = "Option::is_none", default)]
    pub execution_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
}
