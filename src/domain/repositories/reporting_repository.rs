//! # Reporting Repository Trait
//!
//! リモートのレポートサービス（ローンチ／スイート／テストケース／ログ）を抽象化

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::launch::{Attribute, Launch};
use crate::domain::entities::launch_summary::LaunchItem;
use crate::domain::entities::log_event::LogMessage;
use crate::domain::entities::test_result::ItemStatus;

/// スイート／テストケース開始時の情報
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStart {
    pub name: String,
    pub description: Option<String>,
    pub attributes: Vec<Attribute>,
    pub start_time: DateTime<Utc>,
}

/// レポートリポジトリ
///
/// 複数のタスクから同時に呼ばれるため `Send + Sync` を要求する
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReportingRepository: Send + Sync {
    /// ローンチを開始し、割り当てられたIDを返す
    async fn start_launch(&self, launch: &Launch) -> Result<String>;

    /// ローンチを終了する
    async fn finish_launch(&self, launch_id: &str, finish_time: DateTime<Utc>) -> Result<()>;

    /// ルートのスイートアイテムを開始し、アイテムIDを返す
    async fn start_suite(&self, launch_id: &str, item: &ItemStart) -> Result<String>;

    /// スイート配下のテストケースを開始し、アイテムIDを返す
    async fn start_test_case(
        &self,
        launch_id: &str,
        parent_id: &str,
        item: &ItemStart,
    ) -> Result<String>;

    /// スイートまたはテストケースを終了する
    async fn finish_item(
        &self,
        launch_id: &str,
        item_id: &str,
        status: ItemStatus,
        finish_time: DateTime<Utc>,
    ) -> Result<()>;

    /// アイテムにログメッセージを追加する
    async fn log_message(&self, launch_id: &str, item_id: &str, message: &LogMessage)
        -> Result<()>;

    /// アイテムにファイルを添付する
    async fn attach_file(&self, launch_id: &str, item_id: &str, path: &Path) -> Result<()>;

    /// 既存ローンチのトップレベルアイテムの統計を取得する
    async fn get_launch_items(&self, launch_id: u64) -> Result<Vec<LaunchItem>>;
}
