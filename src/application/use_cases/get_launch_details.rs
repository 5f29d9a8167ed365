//! # Get Launch Details Use Case
//!
//! 既存ローンチのスイート統計を取得して要約するユースケース
//!
//! 統計は最終的整合なので、`IN_PROGRESS` のアイテムが残っている間は
//! `RetryPolicy` に従って取得をやり直す。

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use thiserror::Error;

use crate::application::dto::query_config::QueryConfig;
use crate::application::retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS};
use crate::domain::entities::launch_summary::{LaunchItem, LaunchSummary};
use crate::domain::repositories::reporting_repository::ReportingRepository;
use crate::domain::services::launch_summary::LaunchSummaryService;

#[derive(Debug, Error)]
pub enum LaunchDetailsError {
    #[error("Launch item '{name}' is still in progress")]
    InProgress { name: String },
}

/// Retry predicate: only "still in progress" is worth waiting for
pub fn is_in_progress_error(error: &anyhow::Error) -> bool {
    error
        .chain()
        .any(|cause| cause.downcast_ref::<LaunchDetailsError>().is_some())
}

/// 既定のリトライポリシー（3回、120秒間隔）
pub fn default_retry_policy() -> RetryPolicy {
    RetryPolicy::new(
        DEFAULT_MAX_ATTEMPTS,
        Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        is_in_progress_error,
    )
}

/// ローンチ詳細取得ユースケース
pub struct GetLaunchDetailsUseCase<R: ReportingRepository + ?Sized> {
    reporting_repository: Arc<R>,
    retry_policy: RetryPolicy,
}

impl<R: ReportingRepository + ?Sized> GetLaunchDetailsUseCase<R> {
    pub fn new(reporting_repository: Arc<R>) -> Self {
        Self::with_policy(reporting_repository, default_retry_policy())
    }

    pub fn with_policy(reporting_repository: Arc<R>, retry_policy: RetryPolicy) -> Self {
        Self {
            reporting_repository,
            retry_policy,
        }
    }

    /// アイテムを1回取得し、`IN_PROGRESS` が残っていればリトライ対象のエラーにする
    async fn fetch_finished_items(&self, launch_id: u64, attempt: u32) -> Result<Vec<LaunchItem>> {
        info!("Fetching launch {} details (attempt {})", launch_id, attempt);

        let items = self
            .reporting_repository
            .get_launch_items(launch_id)
            .await
            .with_context(|| format!("Failed to fetch items of launch {}", launch_id))?;

        if let Some(item) = items.iter().find(|item| item.is_in_progress()) {
            return Err(LaunchDetailsError::InProgress {
                name: item.name.clone(),
            }
            .into());
        }

        Ok(items)
    }

    /// ローンチの要約を取得
    ///
    /// # Arguments
    ///
    /// * `launch_id` - ローンチの数値ID
    /// * `config` - プロジェクト名とディープリンクのベースURL
    ///
    /// # Returns
    ///
    /// レベル1アイテムごとの要約（開始時刻順）
    ///
    /// # Errors
    ///
    /// 取得に失敗した場合、またはリトライを使い切ってもアイテムが
    /// `IN_PROGRESS` のままの場合にエラーを返す
    pub async fn execute(&self, launch_id: u64, config: &QueryConfig) -> Result<Vec<LaunchSummary>> {
        let items = self
            .retry_policy
            .run(|attempt| self.fetch_finished_items(launch_id, attempt))
            .await?;

        info!("Launch {} has {} items", launch_id, items.len());

        Ok(items
            .iter()
            .map(|item| LaunchSummaryService::summarize(item, launch_id, config.link_base()))
            .collect())
    }
}
