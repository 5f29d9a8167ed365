//! ReportPortal Repository Implementation
//!
//! ReportingRepositoryのReportPortal実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use std::path::{Path, PathBuf};

use crate::adapter::reportportal::client::ReportPortalClient;
use crate::adapter::reportportal::models::{
    FinishExecutionRq, ItemAttributeRq, LogFileRq, SaveLogRq, StartLaunchRq, StartTestItemRq,
    TestItemRs, TimestampRs, ITEM_TYPE_STEP, ITEM_TYPE_SUITE, LAUNCH_MODE_DEFAULT,
};
use crate::domain::entities::launch::{Attribute, Launch};
use crate::domain::entities::launch_summary::LaunchItem;
use crate::domain::entities::log_event::{LogLevel, LogMessage};
use crate::domain::entities::test_result::ItemStatus;
use crate::domain::repositories::reporting_repository::{ItemStart, ReportingRepository};

/// 添付ファイルのMIMEタイプ（拡張子から推定）
pub fn mime_type_for(path: &Path) -> &'static str {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if name.ends_with(".tar.gz") || name.ends_with(".tgz") || name.ends_with(".gz") {
        "application/gzip"
    } else if name.ends_with(".zip") {
        "application/zip"
    } else if name.ends_with(".err") || name.ends_with(".log") || name.ends_with(".txt") {
        "text/plain"
    } else if name.ends_with(".json") {
        "application/json"
    } else if name.ends_with(".xml") {
        "application/xml"
    } else {
        "application/octet-stream"
    }
}

fn attributes_rq(attributes: &[Attribute]) -> Vec<ItemAttributeRq> {
    attributes
        .iter()
        .map(|a| ItemAttributeRq {
            key: a.key.clone(),
            value: a.value.clone(),
        })
        .collect()
}

fn to_launch_item(item: TestItemRs) -> LaunchItem {
    let executions = item.statistics.executions;
    LaunchItem {
        id: item.id,
        name: item.name,
        status: item.status,
        total: executions.total,
        passed: executions.passed,
        failed: executions.failed,
        skipped: executions.skipped,
        start_time: item.start_time.as_ref().and_then(TimestampRs::to_millis),
        end_time: item.end_time.as_ref().and_then(TimestampRs::to_millis),
    }
}

/// ReportPortalベースのレポートリポジトリ
pub struct ReportPortalRepository {
    client: ReportPortalClient,
}

impl ReportPortalRepository {
    pub fn new(client: ReportPortalClient) -> Self {
        Self { client }
    }

    fn start_item_rq(&self, launch_id: &str, item: &ItemStart, item_type: &str) -> StartTestItemRq {
        StartTestItemRq {
            name: item.name.clone(),
            description: item.description.clone(),
            start_time: item.start_time.timestamp_millis(),
            item_type: item_type.to_string(),
            launch_uuid: launch_id.to_string(),
            attributes: attributes_rq(&item.attributes),
        }
    }

    fn read_file(path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).with_context(|| format!("Failed to read attachment {}", path.display()))
    }
}

#[async_trait]
impl ReportingRepository for ReportPortalRepository {
    async fn start_launch(&self, launch: &Launch) -> Result<String> {
        let rq = StartLaunchRq {
            name: launch.name.clone(),
            description: launch.description.clone(),
            start_time: launch.start_time.timestamp_millis(),
            mode: LAUNCH_MODE_DEFAULT.to_string(),
            attributes: attributes_rq(&launch.attributes),
        };

        Ok(self.client.start_launch(&rq).await?)
    }

    async fn finish_launch(&self, launch_id: &str, finish_time: DateTime<Utc>) -> Result<()> {
        let rq = FinishExecutionRq {
            end_time: finish_time.timestamp_millis(),
            status: None,
            launch_uuid: None,
        };

        Ok(self.client.finish_launch(launch_id, &rq).await?)
    }

    async fn start_suite(&self, launch_id: &str, item: &ItemStart) -> Result<String> {
        let rq = self.start_item_rq(launch_id, item, ITEM_TYPE_SUITE);
        Ok(self.client.start_item(None, &rq).await?)
    }

    async fn start_test_case(
        &self,
        launch_id: &str,
        parent_id: &str,
        item: &ItemStart,
    ) -> Result<String> {
        let rq = self.start_item_rq(launch_id, item, ITEM_TYPE_STEP);
        Ok(self.client.start_item(Some(parent_id), &rq).await?)
    }

    async fn finish_item(
        &self,
        launch_id: &str,
        item_id: &str,
        status: ItemStatus,
        finish_time: DateTime<Utc>,
    ) -> Result<()> {
        let rq = FinishExecutionRq {
            end_time: finish_time.timestamp_millis(),
            status: Some(status.as_str().to_string()),
            launch_uuid: Some(launch_id.to_string()),
        };

        Ok(self.client.finish_item(item_id, &rq).await?)
    }

    async fn log_message(
        &self,
        launch_id: &str,
        item_id: &str,
        message: &LogMessage,
    ) -> Result<()> {
        let rq = SaveLogRq {
            launch_uuid: launch_id.to_string(),
            item_uuid: item_id.to_string(),
            time: message.time.timestamp_millis(),
            message: message.message.clone(),
            level: message.level.as_str().to_string(),
            file: None,
        };

        Ok(self.client.save_log(&rq).await?)
    }

    async fn attach_file(&self, launch_id: &str, item_id: &str, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("Attachment path has no file name: {}", path.display()))?;

        let owned: PathBuf = path.to_path_buf();
        let content = tokio::task::spawn_blocking(move || Self::read_file(&owned))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        debug!("Uploading {} ({} bytes)", file_name, content.len());

        let rq = SaveLogRq {
            launch_uuid: launch_id.to_string(),
            item_uuid: item_id.to_string(),
            time: Utc::now().timestamp_millis(),
            message: file_name.clone(),
            level: LogLevel::Info.as_str().to_string(),
            file: Some(LogFileRq {
                name: file_name.clone(),
            }),
        };

        Ok(self
            .client
            .save_log_with_file(&rq, &file_name, content, mime_type_for(path))
            .await?)
    }

    async fn get_launch_items(&self, launch_id: u64) -> Result<Vec<LaunchItem>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let response = self.client.get_launch_items_page(launch_id, page).await?;
            let total_pages = response.page.total_pages;

            items.extend(response.content.into_iter().map(to_launch_item));

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        debug!("Fetched {} items of launch {}", items.len(), launch_id);
        Ok(items)
    }
}
