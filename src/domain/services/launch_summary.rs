//! # Launch Summary Service
//!
//! ローンチアイテムの統計から出力用の要約を作る

use crate::domain::entities::launch_summary::{LaunchItem, LaunchSummary};

/// 要約作成サービス
pub struct LaunchSummaryService;

impl LaunchSummaryService {
    /// ReportPortal UI へのディープリンク
    ///
    /// `{host}/ui/#{project}/launches/all/{launch_id}/{item_id}`
    pub fn item_url(host_url: &str, project: &str, launch_id: u64, item_id: u64) -> String {
        format!(
            "{}/ui/#{}/launches/all/{}/{}",
            host_url.trim_end_matches('/'),
            project,
            launch_id,
            item_id
        )
    }

    /// アイテム1件を要約に変換
    ///
    /// `link_base` は `(host_url, project)`。指定された場合のみ `url` を付与する
    pub fn summarize(
        item: &LaunchItem,
        launch_id: u64,
        link_base: Option<(&str, &str)>,
    ) -> LaunchSummary {
        LaunchSummary {
            id: item.id,
            name: item.name.clone(),
            status: item.status.clone(),
            total: item.total,
            passed: item.passed,
            failed: item.failed,
            skipped: item.skipped,
            execution_time: item.execution_time(),
            url: link_base
                .map(|(host, project)| Self::item_url(host, project, launch_id, item.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> LaunchItem {
        LaunchItem {
            id: 157579,
            name: "tier-2_cephfs_test-volume-management".to_string(),
            status: "PASSED".to_string(),
            total: 26,
            passed: 26,
            failed: 0,
            skipped: 0,
            start_time: Some(1_647_497_784_000),
            end_time: Some(1_647_497_784_616),
        }
    }

    #[test]
    fn test_item_url_trims_trailing_slash() {
        assert_eq!(
            LaunchSummaryService::item_url("https://rp.example.com/", "cephci", 6288, 157579),
            "https://rp.example.com/ui/#cephci/launches/all/6288/157579"
        );
    }

    #[test]
    fn test_summarize_with_link() {
        let summary =
            LaunchSummaryService::summarize(&item(), 6288, Some(("https://rp.example.com", "cephci")));

        assert_eq!(summary.id, 157579);
        assert_eq!(summary.total, 26);
        assert_eq!(summary.passed, 26);
        assert_eq!(summary.execution_time, Some(616));
        assert_eq!(
            summary.url.as_deref(),
            Some("https://rp.example.com/ui/#cephci/launches/all/6288/157579")
        );
    }

    #[test]
    fn test_summarize_without_link_or_times() {
        let mut it = item();
        it.end_time = None;

        let summary = LaunchSummaryService::summarize(&it, 6288, None);

        assert!(summary.url.is_none());
        assert!(summary.execution_time.is_none());
    }
}
