//! # Query Configuration DTO
//!
//! ローンチ詳細取得の設定

/// ローンチ詳細取得の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// ReportPortalプロジェクト名（ディープリンクに使う）
    pub project: String,
    /// ディープリンクのベースURL（`RP_HOST_URL`）
    pub link_host: Option<String>,
}

impl QueryConfig {
    pub fn new(project: String, link_host: Option<String>) -> Self {
        Self { project, link_host }
    }

    /// `(host_url, project)` の組（リンクを作る場合のみ）
    pub fn link_base(&self) -> Option<(&str, &str)> {
        self.link_host
            .as_deref()
            .filter(|h| !h.is_empty())
            .map(|h| (h, self.project.as_str()))
    }
}
