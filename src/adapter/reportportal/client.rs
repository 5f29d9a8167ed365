//! ReportPortal HTTP Client
//!
//! ReportPortal API v1 への薄いHTTPクライアント。ステータスコードの解釈は
//! このモジュールだけで行う。

use std::time::Duration;

use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::models::{
    EntryCreatedRs, FinishExecutionRq, ItemsPageRs, SaveLogRq, StartLaunchRq, StartTestItemRq,
};

/// 1ページあたりのアイテム数
pub const PAGE_SIZE: u32 = 50;

const REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ReportPortalError {
    #[error("ReportPortal returned {status} for {endpoint}: {body}")]
    Http {
        status: u16,
        endpoint: String,
        body: String,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },
}

pub type ReportPortalResult<T> = std::result::Result<T, ReportPortalError>;

/// ReportPortal API v1 クライアント
#[derive(Debug, Clone)]
pub struct ReportPortalClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl ReportPortalClient {
    /// 新しいクライアントを作成
    ///
    /// # Arguments
    ///
    /// * `host_url` - ReportPortalのURL（末尾の `/` は無視）
    /// * `project` - プロジェクト名
    /// * `api_token` - Bearerトークン
    pub fn new(host_url: &str, project: &str, api_token: &str) -> ReportPortalResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/api/v1/{}", host_url.trim_end_matches('/'), project),
            api_token: api_token.to_string(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// ローンチを開始してUUIDを返す
    pub async fn start_launch(&self, rq: &StartLaunchRq) -> ReportPortalResult<String> {
        let url = self.endpoint("launch");
        let created: EntryCreatedRs = self.send_json(self.client.post(&url).json(rq), &url).await?;
        Ok(created.id)
    }

    pub async fn finish_launch(
        &self,
        launch_uuid: &str,
        rq: &FinishExecutionRq,
    ) -> ReportPortalResult<()> {
        let url = self.endpoint(&format!("launch/{}/finish", launch_uuid));
        self.send(self.client.put(&url).json(rq), &url).await?;
        Ok(())
    }

    /// アイテムを開始してUUIDを返す（`parent_uuid` が無ければルートアイテム）
    pub async fn start_item(
        &self,
        parent_uuid: Option<&str>,
        rq: &StartTestItemRq,
    ) -> ReportPortalResult<String> {
        let url = match parent_uuid {
            Some(parent) => self.endpoint(&format!("item/{}", parent)),
            None => self.endpoint("item"),
        };
        let created: EntryCreatedRs = self.send_json(self.client.post(&url).json(rq), &url).await?;
        Ok(created.id)
    }

    pub async fn finish_item(
        &self,
        item_uuid: &str,
        rq: &FinishExecutionRq,
    ) -> ReportPortalResult<()> {
        let url = self.endpoint(&format!("item/{}", item_uuid));
        self.send(self.client.put(&url).json(rq), &url).await?;
        Ok(())
    }

    pub async fn save_log(&self, rq: &SaveLogRq) -> ReportPortalResult<()> {
        let url = self.endpoint("log");
        self.send(self.client.post(&url).json(rq), &url).await?;
        Ok(())
    }

    /// ファイル付きのログを送信（multipart）
    ///
    /// `json_request_part` にはリクエストの配列、`file` にはファイル本体を入れる。
    /// `rq.file.name` はファイル名と一致している必要がある。
    pub async fn save_log_with_file(
        &self,
        rq: &SaveLogRq,
        file_name: &str,
        content: Vec<u8>,
        mime_type: &str,
    ) -> ReportPortalResult<()> {
        let url = self.endpoint("log");

        let json = serde_json::to_vec(&[rq]).map_err(|e| ReportPortalError::InvalidResponse {
            endpoint: url.clone(),
            message: format!("failed to encode log request: {}", e),
        })?;

        let form = Form::new()
            .part(
                "json_request_part",
                Part::bytes(json).mime_str("application/json")?,
            )
            .part(
                "file",
                Part::bytes(content)
                    .file_name(file_name.to_string())
                    .mime_str(mime_type)?,
            );

        self.send(self.client.post(&url).multipart(form), &url).await?;
        Ok(())
    }

    /// ローンチのレベル1アイテムを1ページ取得（ページ番号は1始まり）
    pub async fn get_launch_items_page(
        &self,
        launch_id: u64,
        page: u32,
    ) -> ReportPortalResult<ItemsPageRs> {
        let url = self.endpoint("item/v2");
        let query = [
            ("filter.level.path", "1".to_string()),
            ("page.page", page.to_string()),
            ("page.size", PAGE_SIZE.to_string()),
            ("page.sort", "startTime,ASC".to_string()),
            ("providerType", "launch".to_string()),
            ("launchId", launch_id.to_string()),
        ];

        self.send_json(self.client.get(&url).query(&query), &url)
            .await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> ReportPortalResult<T> {
        let body = self.send(request, endpoint).await?;

        serde_json::from_str(&body).map_err(|e| ReportPortalError::InvalidResponse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    /// リクエストを送信し、2xxなら本文を返す
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> ReportPortalResult<String> {
        let response = request
            .header(AUTHORIZATION, format!("Bearer {}", self.api_token))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("{} -> {}", endpoint, status);

        if !status.is_success() {
            return Err(ReportPortalError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                body,
            });
        }

        Ok(body)
    }
}
