//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::post_process::PostProcessor;
use crate::adapter::reportportal::client::ReportPortalClient;
use crate::adapter::repositories::file_payload_repository::FilePayloadRepository;
use crate::adapter::repositories::reportportal_repository::ReportPortalRepository;
use crate::application::dto::query_config::QueryConfig;
use crate::application::dto::upload_config::{default_workers, UploadConfig};
use crate::application::retry::RetryPolicy;
use crate::application::use_cases::discover_results::DiscoverResultsUseCase;
use crate::application::use_cases::get_launch_details::{
    default_retry_policy, GetLaunchDetailsUseCase,
};
use crate::application::use_cases::upload_results::{UploadResultsUseCase, UploadSummary};
use crate::domain::entities::launch_summary::LaunchSummary;
use crate::domain::repositories::payload_repository::{PayloadError, PayloadRepository};
use crate::domain::repositories::reporting_repository::ReportingRepository;
use crate::domain::services::payload_layout::PayloadLayout;
use crate::domain::services::property_filter::PropertyFilter;

use super::cli::{Args, Mode};

/// ディープリンクのベースURLを指定する環境変数
pub const RP_HOST_URL_ENV: &str = "RP_HOST_URL";

/// Exit code when the payload has no `results/` directory
pub const EXIT_MISSING_RESULTS: u8 = 1;

/// CIのパイプラインが読み取る行（形式を変えないこと）
pub fn launch_id_line(launch_id: &str) -> String {
    format!("launch id: {}", launch_id)
}

/// 要約をJSON（インデント4）に変換
pub fn render_summaries(summaries: &[LaunchSummary]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    summaries
        .serialize(&mut serializer)
        .context("Failed to serialize launch summary")?;

    String::from_utf8(buf).context("Launch summary is not valid UTF-8")
}

/// ReportPortal Upload Workflow
pub struct ReportPortalWorkflow {
    config: Config,
    reporting_repository: Arc<dyn ReportingRepository>,
    payload_repository: Arc<dyn PayloadRepository>,
    link_host: Option<String>,
    retry_policy: RetryPolicy,
}

impl ReportPortalWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Result<Self> {
        let rp = &config.reportportal;
        let client = ReportPortalClient::new(&rp.host_url, &rp.project, &rp.api_token)
            .context("Failed to create ReportPortal client")?;

        let reporting_repository: Arc<dyn ReportingRepository> =
            Arc::new(ReportPortalRepository::new(client));
        let payload_repository: Arc<dyn PayloadRepository> = Arc::new(FilePayloadRepository::new());

        Ok(Self::with_repositories(config, reporting_repository, payload_repository)
            .with_link_host(std::env::var(RP_HOST_URL_ENV).ok()))
    }

    /// リポジトリを外部から注入して作成（ディープリンクなし）
    pub fn with_repositories(
        config: Config,
        reporting_repository: Arc<dyn ReportingRepository>,
        payload_repository: Arc<dyn PayloadRepository>,
    ) -> Self {
        Self {
            config,
            reporting_repository,
            payload_repository,
            link_host: None,
            retry_policy: default_retry_policy(),
        }
    }

    pub fn with_link_host(mut self, link_host: Option<String>) -> Self {
        self.link_host = link_host.filter(|h| !h.is_empty());
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Execute the selected mode
    pub async fn execute(&self, args: Args) -> Result<ExitCode> {
        match args.mode()? {
            Mode::Upload {
                payload_dir,
                workers,
            } => self.upload(&payload_dir, workers).await,
            Mode::Query { launch_id, output } => {
                self.query(launch_id, output.as_deref()).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    /// 結果ディレクトリをアップロード
    ///
    /// # Returns
    ///
    /// `results/` が無い場合は終了コード1、それ以外は0（ファイル単位の失敗は
    /// 標準エラーに出力される）
    pub async fn upload(&self, payload_dir: &Path, workers: Option<usize>) -> Result<ExitCode> {
        match self.upload_results(payload_dir, workers).await {
            Ok(summary) => {
                self.report(&summary);

                PostProcessor::new(self.config.reportportal.post_process_command.clone())
                    .run(&summary.launch_id)
                    .await;

                Ok(ExitCode::SUCCESS)
            }
            Err(e) => match e.downcast_ref::<PayloadError>() {
                Some(PayloadError::MissingResultsDir(_)) => {
                    eprintln!("ERROR: {}", e);
                    Ok(ExitCode::from(EXIT_MISSING_RESULTS))
                }
                None => Err(e),
            },
        }
    }

    /// アップロードを実行してサマリーを返す
    pub async fn upload_results(
        &self,
        payload_dir: &Path,
        workers: Option<usize>,
    ) -> Result<UploadSummary> {
        let rp = &self.config.reportportal;
        info!("Starting ReportPortal uploader...");
        info!(
            "auto_dashboard={}, merge_launches={}, simple_xml={} (single launch run)",
            rp.auto_dashboard, rp.merge_launches, rp.simple_xml
        );

        let expanded = shellexpand::tilde(&payload_dir.to_string_lossy()).into_owned();
        let layout = PayloadLayout::new(PathBuf::from(expanded));

        let discover_use_case = DiscoverResultsUseCase::new(self.payload_repository.clone());
        let result_files = discover_use_case.execute(&layout).await?;
        println!(
            "✓ Found {} xunit files in {}",
            result_files.len(),
            layout.results_dir().display()
        );

        let upload_config = UploadConfig::new(
            layout.root().to_path_buf(),
            rp.launch.name.clone(),
            rp.launch.description.clone(),
            rp.launch_attributes(),
            PropertyFilter::new(&rp.property_filter)?,
            workers.unwrap_or_else(default_workers),
        );

        let upload_use_case = UploadResultsUseCase::new(
            self.reporting_repository.clone(),
            self.payload_repository.clone(),
        );

        upload_use_case.execute(result_files, &upload_config).await
    }

    fn report(&self, summary: &UploadSummary) {
        println!("{}", launch_id_line(&summary.launch_id));

        info!("Launch UUID: {}", summary.launch_id);

        println!(
            "✓ Reported {} suites, {} testcases ({} logs, {} attachments)",
            summary.suites_reported,
            summary.test_cases_reported,
            summary.log_messages_sent,
            summary.attachments_sent
        );

        for failed in &summary.failed_files {
            eprintln!("✗ {}: {}", failed.path.display(), failed.error);
        }
    }

    /// 既存ローンチの要約を取得（`output` が指定されればJSONを書き出す）
    pub async fn query(&self, launch_id: u64, output: Option<&Path>) -> Result<Vec<LaunchSummary>> {
        let query_config = QueryConfig::new(
            self.config.reportportal.project.clone(),
            self.link_host.clone(),
        );
        let use_case =
            GetLaunchDetailsUseCase::with_policy(self.reporting_repository.clone(), self.retry_policy);

        let summaries = use_case.execute(launch_id, &query_config).await?;
        let json = render_summaries(&summaries)?;
        info!("Launch {} details:\n{}", launch_id, json);

        if let Some(path) = output {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Wrote {} launch items to {}", summaries.len(), path.display());
        }

        Ok(summaries)
    }
}
