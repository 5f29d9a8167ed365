//! # Upload Results Use Case
//!
//! xUnit結果をローンチ／スイート／テストケースの階層としてアップロードするユースケース
//!
//! 1. ローンチを1つ開始
//! 2. 結果ファイルごとにタスクを作り、上限付きの並列度で処理
//! 3. 全ファイルの処理後にローンチを終了
//!
//! 1ファイルの失敗（壊れたXML、リモート呼び出しの失敗）は記録され、他のファイルの
//! 処理とローンチの終了は継続される。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, error, info};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::application::dto::upload_config::UploadConfig;
use crate::application::retry::error_chain_to_string;
use crate::domain::entities::launch::Launch;
use crate::domain::entities::test_result::{ItemStatus, TestCase, TestSuite};
use crate::domain::repositories::payload_repository::PayloadRepository;
use crate::domain::repositories::reporting_repository::{ItemStart, ReportingRepository};
use crate::domain::services::log_event_parser::LogEventParser;
use crate::domain::services::payload_layout::PayloadLayout;
use crate::domain::services::property_filter::PropertyFilter;

/// 処理に失敗した結果ファイル
#[derive(Debug, Clone)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// アップロード結果のサマリー
#[derive(Debug, Clone)]
pub struct UploadSummary {
    /// 作成されたローンチのID
    pub launch_id: String,
    /// 正常に処理された結果ファイルの数
    pub files_processed: usize,
    pub suites_reported: usize,
    pub test_cases_reported: usize,
    pub log_messages_sent: usize,
    pub attachments_sent: usize,
    /// 処理に失敗した結果ファイル（パス順）
    pub failed_files: Vec<FailedFile>,
}

impl UploadSummary {
    fn new(launch_id: String) -> Self {
        Self {
            launch_id,
            files_processed: 0,
            suites_reported: 0,
            test_cases_reported: 0,
            log_messages_sent: 0,
            attachments_sent: 0,
            failed_files: Vec::new(),
        }
    }

    fn add(&mut self, report: FileReport) {
        self.files_processed += 1;
        self.suites_reported += report.suites;
        self.test_cases_reported += report.test_cases;
        self.log_messages_sent += report.log_messages;
        self.attachments_sent += report.attachments;
    }

    pub fn is_complete(&self) -> bool {
        self.failed_files.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct FileReport {
    suites: usize,
    test_cases: usize,
    log_messages: usize,
    attachments: usize,
}

impl FileReport {
    fn merge(&mut self, other: FileReport) {
        self.suites += other.suites;
        self.test_cases += other.test_cases;
        self.log_messages += other.log_messages;
        self.attachments += other.attachments;
    }
}

/// 結果アップロードユースケース
pub struct UploadResultsUseCase<R: ReportingRepository + ?Sized, P: PayloadRepository + ?Sized> {
    reporting_repository: Arc<R>,
    payload_repository: Arc<P>,
}

impl<R, P> UploadResultsUseCase<R, P>
where
    R: ReportingRepository + ?Sized + 'static,
    P: PayloadRepository + ?Sized + 'static,
{
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `reporting_repository` - レポートリポジトリ（全タスクで共有）
    /// * `payload_repository` - ペイロードリポジトリ
    pub fn new(reporting_repository: Arc<R>, payload_repository: Arc<P>) -> Self {
        Self {
            reporting_repository,
            payload_repository,
        }
    }

    /// ローンチを作成して結果ファイルをアップロード
    ///
    /// # Arguments
    ///
    /// * `result_files` - xUnitファイルのパスのリスト
    /// * `config` - アップロード設定
    ///
    /// # Returns
    ///
    /// アップロード結果のサマリー（失敗したファイルを含む）
    ///
    /// # Errors
    ///
    /// ローンチの開始または終了に失敗した場合にエラーを返す
    pub async fn execute(
        &self,
        result_files: Vec<PathBuf>,
        config: &UploadConfig,
    ) -> Result<UploadSummary> {
        let mut launch = Launch::new(
            config.launch_name.clone(),
            config.launch_description.clone(),
            config.launch_attributes.clone(),
            Utc::now(),
        )?;

        let launch_id = self
            .reporting_repository
            .start_launch(&launch)
            .await
            .context("Failed to start launch")?;
        launch.mark_started(launch_id.clone());
        info!("Started launch '{}' ({})", launch.name, launch_id);

        let processor = Arc::new(ResultFileProcessor {
            reporting_repository: self.reporting_repository.clone(),
            payload_repository: self.payload_repository.clone(),
            layout: PayloadLayout::new(&config.payload_dir),
            property_filter: config.property_filter.clone(),
            launch_id: launch_id.clone(),
        });

        info!(
            "Processing {} xunit files concurrently ({} workers)",
            result_files.len(),
            config.max_workers
        );

        let semaphore = Arc::new(Semaphore::new(config.max_workers));
        let mut tasks = JoinSet::new();

        for path in result_files {
            let processor = processor.clone();
            let semaphore = semaphore.clone();

            tasks.spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => processor.process_file(&path).await,
                    Err(e) => Err(anyhow::Error::new(e).context("Worker pool closed")),
                };
                (path, outcome)
            });
        }

        let mut summary = UploadSummary::new(launch_id.clone());

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((path, Ok(report))) => {
                    debug!("Finished {}", path.display());
                    summary.add(report);
                }
                Ok((path, Err(e))) => {
                    let message = error_chain_to_string(&e);
                    error!("Failed to process {}: {}", path.display(), message);
                    summary.failed_files.push(FailedFile {
                        path,
                        error: message,
                    });
                }
                Err(join_error) => {
                    error!("Result file task aborted: {}", join_error);
                    summary.failed_files.push(FailedFile {
                        path: PathBuf::new(),
                        error: join_error.to_string(),
                    });
                }
            }
        }

        summary.failed_files.sort_by(|a, b| a.path.cmp(&b.path));

        let finish_time = Utc::now();
        self.reporting_repository
            .finish_launch(&launch_id, finish_time)
            .await
            .context("Failed to finish launch")?;
        launch.mark_finished(finish_time);

        info!(
            "Finished launch {}: {} suites, {} testcases, {} logs, {} attachments ({} files failed)",
            launch_id,
            summary.suites_reported,
            summary.test_cases_reported,
            summary.log_messages_sent,
            summary.attachments_sent,
            summary.failed_files.len()
        );

        Ok(summary)
    }
}

/// 1つの結果ファイルを処理するワーカー
///
/// 各タスクはスイート／テストケースの部分木を専有する
struct ResultFileProcessor<R: ?Sized, P: ?Sized> {
    reporting_repository: Arc<R>,
    payload_repository: Arc<P>,
    layout: PayloadLayout,
    property_filter: PropertyFilter,
    launch_id: String,
}

impl<R, P> ResultFileProcessor<R, P>
where
    R: ReportingRepository + ?Sized,
    P: PayloadRepository + ?Sized,
{
    async fn process_file(&self, path: &Path) -> Result<FileReport> {
        info!("Processing {}", path.display());

        let suites = self
            .payload_repository
            .load_result_file(path)
            .await
            .with_context(|| format!("Failed to load result file {}", path.display()))?;

        info!(
            "Processing {} testsuite(s) from {}",
            suites.len(),
            path.display()
        );

        let mut report = FileReport::default();
        for suite in &suites {
            if suite.is_empty() {
                info!(
                    "Found empty test suite Name: {}. Skipping this test suite",
                    suite.title.as_deref().unwrap_or(&suite.name)
                );
                continue;
            }

            report.merge(self.process_suite(suite).await?);
        }

        Ok(report)
    }

    async fn process_suite(&self, suite: &TestSuite) -> Result<FileReport> {
        let start = ItemStart {
            name: suite.name.clone(),
            description: suite.title.clone(),
            attributes: self.property_filter.attributes(&suite.properties),
            start_time: Utc::now(),
        };

        let suite_id = self
            .reporting_repository
            .start_suite(&self.launch_id, &start)
            .await
            .with_context(|| format!("Failed to start suite {}", suite.name))?;

        let outcome = self.report_suite_contents(suite, &suite_id).await;

        // The suite is finished even when its contents failed so the launch
        // does not keep a dangling IN_PROGRESS item.
        let status = if outcome.is_ok() {
            suite.status()
        } else {
            ItemStatus::Failed
        };
        self.reporting_repository
            .finish_item(&self.launch_id, &suite_id, status, Utc::now())
            .await
            .with_context(|| format!("Failed to finish suite {}", suite.name))?;

        let mut report = outcome?;
        report.suites += 1;
        Ok(report)
    }

    async fn report_suite_contents(&self, suite: &TestSuite, suite_id: &str) -> Result<FileReport> {
        let mut report = FileReport::default();

        for test_case in &suite.test_cases {
            if !test_case.is_reportable() {
                info!(
                    "Skipping testcase because name is empty (suite {})",
                    suite.name
                );
                continue;
            }
            report.merge(self.process_test_case(suite, suite_id, test_case).await?);
        }

        let bundle = self.layout.suite_bundle(&suite.name);
        if self.payload_repository.attachment_exists(&bundle).await {
            self.reporting_repository
                .attach_file(&self.launch_id, suite_id, &bundle)
                .await
                .with_context(|| format!("Failed to attach {}", bundle.display()))?;
            info!("Attached {} to suite {}", bundle.display(), suite.name);
            report.attachments += 1;
        } else {
            debug!("No suite bundle at {}", bundle.display());
        }

        Ok(report)
    }

    async fn process_test_case(
        &self,
        suite: &TestSuite,
        suite_id: &str,
        test_case: &TestCase,
    ) -> Result<FileReport> {
        let start = ItemStart {
            name: test_case.name.clone(),
            description: test_case.failure_message.clone(),
            attributes: Vec::new(),
            start_time: Utc::now(),
        };

        let item_id = self
            .reporting_repository
            .start_test_case(&self.launch_id, suite_id, &start)
            .await
            .with_context(|| format!("Failed to start testcase {}", test_case.name))?;

        let outcome = if test_case.is_failed() {
            self.send_error_logs(suite, &item_id, test_case).await
        } else {
            Ok(0)
        };

        // Closed before the log error propagates so the case is not left IN_PROGRESS.
        let status = if outcome.is_ok() {
            test_case.status
        } else {
            ItemStatus::Failed
        };
        self.reporting_repository
            .finish_item(&self.launch_id, &item_id, status, Utc::now())
            .await
            .with_context(|| format!("Failed to finish testcase {}", test_case.name))?;

        Ok(FileReport {
            test_cases: 1,
            log_messages: outcome?,
            ..FileReport::default()
        })
    }

    /// 失敗したテストケースの `.err` を読み、各イベントをERRORログとして送信する
    ///
    /// 送信したログの件数を返す。`.err` が無い場合は0件。
    async fn send_error_logs(
        &self,
        suite: &TestSuite,
        item_id: &str,
        test_case: &TestCase,
    ) -> Result<usize> {
        let log_path = self.layout.test_case_log(&suite.name, &test_case.name);

        let Some(content) = self.payload_repository.read_error_log(&log_path).await? else {
            debug!("No error log at {}", log_path.display());
            return Ok(0);
        };

        let events = LogEventParser::parse(&content);
        debug!("{} log events in {}", events.len(), log_path.display());

        for event in &events {
            self.reporting_repository
                .log_message(&self.launch_id, item_id, &event.to_error_message())
                .await
                .with_context(|| format!("Failed to send log for testcase {}", test_case.name))?;
        }

        Ok(events.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};

    use crate::domain::entities::launch::Attribute;
    use crate::domain::repositories::reporting_repository::MockReportingRepository;

    const ERR_LOG: &str = "\
2022-03-17 06:16:24,500 - cephci - ceph:1 - ERROR - first
2022-03-17 06:16:25,500 - cephci - ceph:2 - ERROR - second
  at frame 1
";

    #[derive(Default)]
    struct InMemoryPayloadRepository {
        files: HashMap<PathBuf, std::result::Result<Vec<TestSuite>, String>>,
        logs: HashMap<PathBuf, String>,
        attachments: HashSet<PathBuf>,
    }

    #[async_trait]
    impl PayloadRepository for InMemoryPayloadRepository {
        async fn discover_result_files(&self, _results_dir: &Path) -> Result<Vec<PathBuf>> {
            Ok(self.files.keys().cloned().collect())
        }

        async fn load_result_file(&self, path: &Path) -> Result<Vec<TestSuite>> {
            match self.files.get(path) {
                Some(Ok(suites)) => Ok(suites.clone()),
                Some(Err(message)) => anyhow::bail!("{}", message),
                None => anyhow::bail!("no such file"),
            }
        }

        async fn read_error_log(&self, path: &Path) -> Result<Option<String>> {
            Ok(self.logs.get(path).cloned())
        }

        async fn attachment_exists(&self, path: &Path) -> bool {
            self.attachments.contains(path)
        }
    }

    fn suite(name: &str, cases: &[(&str, ItemStatus)]) -> TestSuite {
        let mut suite = TestSuite::new(name);
        suite.title = Some(format!("{} title", name));
        suite.properties = vec![("tier".to_string(), "tier-0".to_string())];
        for (case_name, status) in cases {
            suite.test_cases.push(TestCase::new(*case_name, *status));
        }
        suite
    }

    fn config() -> UploadConfig {
        UploadConfig::new(
            PathBuf::from("/payload"),
            "RHCEPH-4.3 - tier-0".to_string(),
            "nightly".to_string(),
            vec![Attribute::new("rhcs", "4.3")],
            PropertyFilter::new(&[".*".to_string()]).unwrap(),
            4,
        )
    }

    fn expect_launch(mock: &mut MockReportingRepository) {
        mock.expect_start_launch()
            .times(1)
            .returning(|_| Ok("launch-1".to_string()));
        mock.expect_finish_launch()
            .withf(|id, _| id == "launch-1")
            .times(1)
            .returning(|_, _| Ok(()));
    }

    #[tokio::test]
    async fn test_upload_counts_suites_and_cases() {
        let mut payload = InMemoryPayloadRepository::default();
        payload.files.insert(
            PathBuf::from("/payload/results/a.xml"),
            Ok(vec![suite(
                "a",
                &[
                    ("install", ItemStatus::Passed),
                    ("", ItemStatus::Failed),
                    ("upgrade", ItemStatus::Skipped),
                ],
            )]),
        );
        payload.files.insert(
            PathBuf::from("/payload/results/b.xml"),
            Ok(vec![
                suite("b", &[("rados bench", ItemStatus::Passed)]),
                suite("b", &[]),
            ]),
        );

        let mut mock = MockReportingRepository::new();
        expect_launch(&mut mock);
        mock.expect_start_suite()
            .times(2)
            .returning(|_, item| Ok(format!("suite-{}", item.name)));
        mock.expect_start_test_case()
            .times(3)
            .returning(|_, _, item| Ok(format!("case-{}", item.name)));
        mock.expect_finish_item()
            .times(5)
            .returning(|_, _, _, _| Ok(()));
        mock.expect_log_message().never();
        mock.expect_attach_file().never();

        let use_case = UploadResultsUseCase::new(Arc::new(mock), Arc::new(payload));
        let files = vec![
            PathBuf::from("/payload/results/a.xml"),
            PathBuf::from("/payload/results/b.xml"),
        ];

        let summary = use_case.execute(files, &config()).await.unwrap();

        assert_eq!(summary.launch_id, "launch-1");
        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.suites_reported, 2);
        assert_eq!(summary.test_cases_reported, 3);
        assert!(summary.is_complete());
    }

    #[tokio::test]
    async fn test_failed_case_gets_logs_and_suite_gets_bundle() {
        let mut payload = InMemoryPayloadRepository::default();
        payload.files.insert(
            PathBuf::from("/payload/results/rados.xml"),
            Ok(vec![suite(
                "rados",
                &[
                    ("osd add", ItemStatus::Passed),
                    ("osd remove", ItemStatus::Failed),
                ],
            )]),
        );
        payload.logs.insert(
            PathBuf::from("/payload/attachments/rados/osd_remove_0.err"),
            ERR_LOG.to_string(),
        );
        payload
            .attachments
            .insert(PathBuf::from("/payload/attachments/rados/rados.tar.gz"));

        let mut mock = MockReportingRepository::new();
        expect_launch(&mut mock);
        mock.expect_start_suite()
            .withf(|launch_id, item| {
                launch_id == "launch-1"
                    && item.name == "rados"
                    && item.description.as_deref() == Some("rados title")
                    && item.attributes == vec![Attribute::new("tier", "tier-0")]
            })
            .times(1)
            .returning(|_, _| Ok("suite-1".to_string()));
        mock.expect_start_test_case()
            .withf(|_, parent, _| parent == "suite-1")
            .times(2)
            .returning(|_, _, item| Ok(format!("case-{}", item.name)));
        mock.expect_log_message()
            .withf(|_, item_id, message| {
                item_id == "case-osd remove" && message.level.as_str() == "ERROR"
            })
            .times(2)
            .returning(|_, _, _| Ok(()));
        mock.expect_attach_file()
            .withf(|_, item_id, path| {
                item_id == "suite-1"
                    && path == Path::new("/payload/attachments/rados/rados.tar.gz")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        mock.expect_finish_item()
            .withf(|_, item_id, status, _| item_id != "suite-1" || *status == ItemStatus::Failed)
            .times(3)
            .returning(|_, _, _, _| Ok(()));

        let use_case = UploadResultsUseCase::new(Arc::new(mock), Arc::new(payload));

        let summary = use_case
            .execute(vec![PathBuf::from("/payload/results/rados.xml")], &config())
            .await
            .unwrap();

        assert_eq!(summary.log_messages_sent, 2);
        assert_eq!(summary.attachments_sent, 1);
    }

    #[tokio::test]
    async fn test_passed_case_logs_are_not_sent() {
        let mut payload = InMemoryPayloadRepository::default();
        payload.files.insert(
            PathBuf::from("/payload/results/rbd.xml"),
            Ok(vec![suite("rbd", &[("mirror", ItemStatus::Passed)])]),
        );
        payload.logs.insert(
            PathBuf::from("/payload/attachments/rbd/mirror_0.err"),
            ERR_LOG.to_string(),
        );

        let mut mock = MockReportingRepository::new();
        expect_launch(&mut mock);
        mock.expect_start_suite()
            .returning(|_, _| Ok("suite-1".to_string()));
        mock.expect_start_test_case()
            .returning(|_, _, _| Ok("case-1".to_string()));
        mock.expect_finish_item().returning(|_, _, _, _| Ok(()));
        mock.expect_log_message().never();

        let use_case = UploadResultsUseCase::new(Arc::new(mock), Arc::new(payload));
        let summary = use_case
            .execute(vec![PathBuf::from("/payload/results/rbd.xml")], &config())
            .await
            .unwrap();

        assert_eq!(summary.log_messages_sent, 0);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_isolated() {
        let mut payload = InMemoryPayloadRepository::default();
        payload.files.insert(
            PathBuf::from("/payload/results/broken.xml"),
            Err("unexpected end of XML".to_string()),
        );
        payload.files.insert(
            PathBuf::from("/payload/results/good.xml"),
            Ok(vec![suite("good", &[("smoke", ItemStatus::Passed)])]),
        );

        let mut mock = MockReportingRepository::new();
        expect_launch(&mut mock);
        mock.expect_start_suite()
            .times(1)
            .returning(|_, _| Ok("suite-1".to_string()));
        mock.expect_start_test_case()
            .times(1)
            .returning(|_, _, _| Ok("case-1".to_string()));
        mock.expect_finish_item()
            .times(2)
            .returning(|_, _, _, _| Ok(()));

        let use_case = UploadResultsUseCase::new(Arc::new(mock), Arc::new(payload));
        let files = vec![
            PathBuf::from("/payload/results/broken.xml"),
            PathBuf::from("/payload/results/good.xml"),
        ];

        let summary = use_case.execute(files, &config()).await.unwrap();

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.suites_reported, 1);
        assert_eq!(summary.failed_files.len(), 1);
        assert_eq!(
            summary.failed_files[0].path,
            PathBuf::from("/payload/results/broken.xml")
        );
        assert!(summary.failed_files[0]
            .error
            .contains("unexpected end of XML"));
        assert!(!summary.is_complete());
    }

    #[tokio::test]
    async fn test_suite_finished_when_case_fails_remotely() {
        let mut payload = InMemoryPayloadRepository::default();
        payload.files.insert(
            PathBuf::from("/payload/results/x.xml"),
            Ok(vec![suite("x", &[("boom", ItemStatus::Passed)])]),
        );

        let mut mock = MockReportingRepository::new();
        expect_launch(&mut mock);
        mock.expect_start_suite()
            .returning(|_, _| Ok("suite-1".to_string()));
        mock.expect_start_test_case()
            .returning(|_, _, _| Err(anyhow::anyhow!("500 Internal Server Error")));
        mock.expect_finish_item()
            .withf(|_, item_id, status, _| item_id == "suite-1" && *status == ItemStatus::Failed)
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let use_case = UploadResultsUseCase::new(Arc::new(mock), Arc::new(payload));
        let summary = use_case
            .execute(vec![PathBuf::from("/payload/results/x.xml")], &config())
            .await
            .unwrap();

        assert_eq!(summary.failed_files.len(), 1);
        assert!(summary.failed_files[0].error.contains("500"));
    }

    #[tokio::test]
    async fn test_case_finished_when_log_upload_fails() {
        let mut payload = InMemoryPayloadRepository::default();
        payload.files.insert(
            PathBuf::from("/payload/results/rados.xml"),
            Ok(vec![suite("rados", &[("osd remove", ItemStatus::Failed)])]),
        );
        payload.logs.insert(
            PathBuf::from("/payload/attachments/rados/osd_remove_0.err"),
            ERR_LOG.to_string(),
        );

        let mut mock = MockReportingRepository::new();
        expect_launch(&mut mock);
        mock.expect_start_suite()
            .returning(|_, _| Ok("suite-1".to_string()));
        mock.expect_start_test_case()
            .returning(|_, _, _| Ok("case-1".to_string()));
        mock.expect_log_message()
            .times(1)
            .returning(|_, _, _| Err(anyhow::anyhow!("413 Payload Too Large")));
        mock.expect_finish_item()
            .withf(|_, item_id, status, _| item_id == "case-1" && *status == ItemStatus::Failed)
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        mock.expect_finish_item()
            .withf(|_, item_id, status, _| item_id == "suite-1" && *status == ItemStatus::Failed)
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let use_case = UploadResultsUseCase::new(Arc::new(mock), Arc::new(payload));
        let summary = use_case
            .execute(vec![PathBuf::from("/payload/results/rados.xml")], &config())
            .await
            .unwrap();

        assert_eq!(summary.failed_files.len(), 1);
        assert!(summary.failed_files[0].error.contains("413"));
        assert_eq!(summary.log_messages_sent, 0);
    }

    #[tokio::test]
    async fn test_start_launch_failure_aborts() {
        let payload = InMemoryPayloadRepository::default();

        let mut mock = MockReportingRepository::new();
        mock.expect_start_launch()
            .returning(|_| Err(anyhow::anyhow!("401 Unauthorized")));
        mock.expect_finish_launch().never();

        let use_case = UploadResultsUseCase::new(Arc::new(mock), Arc::new(payload));
        let result = use_case.execute(vec![], &config()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_no_files_still_creates_and_finishes_launch() {
        let payload = InMemoryPayloadRepository::default();

        let mut mock = MockReportingRepository::new();
        expect_launch(&mut mock);
        mock.expect_start_suite().never();

        let use_case = UploadResultsUseCase::new(Arc::new(mock), Arc::new(payload));
        let summary = use_case.execute(vec![], &config()).await.unwrap();

        assert_eq!(summary.files_processed, 0);
        assert!(summary.is_complete());
    }
}
