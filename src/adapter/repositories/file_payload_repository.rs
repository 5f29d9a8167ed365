//! File Payload Repository Implementation
//!
//! PayloadRepositoryのファイルシステム実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::adapter::xunit::parse_xunit;
use crate::domain::entities::test_result::TestSuite;
use crate::domain::repositories::payload_repository::{PayloadError, PayloadRepository};

/// ファイルシステムベースのペイロードリポジトリ
pub struct FilePayloadRepository;

impl FilePayloadRepository {
    pub fn new() -> Self {
        Self
    }

    /// `results/` 直下の `*.xml` をファイル名順に返す
    fn discover_result_files_internal(results_dir: &Path) -> Result<Vec<PathBuf>> {
        if !results_dir.is_dir() {
            return Err(PayloadError::MissingResultsDir(results_dir.to_path_buf()).into());
        }

        let mut result_files = Vec::new();

        for entry in WalkDir::new(results_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry
                .with_context(|| format!("Failed to read directory {}", results_dir.display()))?;
            let path = entry.path();

            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("xml") {
                result_files.push(path.to_path_buf());
            } else {
                debug!("Ignoring {}", path.display());
            }
        }

        info!(
            "Found {} xunit files in {}",
            result_files.len(),
            results_dir.display()
        );

        Ok(result_files)
    }

    fn load_result_file_internal(path: &Path) -> Result<Vec<TestSuite>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read xunit file: {}", path.display()))?;

        let suite_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .with_context(|| format!("Invalid xunit file name: {}", path.display()))?;

        parse_xunit(&content, &suite_name)
            .with_context(|| format!("Failed to parse xunit file: {}", path.display()))
    }

    fn read_error_log_internal(path: &Path) -> Result<Option<String>> {
        match fs::read(path) {
            // Logs may contain non-UTF-8 bytes from remote consoles
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read error log: {}", path.display()))
            }
        }
    }
}

impl Default for FilePayloadRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PayloadRepository for FilePayloadRepository {
    async fn discover_result_files(&self, results_dir: &Path) -> Result<Vec<PathBuf>> {
        let results_dir = results_dir.to_path_buf();
        tokio::task::spawn_blocking(move || Self::discover_result_files_internal(&results_dir))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn load_result_file(&self, path: &Path) -> Result<Vec<TestSuite>> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::load_result_file_internal(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn read_error_log(&self, path: &Path) -> Result<Option<String>> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::read_error_log_internal(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn attachment_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }
}
