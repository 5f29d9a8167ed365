//! # Discover Results Use Case
//!
//! xUnit結果ファイル発見ユースケース

use anyhow::Result;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::repositories::payload_repository::PayloadRepository;
use crate::domain::services::payload_layout::PayloadLayout;

/// 結果ファイル発見ユースケース
///
/// ペイロードディレクトリの `results/` からxUnitファイルを発見する
pub struct DiscoverResultsUseCase<P: PayloadRepository + ?Sized> {
    payload_repository: Arc<P>,
}

impl<P: PayloadRepository + ?Sized> DiscoverResultsUseCase<P> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `payload_repository` - ペイロードリポジトリ
    pub fn new(payload_repository: Arc<P>) -> Self {
        Self { payload_repository }
    }

    /// 結果ファイルを発見する
    ///
    /// # Arguments
    ///
    /// * `layout` - ペイロードディレクトリの構成
    ///
    /// # Returns
    ///
    /// 発見されたxUnitファイルのパスのリスト
    ///
    /// # Errors
    ///
    /// `results/` が存在しない場合に `PayloadError::MissingResultsDir` を返す
    pub async fn execute(&self, layout: &PayloadLayout) -> Result<Vec<PathBuf>> {
        let files = self
            .payload_repository
            .discover_result_files(&layout.results_dir())
            .await?;

        info!(
            "Found {} result files in {}",
            files.len(),
            layout.results_dir().display()
        );

        Ok(files)
    }
}
