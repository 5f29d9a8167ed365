//! # Payload Repository Trait
//!
//! ペイロードディレクトリ（結果ファイルと添付ファイル）へのアクセスを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::entities::test_result::TestSuite;

/// ペイロード関連のエラー
#[derive(Debug, Error)]
pub enum PayloadError {
    /// `results/` ディレクトリが存在しない（アップロードは中断される）
    #[error("The payload directory path {} does not exist", .0.display())]
    MissingResultsDir(PathBuf),
}

/// ペイロードリポジトリ
///
/// xUnitファイルの発見とパース、添付ファイルの参照を担当するリポジトリ
#[async_trait]
pub trait PayloadRepository: Send + Sync {
    /// 結果ファイル（`*.xml`）を発見する
    ///
    /// # Errors
    ///
    /// ディレクトリが存在しない場合は [`PayloadError::MissingResultsDir`] を返す
    async fn discover_result_files(&self, results_dir: &Path) -> Result<Vec<PathBuf>>;

    /// xUnitファイルをパースしてスイートのリストを返す
    ///
    /// スイート名はファイル名（拡張子なし）になる
    async fn load_result_file(&self, path: &Path) -> Result<Vec<TestSuite>>;

    /// テストケースのエラーログを読み込む（存在しなければ `None`）
    async fn read_error_log(&self, path: &Path) -> Result<Option<String>>;

    /// 添付ファイルが存在するか
    async fn attachment_exists(&self, path: &Path) -> bool;
}
