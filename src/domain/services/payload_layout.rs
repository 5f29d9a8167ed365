//! # Payload Layout
//!
//! ペイロードディレクトリの構成と添付ファイルの命名規則
//!
//! ```text
//! payload/
//!   results/<suite>.xml
//!   attachments/<suite>/<suite>.tar.gz
//!   attachments/<suite>/<testcase_name>_0.err
//! ```

use std::path::{Path, PathBuf};

pub const RESULTS_DIR: &str = "results";
pub const ATTACHMENTS_DIR: &str = "attachments";
pub const BUNDLE_SUFFIX: &str = ".tar.gz";
pub const ERROR_LOG_SUFFIX: &str = "_0.err";

/// ペイロードディレクトリ内のパスを組み立てる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadLayout {
    root: PathBuf,
}

impl PayloadLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// xUnitファイルのディレクトリ
    pub fn results_dir(&self) -> PathBuf {
        self.root.join(RESULTS_DIR)
    }

    pub fn attachments_dir(&self) -> PathBuf {
        self.root.join(ATTACHMENTS_DIR)
    }

    /// スイート単位の圧縮バンドル: `attachments/<suite>/<suite>.tar.gz`
    pub fn suite_bundle(&self, suite_name: &str) -> PathBuf {
        self.attachments_dir()
            .join(suite_name)
            .join(format!("{}{}", suite_name, BUNDLE_SUFFIX))
    }

    /// テストケース単位のエラーログ: `attachments/<suite>/<name>_0.err`
    ///
    /// テストケース名の空白はアンダースコアに置き換える
    pub fn test_case_log(&self, suite_name: &str, test_case_name: &str) -> PathBuf {
        self.attachments_dir()
            .join(suite_name)
            .join(error_log_file_name(test_case_name))
    }
}

/// テストケース名から `.err` ファイル名を作る
pub fn error_log_file_name(test_case_name: &str) -> String {
    format!("{}{}", test_case_name.replace(' ', "_"), ERROR_LOG_SUFFIX)
}
