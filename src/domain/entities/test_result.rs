//! # TestSuite / TestCase Entities
//!
//! xUnitファイルから得たテスト結果のドメイン表現

use std::fmt;

use serde::{Deserialize, Serialize};

/// テストアイテムのステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Passed,
    Failed,
    Skipped,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Passed => "PASSED",
            ItemStatus::Failed => "FAILED",
            ItemStatus::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// テストケース
///
/// xUnitの `<testcase>` 1件に対応する
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// テストケース名（空の場合はレポートしない）
    pub name: String,
    pub class_name: Option<String>,
    /// 実行時間（秒）
    pub duration: Option<f64>,
    pub status: ItemStatus,
    /// `<failure>` / `<error>` のメッセージ
    pub failure_message: Option<String>,
}

impl TestCase {
    pub fn new(name: impl Into<String>, status: ItemStatus) -> Self {
        Self {
            name: name.into(),
            class_name: None,
            duration: None,
            status,
            failure_message: None,
        }
    }

    /// 名前が空でなければレポート対象
    pub fn is_reportable(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn is_failed(&self) -> bool {
        self.status == ItemStatus::Failed
    }
}

/// テストスイート
///
/// xUnitの `<testsuite>` 1件に対応する。名前はxUnitファイル名（拡張子なし）で、
/// 添付ファイルのディレクトリ名としても使われる。
#[derive(Debug, Clone, PartialEq)]
pub struct TestSuite {
    /// xUnitファイル名（拡張子なし）
    pub name: String,
    /// `<testsuite name="...">` の値
    pub title: Option<String>,
    /// `<properties>` の (name, value)
    pub properties: Vec<(String, String)>,
    pub test_cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            properties: Vec::new(),
            test_cases: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }

    /// レポート対象のテストケース
    pub fn reportable_cases(&self) -> impl Iterator<Item = &TestCase> {
        self.test_cases.iter().filter(|tc| tc.is_reportable())
    }

    /// スイートのステータスを導出
    ///
    /// 1件でも失敗があれば FAILED、全てスキップなら SKIPPED、それ以外は PASSED
    pub fn status(&self) -> ItemStatus {
        let mut any = false;
        let mut all_skipped = true;

        for tc in self.reportable_cases() {
            any = true;
            match tc.status {
                ItemStatus::Failed => return ItemStatus::Failed,
                ItemStatus::Passed => all_skipped = false,
                ItemStatus::Skipped => {}
            }
        }

        if any && all_skipped {
            ItemStatus::Skipped
        } else {
            ItemStatus::Passed
        }
    }
}
