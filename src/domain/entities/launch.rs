//! # Launch Entity
//!
//! レポートセッション（ローンチ）のドメインエンティティ

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// キーと値の属性
///
/// ローンチやスイートに付与されるタグ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// ローンチのドメインエンティティ
///
/// 1回の実行で1つだけ作成され、全ての結果ファイルの処理後に終了する
#[derive(Debug, Clone)]
pub struct Launch {
    /// リモートサービスが割り当てたID（開始前は `None`）
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub attributes: Vec<Attribute>,
    pub start_time: DateTime<Utc>,
    pub finish_time: Option<DateTime<Utc>>,
}

impl Launch {
    /// 新しいローンチを作成
    ///
    /// # Errors
    ///
    /// ローンチ名が空の場合にエラーを返す
    pub fn new(
        name: String,
        description: String,
        attributes: Vec<Attribute>,
        start_time: DateTime<Utc>,
    ) -> anyhow::Result<Self> {
        if name.trim().is_empty() {
            anyhow::bail!("Launch name cannot be empty");
        }

        Ok(Self {
            id: None,
            name,
            description,
            attributes,
            start_time,
            finish_time: None,
        })
    }

    /// リモートで開始されたことを記録
    pub fn mark_started(&mut self, id: String) {
        self.id = Some(id);
    }

    /// 終了時刻を記録
    pub fn mark_finished(&mut self, finish_time: DateTime<Utc>) {
        self.finish_time = Some(finish_time);
    }

    pub fn is_started(&self) -> bool {
        self.id.is_some()
    }
}
