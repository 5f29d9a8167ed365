//! # Configuration
//!
//! JSON設定ファイル（`reportportal` セクション）の読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::domain::entities::launch::Attribute;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub reportportal: ReportPortalConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportPortalConfig {
    pub api_token: String,
    pub host_url: String,
    pub project: String,
    pub launch: LaunchConfig,

    // Accepted for compatibility; a single-launch run has no use for them
    #[serde(default)]
    pub auto_dashboard: bool,
    #[serde(default)]
    pub merge_launches: bool,
    #[serde(default)]
    pub simple_xml: bool,

    /// スイート属性として送るxUnitプロパティ名の正規表現
    #[serde(default)]
    pub property_filter: Vec<String>,

    /// アップロード後に実行するコマンド（ローンチIDが最後の引数に追加される）
    #[serde(default)]
    pub post_process_command: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LaunchConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 値は文字列・数値・真偽値のいずれか
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl Config {
    /// 設定ファイルを読み込む（`~` は展開される）
    pub fn load(path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(path);
        let path = PathBuf::from(expanded_path.as_ref());

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}

impl ReportPortalConfig {
    /// ローンチ属性を文字列のキー・値に変換（キー順）
    pub fn launch_attributes(&self) -> Vec<Attribute> {
        self.launch
            .attributes
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Attribute::new(key.as_str(), value)
            })
            .collect()
    }
}
