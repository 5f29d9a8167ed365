//! # Property Filter
//!
//! xUnitの `<properties>` のうち、設定されたパターンに一致するものを属性にする

use anyhow::{Context, Result};
use regex::Regex;

use crate::domain::entities::launch::Attribute;

/// プロパティフィルタ
///
/// パターンは先頭一致（`^(?:pattern)`）で評価する
#[derive(Debug, Clone)]
pub struct PropertyFilter {
    patterns: Vec<Regex>,
}

impl PropertyFilter {
    /// パターン文字列からフィルタを作成
    ///
    /// # Errors
    ///
    /// 正規表現として不正なパターンがある場合にエラーを返す
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("^(?:{})", p))
                    .with_context(|| format!("Invalid property_filter pattern: {}", p))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// 何も通さないフィルタ
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(name))
    }

    /// 一致したプロパティを属性に変換
    pub fn attributes(&self, properties: &[(String, String)]) -> Vec<Attribute> {
        properties
            .iter()
            .filter(|(name, _)| self.matches(name))
            .map(|(name, value)| Attribute::new(name.clone(), value.clone()))
            .collect()
    }
}

impl Default for PropertyFilter {
    fn default() -> Self {
        Self::none()
    }
}
