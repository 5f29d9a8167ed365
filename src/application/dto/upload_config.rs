//! # Upload Configuration DTO
//!
//! アップロード設定のData Transfer Object

use std::path::PathBuf;

use crate::domain::entities::launch::Attribute;
use crate::domain::services::property_filter::PropertyFilter;

/// ワーカー数の上限
pub const MAX_DEFAULT_WORKERS: usize = 32;

/// ホスト環境の並列度から既定のワーカー数を決める
///
/// `min(32, CPU数 + 4)`
pub fn default_workers() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    std::cmp::min(MAX_DEFAULT_WORKERS, cpus + 4)
}

/// アップロード設定
///
/// ローンチの作成とペイロードの処理に必要な設定情報
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// ペイロードディレクトリ（`results/` と `attachments/` を含む）
    pub payload_dir: PathBuf,
    /// ローンチ名
    pub launch_name: String,
    /// ローンチの説明
    pub launch_description: String,
    /// ローンチ属性
    pub launch_attributes: Vec<Attribute>,
    /// スイート属性にするxUnitプロパティのフィルタ
    pub property_filter: PropertyFilter,
    /// 同時に処理する結果ファイルの数
    pub max_workers: usize,
}

impl UploadConfig {
    /// 新しいアップロード設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use rpsync::application::dto::upload_config::UploadConfig;
    /// use rpsync::domain::entities::launch::Attribute;
    /// use rpsync::domain::services::property_filter::PropertyFilter;
    ///
    /// let config = UploadConfig::new(
    ///     "/tmp/payload".into(),
    ///     "RHCEPH-4.3 - tier-0".to_string(),
    ///     "nightly run".to_string(),
    ///     vec![Attribute::new("tier", "tier-0")],
    ///     PropertyFilter::none(),
    ///     0, // 0 は1に切り上げ
    /// );
    ///
    /// assert_eq!(config.max_workers, 1);
    /// assert_eq!(config.launch_attributes.len(), 1);
    /// ```
    pub fn new(
        payload_dir: PathBuf,
        launch_name: String,
        launch_description: String,
        launch_attributes: Vec<Attribute>,
        property_filter: PropertyFilter,
        max_workers: usize,
    ) -> Self {
        Self {
            payload_dir,
            launch_name,
            launch_description,
            launch_attributes,
            property_filter,
            max_workers: max_workers.max(1),
        }
    }
}
