//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **Launch**: 1回のレポートセッション
//! - **TestSuite / TestCase**: xUnitファイルから得たテスト結果
//! - **LogEvent / LogMessage**: `.err` ファイルから再構築したログ
//! - **LaunchItem / LaunchSummary**: 既存ローンチの統計とその要約

pub mod launch;
pub mod launch_summary;
pub mod log_event;
pub mod test_result;
