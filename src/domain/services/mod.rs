//! # Domain Services
//!
//! エンティティにまたがる純粋なビジネスルール
//!
//! - **log_event_parser**: `.err` テキストからログイベントを再構築
//! - **payload_layout**: ペイロードディレクトリと添付ファイルの命名規則
//! - **property_filter**: xUnitプロパティから属性への変換
//! - **launch_summary**: ローンチ統計の要約

pub mod launch_summary;
pub mod log_event_parser;
pub mod payload_layout;
pub mod property_filter;
