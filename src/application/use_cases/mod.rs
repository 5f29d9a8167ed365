//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **DiscoverResultsUseCase**: xUnit結果ファイルの発見
//! - **UploadResultsUseCase**: ローンチの作成と結果のアップロード
//! - **GetLaunchDetailsUseCase**: 既存ローンチの統計取得と要約

pub mod discover_results;
pub mod get_launch_details;
pub mod upload_results;
