//! Adapter Layer
//!
//! 外部システム（ReportPortal, ファイルシステム, 外部コマンド）との統合

pub mod config;
pub mod post_process;
pub mod reportportal;
pub mod repositories;
pub mod xunit;
