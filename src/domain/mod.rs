//! # Domain Layer
//!
//! テスト結果レポートの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（Rust標準ライブラリと最小限の依存のみ）
//! - ReportPortalのHTTP APIやXMLの形式について何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（Launch, TestSuite, LogEventなど）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（ログ再構築、添付ファイルの命名規則など）

pub mod entities;
pub mod repositories;
pub mod services;
