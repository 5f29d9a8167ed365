//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod file_payload_repository;
pub mod reportportal_repository;
