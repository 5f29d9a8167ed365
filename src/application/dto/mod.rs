//! # DTO
//!
//! ユースケースに渡す設定値

pub mod query_config;
pub mod upload_config;
