//! ReportPortal Integration
//!
//! ReportPortal API v1 とのHTTP通信

pub mod client;
pub mod models;
