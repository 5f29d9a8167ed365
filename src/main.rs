//! rpsync - ReportPortal Uploader
//!
//! xUnit結果とログをReportPortalのローンチとしてアップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use rpsync::adapter::config::Config;
use rpsync::driver::{Args, ReportPortalWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config_file)?;

    // Create workflow with injected dependencies
    let workflow = ReportPortalWorkflow::new(config)?;

    workflow.execute(args).await
}
