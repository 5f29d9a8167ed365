//! CLI Argument Parsing
//!
//! CLIの引数解析

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{ArgGroup, Parser};

/// xUnit結果をReportPortalにアップロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "rpsync")]
#[command(about = "Upload xUnit results and logs to ReportPortal", long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["payload_dir", "launch_id"]),
))]
pub struct Args {
    /// Config file path
    #[arg(short = 'c', long = "config_file")]
    pub config_file: String,

    /// Payload directory with results/ and attachments/
    #[arg(short = 'd', long = "payload_dir")]
    pub payload_dir: Option<PathBuf>,

    /// Existing launch to summarize
    #[arg(short = 'l', long = "launch_id")]
    pub launch_id: Option<u64>,

    /// Write the launch summary JSON to this file
    #[arg(short = 'o', long = "output", requires = "launch_id")]
    pub output: Option<PathBuf>,

    /// Number of result files processed concurrently
    #[arg(long = "workers", conflicts_with = "launch_id")]
    pub workers: Option<usize>,
}

/// 実行モード
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Upload {
        payload_dir: PathBuf,
        workers: Option<usize>,
    },
    Query {
        launch_id: u64,
        output: Option<PathBuf>,
    },
}

impl Args {
    pub fn mode(&self) -> Result<Mode> {
        match (&self.payload_dir, self.launch_id) {
            (Some(payload_dir), _) => Ok(Mode::Upload {
                payload_dir: payload_dir.clone(),
                workers: self.workers,
            }),
            (None, Some(launch_id)) => Ok(Mode::Query {
                launch_id,
                output: self.output.clone(),
            }),
            (None, None) => bail!("Either --payload_dir or --launch_id is required"),
        }
    }
}
