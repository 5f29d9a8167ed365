//! Post-process Hook
//!
//! アップロード完了後に外部コマンドを実行する（ローンチIDを最後の引数に追加）

use log::{info, warn};

/// フックの実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcessOutcome {
    /// コマンドが設定されていない
    Skipped,
    Succeeded,
    /// 起動失敗または非ゼロ終了（終了コードには影響しない）
    Failed(String),
}

/// アップロード後のフック
#[derive(Debug, Clone, Default)]
pub struct PostProcessor {
    command: Option<Vec<String>>,
}

impl PostProcessor {
    pub fn new(command: Option<Vec<String>>) -> Self {
        // An empty argv is treated as "not configured"
        let command = command.filter(|argv| !argv.is_empty());
        Self { command }
    }

    pub async fn run(&self, launch_id: &str) -> PostProcessOutcome {
        let Some((program, args)) = self.command.as_ref().and_then(|argv| argv.split_first())
        else {
            info!("No post-process command configured for launch {}", launch_id);
            return PostProcessOutcome::Skipped;
        };

        info!("Running post-process command {} for launch {}", program, launch_id);

        let output = match tokio::process::Command::new(program)
            .args(args)
            .arg(launch_id)
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let message = format!("failed to start {}: {}", program, e);
                warn!("Post-process {}", message);
                return PostProcessOutcome::Failed(message);
            }
        };

        if output.status.success() {
            info!("Post-process command finished for launch {}", launch_id);
            PostProcessOutcome::Succeeded
        } else {
            let message = format!(
                "{} exited with {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            warn!("Post-process {}", message);
            PostProcessOutcome::Failed(message)
        }
    }
}
