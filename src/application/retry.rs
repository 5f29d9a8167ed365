//! Retry Policy
//!
//! 固定回数・固定間隔のリトライポリシー

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use log::warn;
use tokio::time::sleep;

// Remote statistics are eventually consistent; suites can stay IN_PROGRESS
// for a while after the launch is finished.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 120;

/// Convert error chain to string including all causes
pub fn error_chain_to_string(e: &anyhow::Error) -> String {
    let mut messages = Vec::new();
    for cause in e.chain() {
        messages.push(cause.to_string());
    }
    messages.join(" | ")
}

/// リトライポリシー
///
/// 最大試行回数、試行間の待ち時間、リトライ対象のエラー判定を持つ
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// 最初の試行を含む試行回数
    pub max_attempts: u32,
    pub delay: Duration,
    is_retryable: fn(&anyhow::Error) -> bool,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration, is_retryable: fn(&anyhow::Error) -> bool) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            is_retryable,
        }
    }

    /// Check if a failed attempt should be retried
    pub fn should_retry(&self, attempt: u32, error: &anyhow::Error) -> bool {
        attempt < self.max_attempts && (self.is_retryable)(error)
    }

    /// 操作をポリシーに従って実行する
    ///
    /// `operation` には1始まりの試行番号が渡される。リトライ対象外のエラー、
    /// または試行回数を使い切った場合は最後のエラーをそのまま返す。
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if self.should_retry(attempt, &e) => {
                    warn!(
                        "Attempt {}/{} failed, retrying in {}s: {}",
                        attempt,
                        self.max_attempts,
                        self.delay.as_secs(),
                        error_chain_to_string(&e)
                    );
                    sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, thiserror::Error)]
    #[error("not yet")]
    struct NotYet;

    fn not_yet(e: &anyhow::Error) -> bool {
        e.downcast_ref::<NotYet>().is_some()
    }

    fn policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(1), not_yet)
    }

    #[tokio::test]
    async fn test_run_success_first_attempt() {
        let calls = AtomicU32::new(0);

        let result = policy()
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, anyhow::Error>(42) }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_retries_until_success() {
        let calls = AtomicU32::new(0);

        let result = policy()
            .run(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(anyhow::Error::new(NotYet))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy()
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(anyhow::Error::new(NotYet)) }
            })
            .await;

        assert!(result.unwrap_err().downcast_ref::<NotYet>().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_does_not_retry_other_errors() {
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy()
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(anyhow::anyhow!("401 Unauthorized")) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_should_retry() {
        let p = policy();
        let retryable = anyhow::Error::new(NotYet);
        let other = anyhow::anyhow!("boom");

        assert!(p.should_retry(1, &retryable));
        assert!(p.should_retry(2, &retryable));
        assert!(!p.should_retry(3, &retryable));
        assert!(!p.should_retry(1, &other));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let p = RetryPolicy::new(0, Duration::ZERO, not_yet);
        assert_eq!(p.max_attempts, 1);
    }

    #[test]
    fn test_error_chain_to_string() {
        use anyhow::Context;

        let inner_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "Broken pipe");
        let error = anyhow::Error::from(inner_error)
            .context("client error")
            .context("ReportPortal request failed");

        let error_msg = error_chain_to_string(&error);

        assert_eq!(
            error_msg,
            "ReportPortal request failed | client error | Broken pipe"
        );
    }

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_MAX_ATTEMPTS, 3);
        assert_eq!(DEFAULT_RETRY_DELAY_SECS, 120);
    }
}
