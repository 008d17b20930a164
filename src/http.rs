//! 共通HTTPヘルパー

use crate::error::{DexError, Result};
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;

/// リトライ方針
///
/// 試行回数は最大 `max_attempts` 回。n 回目の失敗後は `backoff × n` 待つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// 待ち時間なし（テスト用）
    #[cfg(test)]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Duration::ZERO,
        }
    }

    /// n 回目（1始まり）の失敗後の待ち時間
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff * attempt
    }
}

/// リトライ対象のエラーか
///
/// - ネットワークエラー、429、5xx はリトライ
/// - 403 でもレート制限メッセージならリトライ
pub fn is_retriable_error(error: &DexError) -> bool {
    if error.is_retryable() {
        return true;
    }
    match error {
        DexError::Api {
            status: 403,
            message,
            ..
        } => message.to_lowercase().contains("rate limit"),
        _ => false,
    }
}

/// 失敗時にバックオフしながら再試行する
pub async fn with_retry<T, F, Fut>(mut operation: F, policy: &RetryPolicy) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && is_retriable_error(&err) => {
                eprintln!("Retry {}/{}: {}", attempt, max_attempts, err);
                let delay = policy.delay_after(attempt);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Err(err) => return Err(err),
        }
    }
}

/// JSON を取得（404 は None）
pub async fn get_json(client: &Client, url: &str) -> Result<Option<serde_json::Value>> {
    let response = client.get(url).send().await?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(DexError::Api {
            status: status.as_u16(),
            url: url.to_string(),
            message,
        });
    }

    Ok(Some(response.json().await?))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
