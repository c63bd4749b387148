use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry an async operation over a fixed backoff schedule.
///
/// Makes one initial attempt plus one retry per entry in `delays_secs`,
/// sleeping that entry's value before the retry. Returns the first success,
/// or the final attempt's error once the schedule is exhausted.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, delays_secs: &[u64]) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = delays_secs.len() + 1;

    for (i, delay_secs) in delays_secs.iter().enumerate() {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!(
                    "Request failed (attempt {}/{attempts}): {e}. Retrying after {delay_secs}s...",
                    i + 1
                );
                sleep(Duration::from_secs(*delay_secs)).await;
            }
        }
    }

    operation().await
}
