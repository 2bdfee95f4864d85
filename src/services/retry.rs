use crate::config::Config;
use crate::models::error::AppError;
use gloo_timers::future::TimeoutFuture;
use std::future::Future;

/// Next backoff delay: doubles up to the ceiling.
pub const fn next_backoff_ms(current_ms: u32) -> u32 {
    let next = current_ms.saturating_mul(Config::BACKOFF_GROWTH_FACTOR);
    if next > Config::MAX_BACKOFF_MS {
        Config::MAX_BACKOFF_MS
    } else {
        next
    }
}

/// Retries an async operation with exponential backoff.
///
/// # Arguments
///
/// * `operation` - A closure that returns a Future resolving to `Result<T, AppError>`
/// * `max_attempts` - Total number of attempts, including the first
///
/// # Returns
///
/// The successful result, or the last error encountered
///
/// # Behavior
///
/// - Initial delay: 1s, doubling per attempt, capped at 30s
/// - Only retries errors where `AppError::is_retryable` holds
/// - Auth, not-found and contract errors immediately propagate
pub async fn retry_with_backoff<F, Fut, T>(
    mut operation: F,
    max_attempts: u32,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut delay_ms = Config::INITIAL_BACKOFF_MS;

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                gloo::console::warn!(&format!(
                    "Request failed ({e}), retrying in {}ms (attempt {}/{})",
                    delay_ms, attempt, max_attempts
                ));
                TimeoutFuture::new(delay_ms).await;
                delay_ms = next_backoff_ms(delay_ms);
            }
            Err(e) => return Err(e),
        }
    }

    Err(AppError::NetworkError("Retry attempts exhausted".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let mut delay = Config::INITIAL_BACKOFF_MS;
        let mut observed = vec![delay];
        for _ in 0..6 {
            delay = next_backoff_ms(delay);
            observed.push(delay);
        }
        assert_eq!(observed, vec![1_000, 2_000, 4_000, 8_000, 16_000, 30_000, 30_000]);
    }

    #[test]
    fn test_non_retryable_error_fails_fast() {
        let attempts = Cell::new(0u32);
        let result: Result<(), AppError> = futures::executor::block_on(retry_with_backoff(
            || {
                attempts.set(attempts.get() + 1);
                async { Err(AppError::AuthError("expired".to_string())) }
            },
            Config::MAX_FETCH_ATTEMPTS,
        ));

        assert!(matches!(result, Err(AppError::AuthError(_))));
        // No second attempt, no backoff sleep.
        assert_eq!(attempts.get(), 1);
    }

    #[test]
    fn test_success_short_circuits() {
        let attempts = Cell::new(0u32);
        let result = futures::executor::block_on(retry_with_backoff(
            || {
                attempts.set(attempts.get() + 1);
                async { Ok(17u32) }
            },
            Config::MAX_FETCH_ATTEMPTS,
        ));

        assert_eq!(result.unwrap(), 17);
        assert_eq!(attempts.get(), 1);
    }
}
