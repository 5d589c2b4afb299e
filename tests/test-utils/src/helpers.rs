//! Test helper functions and utilities

use anyhow::Result;
use chrono::NaiveDate;
use std::time::Duration;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

/// Initialize test logging with environment-based configuration.
///
/// Safe to call multiple times - subsequent calls are ignored.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Calendar date shorthand; panics on an impossible date
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

/// Midnight UTC of `date` in epoch milliseconds
#[must_use]
pub fn epoch_millis(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Fail the test instead of hanging when an upstream call never returns
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> Result<T>
where
    F: std::future::Future<Output = T>,
{
    timeout(duration, future)
        .await
        .map_err(|_| anyhow::anyhow!("Operation timed out after {:?}", duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_millis() {
        assert_eq!(epoch_millis(date(2024, 1, 1)), 1_704_067_200_000);
    }

    #[tokio::test]
    async fn test_with_timeout_passes_value() -> Result<()> {
        let value = with_timeout(Duration::from_secs(1), async { 7 }).await?;
        assert_eq!(value, 7);
        Ok(())
    }
}
