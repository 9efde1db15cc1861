use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::provider::RenderingProvider;

/// Bounded retry with exponential backoff, used only around navigation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "RetryPolicy::default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "RetryPolicy::default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    #[serde(default = "RetryPolicy::default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    #[serde(default = "RetryPolicy::default_multiplier")]
    pub multiplier: f64,
}

impl RetryPolicy {
    const fn default_max_attempts() -> u32 {
        3
    }

    const fn default_initial_backoff_ms() -> u64 {
        500
    }

    const fn default_max_backoff_ms() -> u64 {
        8_000
    }

    const fn default_multiplier() -> f64 {
        2.0
    }

    /// A single attempt, no waiting.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
            multiplier: 1.0,
        }
    }

    /// Delay before retry number `retry` (1-based).
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry.saturating_sub(1)).unwrap_or(i32::MAX);
        #[allow(clippy::cast_precision_loss)]
        let scaled = self.initial_backoff_ms as f64 * self.multiplier.max(1.0).powi(exponent);
        #[allow(clippy::cast_precision_loss)]
        let capped = scaled.min(self.max_backoff_ms as f64);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Duration::from_millis(capped.max(0.0) as u64)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::default_max_attempts(),
            initial_backoff_ms: Self::default_initial_backoff_ms(),
            max_backoff_ms: Self::default_max_backoff_ms(),
            multiplier: Self::default_multiplier(),
        }
    }
}

/// Navigate to `locator`, retrying failed attempts according to `policy`.
///
/// Each attempt is bounded by `timeout` on top of whatever the provider
/// enforces itself. Returns the number of attempts used.
///
/// # Errors
///
/// Returns the last attempt's [`ProviderError`] once attempts are exhausted.
pub async fn navigate_with_retry<P>(
    provider: &mut P,
    locator: &str,
    timeout: Duration,
    policy: &RetryPolicy,
) -> Result<u32, ProviderError>
where
    P: RenderingProvider + ?Sized,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let outcome = match tokio::time::timeout(timeout, provider.navigate(locator, timeout)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::NavigationTimeout {
                locator: locator.to_string(),
                timeout,
            }),
        };

        match outcome {
            Ok(()) => return Ok(attempt),
            Err(err) if attempt < attempts => {
                let delay = policy.backoff(attempt);
                log::warn!("navigation attempt {attempt}/{attempts} failed: {err}; retrying in {delay:?}");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                log::error!("navigation to {locator} failed after {attempt} attempts: {err}");
                return Err(err);
            }
        }
    }
}
