//! Deterministic exponential backoff for geocoding requests.

use std::time::Duration;

/// Retry budget and backoff schedule.
///
/// Before retry `n` (0-based) the resolver waits
/// `backoff_base_ms * multiplier^n` milliseconds. With the defaults that is
/// 1 s, 2 s, 4 s, after which the address is given up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure. `0` disables retries.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base_ms: 1_000,
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// A policy that never waits, for tests and offline runs.
    #[must_use]
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff_base_ms: 0,
            multiplier: 1,
        }
    }

    /// Wait before retry number `attempt` (0-based).
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = u64::from(self.multiplier).saturating_pow(attempt);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }

    /// Total attempts including the first one.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(1), Duration::from_secs(2));
        assert_eq!(policy.delay(2), Duration::from_secs(4));
        assert_eq!(policy.max_attempts(), 4);
    }

    #[test]
    fn custom_multiplier() {
        let policy = RetryPolicy {
            max_retries: 2,
            backoff_base_ms: 500,
            multiplier: 3,
        };
        assert_eq!(policy.delay(0), Duration::from_millis(500));
        assert_eq!(policy.delay(2), Duration::from_millis(4_500));
    }

    #[test]
    fn huge_attempts_saturate_instead_of_overflowing() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(200), Duration::from_millis(u64::MAX));
    }

    #[test]
    fn immediate_policy_never_waits() {
        let policy = RetryPolicy::immediate(5);
        assert_eq!(policy.delay(4), Duration::ZERO);
        assert_eq!(policy.max_attempts(), 6);
    }
}
