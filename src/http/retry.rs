//! Retry configuration for the per-request client.
//!
//! Retries are performed by [`RetryTransientMiddleware`] with an exponential
//! backoff bounded by the wait / max-wait durations. Without custom conditions
//! the middleware's default transient-failure rules decide what is retried;
//! with conditions, a request is retried only when one of them says so.

use reqwest::Response;
use reqwest_middleware::ClientBuilder;
use reqwest_retry::{
    policies::ExponentialBackoff, Retryable, RetryableStrategy, RetryTransientMiddleware,
};
use std::{fmt, sync::Arc, time::Duration};

/// Outcome of one attempt, as seen by a [`RetryCondition`].
pub type Attempt = std::result::Result<Response, reqwest_middleware::Error>;

/// Predicate deciding whether an attempt should be retried.
///
/// ```rust
/// use restyle::http::RetryCondition;
///
/// // Retry on any 429, and on every transport failure.
/// let too_many = RetryCondition::new(|attempt| match attempt {
///     Ok(res) => res.status() == reqwest::StatusCode::TOO_MANY_REQUESTS,
///     Err(_) => true,
/// });
/// ```
#[derive(Clone)]
pub struct RetryCondition(Arc<dyn Fn(&Attempt) -> bool + Send + Sync>);

impl RetryCondition {
    pub fn new<F>(condition: F) -> Self
    where
        F: Fn(&Attempt) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(condition))
    }

    /// Evaluate the condition against an attempt.
    pub fn matches(&self, attempt: &Attempt) -> bool {
        (self.0)(attempt)
    }
}

impl fmt::Debug for RetryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RetryCondition(..)")
    }
}

/// Retry strategy backed by user supplied conditions.
#[derive(Debug, Clone)]
struct ConditionStrategy {
    conditions: Vec<RetryCondition>,
}

impl RetryableStrategy for ConditionStrategy {
    fn handle(&self, res: &Attempt) -> Option<Retryable> {
        self.conditions
            .iter()
            .any(|c| c.matches(res))
            .then_some(Retryable::Transient)
    }
}

/// Resolved retry settings for one request.
#[derive(Debug, Clone)]
pub struct RetrySettings {
    /// Number of retries after the first attempt. Already clamped.
    pub retries: u32,
    /// Lower bound of the backoff interval.
    pub wait: Duration,
    /// Upper bound of the backoff interval.
    pub max_wait: Duration,
    /// Custom retry conditions; empty means the default transient rules.
    pub conditions: Vec<RetryCondition>,
}

impl RetrySettings {
    pub const DEFAULT_WAIT: Duration = Duration::from_millis(100);
    pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(2);

    /// Settings for `retries` retries with the default backoff bounds.
    pub fn new(retries: u32) -> Self {
        Self {
            retries,
            wait: Self::DEFAULT_WAIT,
            max_wait: Self::DEFAULT_MAX_WAIT,
            conditions: Vec::new(),
        }
    }

    /// Clamp a requested retry count to `max`.
    pub fn clamp(requested: u32, max: u32) -> u32 {
        requested.min(max)
    }

    /// Backoff policy honoring the wait bounds.
    ///
    /// A wait larger than the max-wait raises the max-wait to match.
    pub fn policy(&self) -> ExponentialBackoff {
        let max_wait = self.max_wait.max(self.wait);
        ExponentialBackoff::builder()
            .retry_bounds(self.wait, max_wait)
            .build_with_max_retries(self.retries)
    }

    /// Install the retry middleware on a client builder.
    pub(crate) fn install(&self, builder: ClientBuilder) -> ClientBuilder {
        let policy = self.policy();
        if self.conditions.is_empty() {
            builder.with(RetryTransientMiddleware::new_with_policy(policy))
        } else {
            let strategy = ConditionStrategy {
                conditions: self.conditions.clone(),
            };
            builder.with(RetryTransientMiddleware::new_with_policy_and_strategy(
                policy, strategy,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(RetrySettings::clamp(1, 3), 1);
        assert_eq!(RetrySettings::clamp(3, 3), 3);
        assert_eq!(RetrySettings::clamp(10, 3), 3);
        assert_eq!(RetrySettings::clamp(u32::MAX, 5), 5);
    }

    #[test]
    fn test_default_bounds() {
        let settings = RetrySettings::new(2);
        assert_eq!(settings.retries, 2);
        assert_eq!(settings.wait, Duration::from_millis(100));
        assert_eq!(settings.max_wait, Duration::from_secs(2));
        assert!(settings.conditions.is_empty());
    }

    #[test]
    fn test_policy_with_wait_above_max_wait() {
        let mut settings = RetrySettings::new(3);
        settings.wait = Duration::from_secs(5);
        // retry_bounds asserts min <= max
        let _ = settings.policy();
    }

    #[test]
    fn test_condition_strategy() {
        let strategy = ConditionStrategy {
            conditions: vec![
                RetryCondition::new(|_| false),
                RetryCondition::new(|attempt| attempt.is_err()),
            ],
        };
        let failed: Attempt = Err(reqwest_middleware::Error::middleware(
            std::io::Error::other("boom"),
        ));
        assert!(matches!(strategy.handle(&failed), Some(Retryable::Transient)));

        let never = ConditionStrategy {
            conditions: vec![RetryCondition::new(|_| false)],
        };
        assert!(never.handle(&failed).is_none());
    }
}
