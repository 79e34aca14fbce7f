use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

// ============================================================================
// Startup Backoff
// ============================================================================
//
// At boot the database may still be starting (compose, k8s init order).
// `wait_for` keeps dialing a dependency with doubling delays until it
// answers, the attempt budget runs out, or the error is not transient.
// Request handling never retries; store failures go straight back.
//
// ============================================================================

/// Classifies failures worth another attempt.
pub trait IsTransient {
    fn is_transient(&self) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backoff {
    /// Attempt budget, including the first dial. Never below one.
    pub attempts: u32,
    pub first_delay: Duration,
    pub max_delay: Duration,
}

impl Backoff {
    /// Schedule for the PostgreSQL pool: 250ms doubling up to 8s.
    pub fn for_database(attempts: u32) -> Self {
        Self {
            attempts: attempts.max(1),
            first_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(8),
        }
    }

    /// Pause before dial `attempt + 1`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(1).min(16);
        self.first_delay
            .saturating_mul(1 << doublings)
            .min(self.max_delay)
    }
}

/// Dial `dependency` until it answers. `dial` receives the 1-based attempt number.
pub async fn wait_for<F, Fut, T, E>(dependency: &str, backoff: &Backoff, mut dial: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + IsTransient,
{
    let mut attempt = 1;

    loop {
        let error = match dial(attempt).await {
            Ok(connection) => {
                if attempt > 1 {
                    tracing::info!(dependency, attempt, budget = backoff.attempts, "Reached {} after retrying", dependency);
                }
                return Ok(connection);
            }
            Err(error) => error,
        };

        if !error.is_transient() {
            tracing::error!(dependency, attempt, error = %error, "{} refused the connection, not retrying", dependency);
            return Err(error);
        }
        if attempt >= backoff.attempts {
            tracing::error!(dependency, budget = backoff.attempts, error = %error, "{} still unreachable, giving up", dependency);
            return Err(error);
        }

        let delay = backoff.delay_after(attempt);
        tracing::warn!(
            dependency,
            attempt,
            budget = backoff.attempts,
            retry_in_ms = delay.as_millis() as u64,
            error = %error,
            "{} not reachable yet",
            dependency
        );
        sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq)]
    enum DialError {
        Refused,
        BadPassword,
    }

    impl std::fmt::Display for DialError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl IsTransient for DialError {
        fn is_transient(&self) -> bool {
            matches!(self, DialError::Refused)
        }
    }

    fn quick(attempts: u32) -> Backoff {
        Backoff {
            attempts,
            first_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(20),
        }
    }

    #[test]
    fn test_database_schedule_doubles_then_caps() {
        let backoff = Backoff::for_database(8);

        assert_eq!(backoff.delay_after(1), Duration::from_millis(250));
        assert_eq!(backoff.delay_after(2), Duration::from_millis(500));
        assert_eq!(backoff.delay_after(5), Duration::from_secs(4));
        assert_eq!(backoff.delay_after(6), Duration::from_secs(8));
        assert_eq!(backoff.delay_after(40), Duration::from_secs(8));
    }

    #[test]
    fn test_budget_never_below_one_attempt() {
        assert_eq!(Backoff::for_database(0).attempts, 1);
    }

    #[tokio::test]
    async fn test_waits_until_database_answers() {
        let dials = AtomicU32::new(0);

        let result = wait_for("postgres", &quick(4), |attempt| {
            dials.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(DialError::Refused)
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(dials.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_when_budget_spent() {
        let dials = AtomicU32::new(0);

        let result = wait_for("postgres", &quick(3), |_| {
            dials.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(DialError::Refused) }
        })
        .await;

        assert_eq!(result, Err(DialError::Refused));
        assert_eq!(dials.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_failure_stops_immediately() {
        let dials = AtomicU32::new(0);

        let result = wait_for("postgres", &quick(5), |_| {
            dials.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(DialError::BadPassword) }
        })
        .await;

        assert_eq!(result, Err(DialError::BadPassword));
        assert_eq!(dials.load(Ordering::SeqCst), 1);
    }
}
