use std::future::Future;
use std::time::{Duration, Instant};

use crate::status::{Code, ToCode};

/// Exponential backoff delays.
///
/// Starts at the initial delay and multiplies it by the scaling factor after every step,
/// never going above the maximum delay.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    current: Duration,
    scaling: f64,
    max_delay: Duration,
}

impl ExponentialBackoff {
    pub fn new(initial_delay: Duration, max_delay: Duration, scaling: f64) -> ExponentialBackoff {
        ExponentialBackoff {
            current: initial_delay.min(max_delay),
            scaling: scaling.max(1.0),
            max_delay,
        }
    }

    pub fn from_millis(base: u64) -> ExponentialBackoff {
        Self::new(Duration::from_millis(base), Duration::MAX, 1.0)
    }
}

impl Iterator for ExponentialBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let duration = self.current;
        let next = self.current.as_secs_f64() * self.scaling;
        self.current = if next >= self.max_delay.as_secs_f64() {
            self.max_delay
        } else {
            Duration::from_secs_f64(next)
        };
        Some(duration)
    }
}

/// Whether an RPC can be safely repeated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Idempotency {
    Idempotent,
    NonIdempotent,
}

pub trait Predicate<E> {
    fn should_retry(&mut self, error: &E) -> bool;
}

/// Retries only errors whose code is one of `codes`.
pub struct CodePredicate {
    codes: Vec<Code>,
}

impl CodePredicate {
    pub fn new(codes: Vec<Code>) -> Self {
        Self { codes }
    }
}

impl<E> Predicate<E> for CodePredicate
where
    E: ToCode,
{
    fn should_retry(&mut self, error: &E) -> bool {
        self.codes.contains(&error.to_code())
    }
}

/// Per-call accounting of how many failures and how much time a retry loop may still spend.
#[derive(Debug)]
pub struct RetryBudget {
    failures: usize,
    started: Instant,
    max_failures: Option<usize>,
    max_duration: Option<Duration>,
}

impl RetryBudget {
    pub fn new(max_failures: Option<usize>, max_duration: Option<Duration>) -> Self {
        Self {
            failures: 0,
            started: Instant::now(),
            max_failures,
            max_duration,
        }
    }

    /// Records a failure and returns whether another attempt is allowed.
    pub fn on_failure(&mut self) -> bool {
        self.failures += 1;
        !self.is_exhausted()
    }

    pub fn is_exhausted(&self) -> bool {
        if let Some(max) = self.max_failures {
            if self.failures >= max {
                return true;
            }
        }
        match self.max_duration {
            Some(max) => self.started.elapsed() >= max,
            None => false,
        }
    }

    /// Caps a backoff delay so the loop does not sleep past its time budget.
    pub fn cap(&self, delay: Duration) -> Duration {
        match self.max_duration {
            Some(max) => delay.min(max.saturating_sub(self.started.elapsed())),
            None => delay,
        }
    }

    pub fn failures(&self) -> usize {
        self.failures
    }
}

pub trait Retry<E> {
    type Predicate: Predicate<E>;
    fn strategy(&self) -> ExponentialBackoff;
    fn predicate(&self) -> Self::Predicate;
    fn budget(&self) -> RetryBudget;
}

#[derive(Clone, Debug, PartialEq)]
pub struct RetrySetting {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub scaling: f64,
    /// Stop after this many failed attempts. `None` means no limit on the count.
    pub max_failures: Option<usize>,
    /// Stop once this much time has elapsed since the first attempt. `None` means no time limit.
    pub max_duration: Option<Duration>,
    pub codes: Vec<Code>,
}

impl<E> Retry<E> for RetrySetting
where
    E: ToCode,
{
    type Predicate = CodePredicate;

    fn strategy(&self) -> ExponentialBackoff {
        ExponentialBackoff::new(self.initial_delay, self.max_delay, self.scaling)
    }

    fn predicate(&self) -> CodePredicate {
        CodePredicate::new(self.codes.clone())
    }

    fn budget(&self) -> RetryBudget {
        RetryBudget::new(self.max_failures, self.max_duration)
    }
}

impl Default for RetrySetting {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5 * 60),
            scaling: 2.0,
            max_failures: None,
            max_duration: Some(Duration::from_secs(30 * 60)),
            codes: vec![Code::ResourceExhausted, Code::Unavailable, Code::DeadlineExceeded],
        }
    }
}

/// Repeats `f` while it fails with a retryable error and the retry budget allows it.
///
/// A non idempotent call is attempted exactly once. Permanent errors are returned immediately,
/// and when the budget runs out the last transient error is returned.
pub async fn invoke<R, E, A, RT>(
    retry: Option<RT>,
    idempotency: Idempotency,
    mut f: impl FnMut() -> A,
) -> Result<R, E>
where
    E: ToCode,
    A: Future<Output = Result<R, E>>,
    RT: Retry<E> + Default,
{
    let retry = retry.unwrap_or_default();
    let mut strategy = retry.strategy();
    let mut predicate = retry.predicate();
    let mut budget = retry.budget();
    loop {
        let err = match f().await {
            Ok(s) => return Ok(s),
            Err(e) => e,
        };
        if idempotency == Idempotency::NonIdempotent || !predicate.should_retry(&err) {
            return Err(err);
        }
        if !budget.on_failure() {
            tracing::debug!("the end of retry: code={:?}, failures={}", err.to_code(), budget.failures());
            return Err(err);
        }
        match strategy.next() {
            None => return Err(err),
            Some(duration) => tokio::time::sleep(budget.cap(duration)).await,
        };
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::retry::{invoke, ExponentialBackoff, Idempotency, RetrySetting};
    use crate::status::{Code, Status};

    fn quick(max_failures: Option<usize>) -> RetrySetting {
        RetrySetting {
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            max_failures,
            max_duration: None,
            ..Default::default()
        }
    }

    async fn call_until(counter: Arc<AtomicUsize>, succeed_on: usize, code: Code) -> Result<usize, Status> {
        let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt >= succeed_on {
            Ok(attempt)
        } else {
            Err(Status::new(code, format!("attempt {attempt}")))
        }
    }

    #[test]
    fn test_backoff() {
        let mut backoff = ExponentialBackoff::new(Duration::from_secs(1), Duration::from_secs(5), 2.0);
        assert_eq!(backoff.next(), Some(Duration::from_secs(1)));
        assert_eq!(backoff.next(), Some(Duration::from_secs(2)));
        assert_eq!(backoff.next(), Some(Duration::from_secs(4)));
        assert_eq!(backoff.next(), Some(Duration::from_secs(5)));
        assert_eq!(backoff.next(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_backoff_scaling_below_one() {
        let mut backoff = ExponentialBackoff::new(Duration::from_secs(1), Duration::from_secs(5), f64::NAN);
        assert_eq!(backoff.next(), Some(Duration::from_secs(1)));
        assert_eq!(backoff.next(), Some(Duration::from_secs(1)));
        let mut backoff = ExponentialBackoff::new(Duration::from_secs(1), Duration::from_secs(5), 0.5);
        assert_eq!(backoff.next(), Some(Duration::from_secs(1)));
        assert_eq!(backoff.next(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_backoff_from_millis() {
        let mut backoff = ExponentialBackoff::from_millis(10);
        assert_eq!(backoff.next(), Some(Duration::from_millis(10)));
        assert_eq!(backoff.next(), Some(Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn test_exhausted_after_max_failures() {
        let counter = Arc::new(AtomicUsize::new(0));
        let result = invoke(Some(quick(Some(2))), Idempotency::Idempotent, || {
            call_until(counter.clone(), usize::MAX, Code::ResourceExhausted)
        })
        .await;
        assert_eq!(result.unwrap_err().code(), Code::ResourceExhausted);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_success_on_third_attempt() {
        let counter = Arc::new(AtomicUsize::new(0));
        let result = invoke(Some(quick(None)), Idempotency::Idempotent, || {
            call_until(counter.clone(), 3, Code::Unavailable)
        })
        .await;
        assert_eq!(result.unwrap(), 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_error() {
        let counter = Arc::new(AtomicUsize::new(0));
        let result = invoke(Some(quick(None)), Idempotency::Idempotent, || {
            call_until(counter.clone(), 3, Code::PermissionDenied)
        })
        .await;
        assert_eq!(result.unwrap_err().code(), Code::PermissionDenied);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_idempotent() {
        let counter = Arc::new(AtomicUsize::new(0));
        let result = invoke(Some(quick(None)), Idempotency::NonIdempotent, || {
            call_until(counter.clone(), 3, Code::Unavailable)
        })
        .await;
        assert_eq!(result.unwrap_err().code(), Code::Unavailable);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_time_budget() {
        let counter = Arc::new(AtomicUsize::new(0));
        let setting = RetrySetting {
            initial_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(5),
            max_failures: None,
            max_duration: Some(Duration::from_millis(30)),
            ..Default::default()
        };
        let result = invoke(Some(setting), Idempotency::Idempotent, || {
            call_until(counter.clone(), usize::MAX, Code::DeadlineExceeded)
        })
        .await;
        assert_eq!(result.unwrap_err().code(), Code::DeadlineExceeded);
        assert!(counter.load(Ordering::SeqCst) > 1);
    }
}
