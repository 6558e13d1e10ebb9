//! Bounded polling for eventually consistent reads.
//!
//! A probe is re-run until it reports [`Attempt::Ready`], fails outright, or
//! the attempt budget is spent. There is no sleep after the final attempt.

use std::fmt::Display;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub initial_interval: Duration,
    pub multiplier: f64,
}

impl PollPolicy {
    pub fn fixed(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            initial_interval: interval,
            multiplier: 1.0,
        }
    }

    pub fn exponential(max_attempts: u32, initial_interval: Duration, multiplier: f64) -> Self {
        Self {
            max_attempts,
            initial_interval,
            multiplier: multiplier.max(1.0),
        }
    }

    /// Sleep after the given 1-based attempt, saturating at `Duration::MAX`.
    pub fn interval_after(&self, attempt: u32) -> Duration {
        if self.initial_interval.is_zero() {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let seconds = self.initial_interval.as_secs_f64() * self.multiplier.powi(exponent);
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    }
}

impl Default for PollPolicy {
    /// Three attempts starting at 3 s and growing by 1.5x.
    fn default() -> Self {
        Self::exponential(3, Duration::from_millis(3_000), 1.5)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T, E> {
    Ready(T),
    Pending,
    Failed(E),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollError<E: Display> {
    #[error("resource not ready after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error("probe failed: {0}")]
    Failed(E),
}

pub fn poll_until<T, E, S, P>(
    policy: &PollPolicy,
    mut sleeper: S,
    mut probe: P,
) -> Result<T, PollError<E>>
where
    E: Display,
    S: FnMut(Duration),
    P: FnMut(u32) -> Attempt<T, E>,
{
    let max_attempts = policy.max_attempts.max(1);
    for attempt in 1..=max_attempts {
        match probe(attempt) {
            Attempt::Ready(value) => return Ok(value),
            Attempt::Failed(error) => return Err(PollError::Failed(error)),
            Attempt::Pending if attempt < max_attempts => sleeper(policy.interval_after(attempt)),
            Attempt::Pending => {}
        }
    }
    Err(PollError::Exhausted {
        attempts: max_attempts,
    })
}

pub fn poll_with_thread_sleep<T, E, P>(policy: &PollPolicy, probe: P) -> Result<T, PollError<E>>
where
    E: Display,
    P: FnMut(u32) -> Attempt<T, E>,
{
    poll_until(policy, std::thread::sleep, probe)
}
