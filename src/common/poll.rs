//! Bounded polling with an injectable sleep

use std::time::Duration;

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Probe succeeded on the given 1-based attempt
    Ready { attempt: u32 },
    TimedOut { attempts: u32 },
}

impl PollOutcome {
    #[cfg(test)]
    pub fn is_ready(&self) -> bool {
        matches!(self, PollOutcome::Ready { .. })
    }
}

/// Call `probe` until it returns true or the attempts run out.
///
/// Sleeps only between attempts, never after the last one. A policy with zero
/// attempts still probes once.
pub fn poll_until<F>(policy: RetryPolicy, sleeper: &dyn Sleeper, mut probe: F) -> PollOutcome
where
    F: FnMut(u32) -> bool,
{
    let attempts = policy.attempts.max(1);
    for attempt in 1..=attempts {
        if probe(attempt) {
            return PollOutcome::Ready { attempt };
        }
        if attempt < attempts {
            sleeper.sleep(policy.interval);
        }
    }
    PollOutcome::TimedOut { attempts }
}
