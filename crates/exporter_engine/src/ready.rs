use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub poll_interval: Duration,
    /// Give up waiting after this long and proceed anyway.
    pub deadline: Duration,
    /// Extra pause once the wait is over, letting the host settle.
    pub settle: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            deadline: Duration::from_secs(30),
            settle: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready { waited: Duration },
    TimedOut { waited: Duration },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready { .. })
    }
}

/// Poll `probe` until it reports ready or the deadline passes. Both outcomes
/// mean "go ahead"; the caller only learns which one happened.
pub fn wait_until_ready(mut probe: impl FnMut() -> bool, policy: &ReadinessPolicy) -> Readiness {
    let started = Instant::now();
    let outcome = loop {
        if probe() {
            break Readiness::Ready {
                waited: started.elapsed(),
            };
        }
        let elapsed = started.elapsed();
        if elapsed >= policy.deadline {
            break Readiness::TimedOut { waited: elapsed };
        }
        thread::sleep(policy.poll_interval.min(policy.deadline - elapsed));
    };
    if !policy.settle.is_zero() {
        thread::sleep(policy.settle);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick(deadline_ms: u64) -> ReadinessPolicy {
        ReadinessPolicy {
            poll_interval: Duration::from_millis(1),
            deadline: Duration::from_millis(deadline_ms),
            settle: Duration::ZERO,
        }
    }

    #[test]
    fn ready_probe_returns_immediately() {
        let mut calls = 0;
        let outcome = wait_until_ready(
            || {
                calls += 1;
                true
            },
            &quick(1_000),
        );
        assert!(outcome.is_ready());
        assert_eq!(calls, 1);
    }

    #[test]
    fn becomes_ready_after_a_few_polls() {
        let mut calls = 0;
        let outcome = wait_until_ready(
            || {
                calls += 1;
                calls == 3
            },
            &quick(5_000),
        );
        assert!(outcome.is_ready());
        assert_eq!(calls, 3);
    }

    #[test]
    fn deadline_ends_the_wait() {
        let outcome = wait_until_ready(|| false, &quick(10));
        match outcome {
            Readiness::TimedOut { waited } => assert!(waited >= Duration::from_millis(10)),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
