/// Non-blocking countdown timer with optional jitter.
///
/// A cooldown is polled, never slept on: `is_finished()` answers "has the
/// configured duration elapsed since the last reset?" and returns right away.
/// Screens use it to rate-limit menu selection, gate player fire, and pace
/// enemy volleys. The jittered variant resamples its effective duration on
/// every `reset()` so enemy fire never settles into a fixed rhythm.

use std::time::{Duration, Instant};

use rand::Rng;

#[derive(Clone, Debug)]
pub struct Cooldown {
    duration_ms: u64,
    variance_ms: u64,
    deadline: Option<Instant>,
}

impl Cooldown {
    pub fn new(duration_ms: u64) -> Self {
        Cooldown { duration_ms, variance_ms: 0, deadline: None }
    }

    pub fn with_variance(duration_ms: u64, variance_ms: u64) -> Self {
        Cooldown { duration_ms, variance_ms, deadline: None }
    }

    /// Start (or restart) the countdown. With variance configured, the
    /// effective duration is `duration ± random(variance)`, sampled now
    /// and clamped at zero.
    pub fn reset(&mut self) {
        let effective_ms = if self.variance_ms == 0 {
            self.duration_ms
        } else {
            let v = self.variance_ms as i64;
            let jitter = rand::thread_rng().gen_range(-v..=v);
            (self.duration_ms as i64 + jitter).max(0) as u64
        };
        self.deadline = Some(Instant::now() + Duration::from_millis(effective_ms));
    }

    /// True once the effective duration has elapsed since the last reset.
    /// A cooldown that was never reset reads as finished.
    pub fn is_finished(&self) -> bool {
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn finished_before_first_reset() {
        let cd = Cooldown::new(10_000);
        assert!(cd.is_finished());
    }

    #[test]
    fn not_finished_immediately_after_reset() {
        let mut cd = Cooldown::new(10_000);
        cd.reset();
        assert!(!cd.is_finished());
    }

    #[test]
    fn finishes_after_duration() {
        let mut cd = Cooldown::new(10);
        cd.reset();
        sleep(Duration::from_millis(25));
        assert!(cd.is_finished());
    }

    #[test]
    fn check_does_not_block() {
        let mut cd = Cooldown::new(5_000);
        cd.reset();
        let before = Instant::now();
        for _ in 0..1_000 {
            assert!(!cd.is_finished());
        }
        assert!(before.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn variance_stays_within_bounds() {
        // Effective duration is in [30, 70]ms; well past the upper bound
        // it must read finished, well before the lower bound it must not.
        for _ in 0..20 {
            let mut cd = Cooldown::with_variance(50, 20);
            cd.reset();
            assert!(!cd.is_finished());
            sleep(Duration::from_millis(90));
            assert!(cd.is_finished());
        }
    }

    #[test]
    fn variance_larger_than_duration_clamps_to_zero() {
        let mut cd = Cooldown::with_variance(5, 100);
        cd.reset();
        sleep(Duration::from_millis(120));
        assert!(cd.is_finished());
    }

    #[test]
    fn reset_rearms_a_finished_cooldown() {
        let mut cd = Cooldown::new(10);
        cd.reset();
        sleep(Duration::from_millis(25));
        assert!(cd.is_finished());
        cd.reset();
        assert!(!cd.is_finished());
    }
}
