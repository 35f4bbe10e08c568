use std::{collections::VecDeque, time::Duration};

use tokio::time::Instant;

/// Sliding-window admission counter for a single key.
///
/// Admission at any instant reflects exactly the trailing `window` of
/// history: at most `limit` events are admitted in any window-length span.
#[derive(Debug, Clone)]
pub struct Throttle {
    window: Duration,
    limit: usize,
    /// Admission times, oldest first.
    stamps: VecDeque<Instant>,
}

impl Throttle {
    pub fn new(window: Duration, limit: usize) -> Self {
        Self {
            window,
            limit,
            stamps: VecDeque::with_capacity(limit.min(64)),
        }
    }

    /// Try to admit one event now.
    pub fn record(&mut self) -> bool {
        self.record_at(Instant::now())
    }

    /// Try to admit one event at `now`.
    ///
    /// Expired stamps are pruned first; the event is admitted and stamped
    /// only if fewer than `limit` stamps remain.
    pub fn record_at(&mut self, now: Instant) -> bool {
        self.remove_expired_at(now);
        if self.stamps.len() < self.limit {
            self.stamps.push_back(now);
            true
        } else {
            false
        }
    }

    /// Drop every stamp older than `now - window`.
    pub fn remove_expired_elements(&mut self) -> usize {
        self.remove_expired_at(Instant::now())
    }

    /// Same as [`Throttle::remove_expired_elements`] at an explicit instant.
    /// Returns the number of stamps removed.
    pub fn remove_expired_at(&mut self, now: Instant) -> usize {
        let before = self.stamps.len();
        while let Some(oldest) = self.stamps.front() {
            if now.saturating_duration_since(*oldest) > self.window {
                self.stamps.pop_front();
            } else {
                break;
            }
        }
        before - self.stamps.len()
    }

    /// Number of tracked stamps, which may include expired ones until the next prune.
    pub fn queue_len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_immediate_record_is_rejected() {
        let mut t = Throttle::new(Duration::from_secs(2), 2);
        let now = Instant::now();

        let got: Vec<bool> = (0..3).map(|_| t.record_at(now)).collect();
        assert_eq!(got, vec![true, true, false]);
        assert_eq!(t.queue_len(), 2);
    }

    #[test]
    fn stamps_expire_after_window() {
        let mut t = Throttle::new(Duration::from_secs(2), 2);
        let t0 = Instant::now();
        t.record_at(t0);
        t.record_at(t0);

        assert_eq!(t.remove_expired_at(t0 + Duration::from_secs(2)), 0);
        assert_eq!(t.queue_len(), 2);

        assert_eq!(t.remove_expired_at(t0 + Duration::from_millis(2001)), 2);
        assert_eq!(t.queue_len(), 0);
        assert!(t.is_empty());
    }

    #[test]
    fn window_slides_rather_than_resetting() {
        let mut t = Throttle::new(Duration::from_secs(10), 2);
        let t0 = Instant::now();

        assert!(t.record_at(t0));
        assert!(t.record_at(t0 + Duration::from_secs(6)));
        // Only the first stamp has left the window.
        assert!(t.record_at(t0 + Duration::from_secs(11)));
        assert!(!t.record_at(t0 + Duration::from_secs(12)));
        assert!(t.record_at(t0 + Duration::from_secs(17)));
    }

    #[test]
    fn rejection_does_not_stamp() {
        let mut t = Throttle::new(Duration::from_secs(1), 1);
        let t0 = Instant::now();
        assert!(t.record_at(t0));
        for ms in [100, 200, 900] {
            assert!(!t.record_at(t0 + Duration::from_millis(ms)));
        }
        assert_eq!(t.queue_len(), 1);
        assert!(t.record_at(t0 + Duration::from_millis(1001)));
    }

    #[test]
    fn zero_limit_rejects_everything() {
        let mut t = Throttle::new(Duration::from_secs(1), 0);
        assert!(!t.record());
        assert!(t.is_empty());
    }
}
