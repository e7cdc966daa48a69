use std::time::Duration;

/// Cancellable gravity schedule.
///
/// While armed, elapsed wall time accumulates and every full interval becomes
/// one due tick. Arming or disarming discards any partial progress, so a
/// schedule that is re-armed after a pause or a speed change starts a fresh
/// period.
///
/// ```
/// use std::time::Duration;
/// use tetris_engine::DropTimer;
///
/// let mut timer = DropTimer::disarmed();
/// timer.accumulate(Duration::from_secs(5));
/// assert!(!timer.take_due());
///
/// timer.arm(Duration::from_millis(300));
/// timer.accumulate(Duration::from_millis(700));
/// assert!(timer.take_due());
/// assert!(timer.take_due());
/// assert!(!timer.take_due());
/// assert_eq!(timer.elapsed(), Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropTimer {
    interval: Option<Duration>,
    elapsed: Duration,
}

impl DropTimer {
    #[must_use]
    pub const fn disarmed() -> Self {
        Self {
            interval: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Starts a fresh period of `interval`.
    ///
    /// A zero interval is treated as disarming, since it would fire endlessly.
    pub fn arm(&mut self, interval: Duration) {
        self.interval = (!interval.is_zero()).then_some(interval);
        self.elapsed = Duration::ZERO;
    }

    pub fn disarm(&mut self) {
        *self = Self::disarmed();
    }

    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        self.interval
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Time accumulated toward the next tick.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Adds wall time. Ignored while disarmed.
    pub fn accumulate(&mut self, elapsed: Duration) {
        if self.is_armed() {
            self.elapsed = self.elapsed.saturating_add(elapsed);
        }
    }

    /// Consumes one interval of accumulated time if a tick is due.
    pub fn take_due(&mut self) -> bool {
        match self.interval {
            Some(interval) if self.elapsed >= interval => {
                self.elapsed -= interval;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_disarmed_never_fires() {
        let mut timer = DropTimer::disarmed();
        timer.accumulate(MS * 10_000);
        assert!(!timer.take_due());
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut timer = DropTimer::disarmed();
        timer.arm(MS * 1000);
        timer.accumulate(MS * 999);
        assert!(!timer.take_due());
        timer.accumulate(MS);
        assert!(timer.take_due());
        assert!(!timer.take_due());
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_rearm_discards_progress() {
        let mut timer = DropTimer::disarmed();
        timer.arm(MS * 1000);
        timer.accumulate(MS * 800);
        timer.arm(MS * 900);
        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert_eq!(timer.interval(), Some(MS * 900));
        timer.accumulate(MS * 800);
        assert!(!timer.take_due());
    }

    #[test]
    fn test_disarm_cancels() {
        let mut timer = DropTimer::disarmed();
        timer.arm(MS * 100);
        timer.accumulate(MS * 250);
        timer.disarm();
        assert!(!timer.is_armed());
        assert!(!timer.take_due());
    }

    #[test]
    fn test_zero_interval_is_disarmed() {
        let mut timer = DropTimer::disarmed();
        timer.arm(Duration::ZERO);
        assert!(!timer.is_armed());
    }
}
