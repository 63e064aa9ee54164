use std::time::{Duration, Instant};

/// A cancellable fixed-period schedule driven by explicit instants.
#[derive(Debug, Clone)]
pub struct Repeater {
    period: Duration,
    next_due: Option<Instant>,
}

impl Repeater {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Schedule the first fire one period after `now`, replacing any earlier schedule.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Number of periods elapsed by `now`. Advances the schedule past them.
    /// A zero period never fires.
    pub fn take_due(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        if self.period.is_zero() {
            return 0;
        }
        let mut fired = 0;
        while due <= now {
            fired += 1;
            due += self.period;
        }
        self.next_due = Some(due);
        fired
    }

    /// Time left until the next fire, if armed.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_period_never_fires() {
        let start = Instant::now();
        let mut repeater = Repeater::new(Duration::ZERO);
        repeater.arm(start);

        assert_eq!(repeater.take_due(start), 0);
        assert_eq!(repeater.take_due(start + Duration::from_secs(5)), 0);
        assert!(repeater.is_armed());
    }

    #[test]
    fn fires_nothing_before_first_period() {
        let start = Instant::now();
        let mut repeater = Repeater::every_second();
        repeater.arm(start);

        assert_eq!(repeater.take_due(start + Duration::from_millis(999)), 0);
        assert_eq!(repeater.take_due(start + Duration::from_secs(1)), 1);
    }

    #[test]
    fn catches_up_on_missed_periods() {
        let start = Instant::now();
        let mut repeater = Repeater::every_second();
        repeater.arm(start);

        assert_eq!(repeater.take_due(start + Duration::from_millis(3500)), 3);
        assert_eq!(
            repeater.until_next(start + Duration::from_millis(3500)),
            Some(Duration::from_millis(500))
        );
        assert_eq!(repeater.take_due(start + Duration::from_secs(4)), 1);
    }

    #[test]
    fn cancel_stops_future_fires_and_is_safe_when_idle() {
        let start = Instant::now();
        let mut repeater = Repeater::every_second();
        repeater.cancel();
        repeater.arm(start);
        repeater.cancel();

        assert!(!repeater.is_armed());
        assert_eq!(repeater.take_due(start + Duration::from_secs(10)), 0);
    }

    #[test]
    fn rearming_restarts_the_period() {
        let start = Instant::now();
        let mut repeater = Repeater::every_second();
        repeater.arm(start);
        repeater.arm(start + Duration::from_millis(800));

        assert_eq!(repeater.take_due(start + Duration::from_millis(1500)), 0);
        assert_eq!(repeater.take_due(start + Duration::from_millis(1800)), 1);
    }
}
