use std::time::{Duration, Instant};

use crate::repeater::Repeater;

/// How often the audible cue repeats while the alert is up.
pub const ALERT_REPEAT: Duration = Duration::from_secs(2);

pub const ALERT_MESSAGE: &str = "Time's up!";

/// Completion signal: raised when a countdown finishes, lowered by the user.
#[derive(Debug, Clone)]
pub struct CompletionAlert {
    raised_at: Option<Instant>,
    cue: Repeater,
}

impl Default for CompletionAlert {
    fn default() -> Self {
        Self {
            raised_at: None,
            cue: Repeater::new(ALERT_REPEAT),
        }
    }
}

impl CompletionAlert {
    pub fn is_raised(&self) -> bool {
        self.raised_at.is_some()
    }

    pub fn raised_at(&self) -> Option<Instant> {
        self.raised_at
    }

    /// Raising an alert that is already up keeps the original timestamp.
    pub fn raise(&mut self, now: Instant) {
        if self.raised_at.is_some() {
            return;
        }
        self.raised_at = Some(now);
        self.cue.arm(now);
    }

    /// Returns `true` if an alert was actually lowered.
    pub fn acknowledge(&mut self) -> bool {
        self.cue.cancel();
        self.raised_at.take().is_some()
    }

    /// Number of cue repeats due by `now`; always zero while lowered.
    pub fn take_cues(&mut self, now: Instant) -> u32 {
        if self.raised_at.is_none() {
            return 0;
        }
        self.cue.take_due(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_cue_until_acknowledged() {
        let start = Instant::now();
        let mut alert = CompletionAlert::default();
        alert.raise(start);
        alert.raise(start + Duration::from_secs(1));

        assert_eq!(alert.raised_at(), Some(start));
        assert_eq!(alert.take_cues(start + Duration::from_secs(5)), 2);
        assert!(alert.acknowledge());
        assert!(!alert.acknowledge());
        assert_eq!(alert.take_cues(start + Duration::from_secs(60)), 0);
    }
}
