use chrono::{DateTime, Local, TimeZone, Timelike};

/// Wall clock shown beside the timer. Only the last render is kept.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    text: String,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Re-render from `now`; returns `true` if the displayed text changed.
    pub fn refresh<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> bool {
        let rendered = format_clock(now);
        if rendered == self.text {
            return false;
        }
        self.text = rendered;
        true
    }

    pub fn refresh_local(&mut self) -> bool {
        self.refresh(&Local::now())
    }
}

pub fn format_clock<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    format!("{:02}:{:02}", now.hour(), now.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn renders_zero_padded_hours_and_minutes() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 59).unwrap();
        assert_eq!(format_clock(&now), "07:05");
    }

    #[test]
    fn refresh_reports_changes_once_per_minute() {
        let mut clock = Clock::new();
        let first = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 1).unwrap();
        let same_minute = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 45).unwrap();
        let next_day = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();

        assert!(clock.refresh(&first));
        assert!(!clock.refresh(&same_minute));
        assert!(clock.refresh(&next_day));
        assert_eq!(clock.text(), "00:00");
    }

    #[test]
    fn uses_the_timestamp_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = Utc
            .with_ymd_and_hms(2024, 3, 9, 22, 30, 0)
            .unwrap()
            .with_timezone(&offset);
        assert_eq!(format_clock(&now), "00:30");
    }
}
