use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound accepted for a single mode, keeps the countdown within `999:59`.
pub const MAX_MINUTES: u32 = 999;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Pomodoro,
    Short,
    Long,
}

impl TimerMode {
    pub const ALL: [TimerMode; 3] = [TimerMode::Pomodoro, TimerMode::Short, TimerMode::Long];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "pomodoro",
            TimerMode::Short => "short",
            TimerMode::Long => "long",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "Pomodoro",
            TimerMode::Short => "Short Break",
            TimerMode::Long => "Long Break",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimerMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pomodoro" | "focus" => Ok(TimerMode::Pomodoro),
            "short" | "short-break" => Ok(TimerMode::Short),
            "long" | "long-break" => Ok(TimerMode::Long),
            other => Err(anyhow!(
                "Unknown timer mode '{}': expected pomodoro|short|long",
                other
            )),
        }
    }
}

impl ValueEnum for TimerMode {
    fn value_variants<'a>() -> &'a [Self] {
        &Self::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// Configured length of each mode, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Durations {
    pub pomodoro: u32,
    pub short: u32,
    pub long: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            pomodoro: 1500,
            short: 300,
            long: 600,
        }
    }
}

impl Durations {
    pub fn from_minutes(pomodoro: u32, short: u32, long: u32) -> Self {
        Self {
            pomodoro: pomodoro * 60,
            short: short * 60,
            long: long * 60,
        }
    }

    pub fn seconds_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Pomodoro => self.pomodoro,
            TimerMode::Short => self.short,
            TimerMode::Long => self.long,
        }
    }

    pub fn minutes_for(&self, mode: TimerMode) -> u32 {
        self.seconds_for(mode) / 60
    }

    fn set_seconds(&mut self, mode: TimerMode, seconds: u32) {
        match mode {
            TimerMode::Pomodoro => self.pomodoro = seconds,
            TimerMode::Short => self.short = seconds,
            TimerMode::Long => self.long = seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("'{0}' is not a whole number of minutes")]
    NotANumber(String),
    #[error("duration must be at least one minute")]
    NotPositive,
    #[error("duration cannot exceed {MAX_MINUTES} minutes")]
    TooLong,
}

/// Parse user-entered minutes. Accepts surrounding whitespace only.
pub fn parse_minutes(raw: &str) -> Result<u32, DurationError> {
    let trimmed = raw.trim();
    let minutes: i64 = trimmed
        .parse()
        .map_err(|_| DurationError::NotANumber(trimmed.to_string()))?;
    if minutes < 1 {
        return Err(DurationError::NotPositive);
    }
    if minutes > i64::from(MAX_MINUTES) {
        return Err(DurationError::TooLong);
    }
    Ok(minutes as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session was not running; nothing changed.
    Ignored,
    Counting { remaining: u32 },
    /// Reached zero. The session is idle again and reset to the pomodoro length.
    Completed,
}

/// The one countdown session. Pure state: the caller owns the one-second schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSession {
    mode: TimerMode,
    durations: Durations,
    remaining_seconds: u32,
    running: bool,
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}

impl TimerSession {
    pub fn new(durations: Durations) -> Self {
        Self {
            mode: TimerMode::Pomodoro,
            durations,
            remaining_seconds: durations.pomodoro,
            running: false,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    /// Returns `true` when the session moved from Idle to Running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        if self.remaining_seconds == 0 {
            self.remaining_seconds = self.durations.seconds_for(self.mode);
        }
        self.running = true;
        tracing::debug!(mode = %self.mode, remaining = self.remaining_seconds, "timer started");
        true
    }

    /// Returns `true` when the session moved from Running to Idle.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        tracing::debug!(mode = %self.mode, remaining = self.remaining_seconds, "timer paused");
        true
    }

    pub fn toggle(&mut self) -> TimerState {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
        self.state()
    }

    pub fn select_mode(&mut self, mode: TimerMode) {
        self.running = false;
        self.mode = mode;
        self.remaining_seconds = self.durations.seconds_for(mode);
        tracing::debug!(mode = %mode, remaining = self.remaining_seconds, "timer mode selected");
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return TickOutcome::Counting {
                remaining: self.remaining_seconds,
            };
        }

        self.running = false;
        self.remaining_seconds = self.durations.pomodoro;
        tracing::info!(mode = %self.mode, "timer completed");
        TickOutcome::Completed
    }

    /// Store a new length for `mode` from user text. On error the stored value is untouched.
    pub fn configure_duration(&mut self, mode: TimerMode, raw: &str) -> Result<u32, DurationError> {
        let minutes = parse_minutes(raw)?;
        let seconds = minutes * 60;
        self.durations.set_seconds(mode, seconds);
        if self.mode == mode && !self.running {
            self.remaining_seconds = seconds;
        }
        tracing::debug!(mode = %mode, minutes, "timer duration configured");
        Ok(seconds)
    }

    pub fn display(&self) -> String {
        format_countdown(self.remaining_seconds)
    }
}

/// Render seconds as `MM:SS`.
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
