use std::time::Instant;

use chrono::{DateTime, TimeZone};

use crate::alert::CompletionAlert;
use crate::clock::Clock;
use crate::config::Settings;
use crate::music::{MusicBackend, MusicPanel, PlaylistDeck};
use crate::repeater::Repeater;
use crate::tasks::{AddOutcome, Task, TaskList};
use crate::timer::{DurationError, Durations, TickOutcome, TimerMode, TimerSession, TimerState};

/// What happened during one [`Workspace::poll`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    pub ticks: u32,
    pub completed: bool,
    /// Audible cues due for a raised completion alert.
    pub cues: u32,
}

/// All widget state behind one owner. The countdown repeater is kept in step with
/// the timer session so there is never more than one live schedule.
#[derive(Debug, Clone)]
pub struct Workspace<B = PlaylistDeck> {
    timer: TimerSession,
    countdown: Repeater,
    alert: CompletionAlert,
    tasks: TaskList,
    clock: Clock,
    music: MusicPanel<B>,
}

impl Workspace<PlaylistDeck> {
    pub fn from_settings(settings: &Settings) -> Self {
        let deck = PlaylistDeck::new(settings.playlist_url.clone(), settings.tracks.clone());
        let mut workspace = Self::new(settings.durations.to_durations(), deck);
        workspace.select_mode(settings.start_mode);
        workspace
    }
}

impl<B: MusicBackend> Workspace<B> {
    pub fn new(durations: Durations, backend: B) -> Self {
        Self {
            timer: TimerSession::new(durations),
            countdown: Repeater::every_second(),
            alert: CompletionAlert::default(),
            tasks: TaskList::new(),
            clock: Clock::new(),
            music: MusicPanel::new(backend),
        }
    }

    pub fn timer(&self) -> &TimerSession {
        &self.timer
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn music(&self) -> &MusicPanel<B> {
        &self.music
    }

    pub fn music_mut(&mut self) -> &mut MusicPanel<B> {
        &mut self.music
    }

    pub fn alert(&self) -> &CompletionAlert {
        &self.alert
    }

    pub fn countdown_armed(&self) -> bool {
        self.countdown.is_armed()
    }

    pub fn start_timer(&mut self, now: Instant) -> bool {
        let started = self.timer.start();
        if started {
            self.countdown.arm(now);
        }
        started
    }

    pub fn pause_timer(&mut self) -> bool {
        self.countdown.cancel();
        self.timer.pause()
    }

    pub fn toggle_timer(&mut self, now: Instant) -> TimerState {
        if self.timer.is_running() {
            self.pause_timer();
        } else {
            self.start_timer(now);
        }
        self.timer.state()
    }

    pub fn select_mode(&mut self, mode: TimerMode) {
        self.countdown.cancel();
        self.timer.select_mode(mode);
    }

    pub fn configure_duration(&mut self, mode: TimerMode, raw: &str) -> Result<u32, DurationError> {
        self.timer.configure_duration(mode, raw).map_err(|err| {
            tracing::warn!(mode = %mode, input = raw, error = %err, "rejected duration input");
            err
        })
    }

    /// Advance everything time-driven up to `now`.
    pub fn poll(&mut self, now: Instant) -> PollReport {
        let mut report = PollReport::default();

        let due = self.countdown.take_due(now);
        for _ in 0..due {
            match self.timer.tick() {
                TickOutcome::Counting { .. } => report.ticks += 1,
                TickOutcome::Completed => {
                    report.ticks += 1;
                    report.completed = true;
                    self.countdown.cancel();
                    self.alert.raise(now);
                    break;
                }
                TickOutcome::Ignored => {
                    self.countdown.cancel();
                    break;
                }
            }
        }

        if report.completed {
            // the first cue plays on the completing tick itself
            report.cues = 1;
        } else {
            report.cues = self.alert.take_cues(now);
        }

        self.music.sync();
        report
    }

    pub fn acknowledge_alert(&mut self) -> bool {
        self.alert.acknowledge()
    }

    pub fn refresh_clock<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> bool {
        self.clock.refresh(now)
    }

    pub fn add_task(&mut self, label: &str) -> Option<AddOutcome> {
        self.tasks.add_task(label)
    }

    pub fn edit_task(&mut self, id: &str, label: &str) -> bool {
        self.tasks.edit_task(id, label)
    }

    pub fn delete_task(&mut self, id: &str) -> Option<Task> {
        self.tasks.delete_task(id)
    }

    pub fn toggle_task(&mut self, id: &str) -> Option<usize> {
        self.tasks.toggle_complete(id)
    }

    pub fn toggle_music(&mut self) -> bool {
        self.music.toggle_play_pause()
    }

    pub fn next_track(&mut self) -> bool {
        self.music.next_track()
    }

    pub fn previous_track(&mut self) -> bool {
        self.music.previous_track()
    }
}
