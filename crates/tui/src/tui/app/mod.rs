use std::time::Instant;

use ratatui::style::{Color, Style};
use ratatui::widgets::ListState;

use super::buffer::TextBuffer;
use super::constants::*;
use super::helpers::short_id;
use crate::config::AppConfig;
use crate::core::Workspace;
use crate::timer::{TimerMode, TimerState};

mod commands;
mod input;
mod render;
#[cfg(test)]
mod tests;

use commands::Suggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    AddTask,
    EditTask,
    EditDuration,
    Command,
    Help,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: now,
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

/// A task that just crossed the open/done boundary, highlighted until it settles.
#[derive(Debug, Clone)]
struct Settling {
    task_id: String,
    since: Instant,
}

pub(crate) struct App {
    config: AppConfig,
    workspace: Workspace,
    selected: usize,
    list_state: ListState,
    input_mode: InputMode,
    input: TextBuffer,
    editing_task_id: Option<String>,
    editing_mode: Option<TimerMode>,
    suggestions: Vec<Suggestion>,
    suggestion_index: usize,
    status: Option<StatusMessage>,
    settling: Option<Settling>,
    pending_bells: u32,
    now: Instant,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: AppConfig) -> Self {
        let mut workspace = Workspace::from_settings(config.settings());
        workspace.refresh_clock(&chrono::Local::now());
        Self {
            config,
            workspace,
            selected: 0,
            list_state: ListState::default(),
            input_mode: InputMode::Normal,
            input: TextBuffer::new(),
            editing_task_id: None,
            editing_mode: None,
            suggestions: Vec::new(),
            suggestion_index: 0,
            status: None,
            settling: None,
            pending_bells: 0,
            now: Instant::now(),
            should_quit: false,
        }
    }

    pub(crate) fn on_tick(&mut self, now: Instant) {
        self.now = now;
        let report = self.workspace.poll(now);
        self.pending_bells += report.cues;
        self.workspace.refresh_clock(&chrono::Local::now());

        if let Some(status) = &self.status {
            if now.saturating_duration_since(status.created_at) > STATUS_TTL {
                self.status = None;
            }
        }
        if let Some(settling) = &self.settling {
            if now.saturating_duration_since(settling.since) >= SETTLE_DELAY {
                self.settling = None;
            }
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Audible cues owed to the terminal since the last call.
    pub(crate) fn take_bells(&mut self) -> u32 {
        std::mem::take(&mut self.pending_bells)
    }

    fn sync_selection(&mut self) {
        let len = self.workspace.tasks().len();
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            if self.selected >= len {
                self.selected = len - 1;
            }
            self.list_state.select(Some(self.selected));
        }
    }

    fn select_next(&mut self) {
        let len = self.workspace.tasks().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.list_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.workspace.tasks().is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        self.list_state.select(Some(self.selected));
    }

    fn selected_task_id(&self) -> Option<String> {
        self.workspace
            .tasks()
            .as_slice()
            .get(self.selected)
            .map(|task| task.id.clone())
    }

    fn toggle_timer(&mut self) {
        let state = self.workspace.toggle_timer(self.now);
        self.set_status_info(match state {
            TimerState::Running => "Timer running",
            TimerState::Idle => "Timer paused",
        });
    }

    fn select_mode(&mut self, mode: TimerMode) {
        self.workspace.select_mode(mode);
        self.set_status_info(format!("{} ready", mode.label()));
    }

    fn begin_duration_edit(&mut self) {
        let mode = self.workspace.timer().mode();
        let minutes = self.workspace.timer().durations().minutes_for(mode);
        self.input.set(minutes.to_string());
        self.editing_mode = Some(mode);
        self.input_mode = InputMode::EditDuration;
        self.set_status_info(STATUS_ENTER_DURATION);
    }

    /// Invalid minutes revert the field to the stored value and keep the editor open.
    fn apply_duration_edit(&mut self) {
        let Some(mode) = self.editing_mode else {
            self.input_mode = InputMode::Normal;
            return;
        };

        match self.workspace.configure_duration(mode, self.input.as_str()) {
            Ok(seconds) => {
                self.editing_mode = None;
                self.input.clear();
                self.input_mode = InputMode::Normal;
                self.set_status_info(format!("{} set to {} min", mode.label(), seconds / 60));
            }
            Err(_) => {
                let minutes = self.workspace.timer().durations().minutes_for(mode);
                self.input.set(minutes.to_string());
            }
        }
    }

    fn cancel_input(&mut self) {
        self.editing_task_id = None;
        self.editing_mode = None;
        self.input.clear();
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    fn begin_add(&mut self) {
        self.input.clear();
        self.input_mode = InputMode::AddTask;
        self.set_status_info(STATUS_ENTER_ADD);
    }

    fn add_task(&mut self) {
        let label = self.input.as_str().to_string();
        self.input.clear();
        self.input_mode = InputMode::Normal;
        self.status = None;

        if let Some(outcome) = self.workspace.add_task(&label) {
            self.selected = outcome.position;
            self.sync_selection();
            self.set_status_info(format!("Added task #{}", short_id(&outcome.id)));
        }
    }

    fn begin_edit_selected(&mut self) {
        let Some(task) = self.workspace.tasks().as_slice().get(self.selected).cloned() else {
            self.set_status_info("Nothing to edit");
            return;
        };
        self.input.set(task.label);
        self.editing_task_id = Some(task.id);
        self.input_mode = InputMode::EditTask;
        self.set_status_info(STATUS_ENTER_EDIT);
    }

    fn apply_task_edit(&mut self) {
        if let Some(id) = self.editing_task_id.take() {
            let label = self.input.as_str().to_string();
            self.rename_task(&id, &label);
        }
        self.input.clear();
        self.input_mode = InputMode::Normal;
    }

    fn rename_task(&mut self, id: &str, label: &str) {
        if self.workspace.edit_task(id, label) {
            self.set_status_info("Task renamed");
        } else {
            self.status = None;
        }
    }

    fn toggle_selected(&mut self) {
        match self.selected_task_id() {
            Some(id) => self.toggle_task(&id),
            None => self.set_status_info("Nothing to complete"),
        }
    }

    fn toggle_task(&mut self, id: &str) {
        let Some(position) = self.workspace.toggle_task(id) else {
            self.set_status_error("Task not found");
            return;
        };
        self.selected = position;
        self.sync_selection();
        self.settling = Some(Settling {
            task_id: id.to_string(),
            since: self.now,
        });
        let done = self
            .workspace
            .tasks()
            .get(id)
            .is_some_and(|task| task.completed);
        self.set_status_info(if done {
            "Marked task done"
        } else {
            "Reopened task"
        });
    }

    fn delete_selected(&mut self) {
        match self.selected_task_id() {
            Some(id) => self.delete_task(&id),
            None => self.set_status_info("Nothing to delete"),
        }
    }

    fn delete_task(&mut self, id: &str) {
        if self.workspace.delete_task(id).is_some() {
            self.sync_selection();
            self.set_status_info("Deleted task 🗑️");
        } else {
            self.set_status_error("Task not found");
        }
    }

    fn toggle_music(&mut self) {
        if !self.workspace.toggle_music() {
            self.set_status_error(STATUS_MUSIC_NOT_READY);
        }
    }

    fn next_track(&mut self) {
        if !self.workspace.next_track() {
            self.set_status_error(STATUS_MUSIC_NOT_READY);
        }
    }

    fn previous_track(&mut self) {
        if !self.workspace.previous_track() {
            self.set_status_error(STATUS_MUSIC_NOT_READY);
        }
    }

    fn acknowledge_alert(&mut self) {
        if self.workspace.acknowledge_alert() {
            self.set_status_info("Break time? Pick a mode with 1/2/3");
        }
    }

    fn show_help_overlay(&mut self) {
        self.input_mode = InputMode::Help;
        self.set_status_info(STATUS_HELP);
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info, self.now));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error, self.now));
    }
}
