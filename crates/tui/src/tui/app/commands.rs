use anyhow::Result;

use crate::timer::TimerMode;
use crate::tui::constants::COMMAND_HELP;
use crate::tui::helpers::{normalize_task_id, short_id};

use super::{App, InputMode};

#[derive(Debug, Clone)]
pub(crate) struct Suggestion {
    pub(crate) fill: String,
    pub(crate) label: String,
}

impl Suggestion {
    fn new(fill: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            label: label.into(),
        }
    }
}

impl App {
    pub(crate) fn run_command(&mut self) -> Result<()> {
        let raw = self.input.as_str().trim().to_string();
        let Some(body) = raw.strip_prefix('/') else {
            self.set_status_error("Commands must start with '/'");
            self.finish_command();
            return Ok(());
        };
        let mut parts = body.split_whitespace();
        let Some(cmd) = parts.next().map(str::to_ascii_lowercase) else {
            self.set_status_error("Enter a command after '/'");
            self.finish_command();
            return Ok(());
        };
        let rest: Vec<&str> = parts.collect();

        match cmd.as_str() {
            "help" | "h" => {
                self.finish_command();
                self.show_help_overlay();
                self.set_status_info(COMMAND_HELP);
                return Ok(());
            }
            "start" => {
                if self.workspace.start_timer(self.now) {
                    self.set_status_info("Timer running");
                } else {
                    self.set_status_info("Timer already running");
                }
            }
            "pause" | "stop" => {
                if self.workspace.pause_timer() {
                    self.set_status_info("Timer paused");
                } else {
                    self.set_status_info("Timer is not running");
                }
            }
            "mode" => match rest.first().map(|name| name.parse::<TimerMode>()) {
                Some(Ok(mode)) => self.select_mode(mode),
                Some(Err(err)) => self.set_status_error(err.to_string()),
                None => self.set_status_error("Usage: /mode <pomodoro|short|long>"),
            },
            "duration" | "dur" => {
                let (mode, minutes) = match rest.as_slice() {
                    [minutes] => (self.workspace.timer().mode(), *minutes),
                    [mode, minutes] => match mode.parse::<TimerMode>() {
                        Ok(mode) => (mode, *minutes),
                        Err(err) => {
                            self.set_status_error(err.to_string());
                            self.finish_command();
                            return Ok(());
                        }
                    },
                    _ => {
                        self.set_status_error("Usage: /duration [mode] <minutes>");
                        self.finish_command();
                        return Ok(());
                    }
                };
                match self.workspace.configure_duration(mode, minutes) {
                    Ok(seconds) => {
                        self.set_status_info(format!("{} set to {} min", mode.label(), seconds / 60))
                    }
                    Err(err) => self.set_status_error(err.to_string()),
                }
            }
            "add" => {
                if rest.is_empty() {
                    self.set_status_error("Usage: /add <task description>");
                } else {
                    let label = rest.join(" ");
                    self.finish_command();
                    self.input.set(label);
                    self.add_task();
                    return Ok(());
                }
            }
            "edit" => match rest.as_slice() {
                [] => {
                    self.finish_command();
                    self.begin_edit_selected();
                    return Ok(());
                }
                [id] => {
                    let id = normalize_task_id(id);
                    self.finish_command();
                    match self.workspace.tasks().position(&id) {
                        Some(position) => {
                            self.selected = position;
                            self.sync_selection();
                            self.begin_edit_selected();
                        }
                        None => self.set_status_error("Task not found"),
                    }
                    return Ok(());
                }
                [id, text @ ..] => {
                    let id = normalize_task_id(id);
                    if self.workspace.tasks().get(&id).is_some() {
                        self.rename_task(&id, &text.join(" "));
                    } else {
                        self.set_status_error("Task not found");
                    }
                }
            },
            "done" | "toggle" => match rest.first() {
                Some(id) => self.toggle_task(&normalize_task_id(id)),
                None => self.toggle_selected(),
            },
            "delete" | "del" | "rm" => match rest.first() {
                Some(id) => self.delete_task(&normalize_task_id(id)),
                None => self.delete_selected(),
            },
            "play" | "music" => self.toggle_music(),
            "next" => self.next_track(),
            "prev" | "back" => self.previous_track(),
            "quit" | "q" | "exit" => {
                self.should_quit = true;
            }
            unknown => {
                self.set_status_error(format!("Unknown command: {} (try /help)", unknown));
            }
        }

        self.finish_command();
        Ok(())
    }

    pub(crate) fn finish_command(&mut self) {
        self.input.clear();
        self.suggestions.clear();
        self.suggestion_index = 0;
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn update_command_suggestions(&mut self) {
        self.suggestions = build_command_suggestions(self);
        if self.suggestion_index >= self.suggestions.len() {
            self.suggestion_index = 0;
        }
    }

    pub(crate) fn accept_suggestion(&mut self) {
        if let Some(s) = self.suggestions.get(self.suggestion_index) {
            self.input.set(s.fill.clone());
            self.update_command_suggestions();
        }
    }
}

fn build_command_suggestions(app: &App) -> Vec<Suggestion> {
    let raw = app.input.as_str();
    let Some(without) = raw.strip_prefix('/') else {
        return Vec::new();
    };
    let without = without.trim_start();
    let mut tokens = without.split_whitespace();
    let first = tokens.next().unwrap_or("").to_ascii_lowercase();
    let rest = tokens.collect::<Vec<_>>().join(" ");
    let typing_args = without.contains(' ');

    let selected = app
        .workspace
        .tasks()
        .as_slice()
        .get(app.selected)
        .map(|task| short_id(&task.id).to_string());

    if !typing_args {
        let base = vec![
            Suggestion::new("/help", "❓ Help — show available commands"),
            Suggestion::new("/start", "▶️ Start the countdown"),
            Suggestion::new("/pause", "⏸️ Pause the countdown"),
            Suggestion::new("/mode ", "🔁 Switch mode (pomodoro/short/long)"),
            Suggestion::new("/duration ", "⏱️ Set minutes for a mode"),
            Suggestion::new("/add ", "➕ Add a task"),
            Suggestion::new("/edit ", "✏️ Rename a task"),
            Suggestion::new("/done ", "✅ Toggle a task done"),
            Suggestion::new("/delete ", "🗑️ Delete a task"),
            Suggestion::new("/play", "🎵 Play / pause music"),
            Suggestion::new("/next", "⏭️ Next track"),
            Suggestion::new("/prev", "⏮️ Previous track"),
            Suggestion::new("/quit", "🚪 Quit the application"),
        ];
        return base
            .into_iter()
            .filter(|s| first.is_empty() || s.fill[1..].starts_with(&first))
            .collect();
    }

    let partial = rest.trim().to_ascii_lowercase();
    match first.as_str() {
        "mode" => TimerMode::ALL
            .iter()
            .filter(|mode| mode.as_str().starts_with(&partial))
            .map(|mode| Suggestion::new(format!("/mode {}", mode.as_str()), mode.label()))
            .collect(),
        "duration" | "dur" => {
            if partial.contains(' ') {
                return Vec::new();
            }
            TimerMode::ALL
                .iter()
                .filter(|mode| mode.as_str().starts_with(&partial))
                .map(|mode| {
                    let minutes = app.workspace.timer().durations().minutes_for(*mode);
                    Suggestion::new(
                        format!("/duration {} ", mode.as_str()),
                        format!("{} (now {} min)", mode.label(), minutes),
                    )
                })
                .collect()
        }
        "add" => {
            if partial.is_empty() {
                vec![Suggestion::new("/add ", "Enter task details…")]
            } else {
                vec![Suggestion::new(format!("/add {}", rest.trim()), "Add this task")]
            }
        }
        "done" | "toggle" | "delete" | "del" | "rm" | "edit" => {
            let verb = match first.as_str() {
                "done" | "toggle" => "done",
                "edit" => "edit",
                _ => "delete",
            };
            match (partial.is_empty(), selected) {
                (true, Some(id)) => {
                    let fill = if verb == "edit" {
                        format!("/edit {} ", id)
                    } else {
                        format!("/{} {}", verb, id)
                    };
                    vec![Suggestion::new(fill, "Use selected task id")]
                }
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}
