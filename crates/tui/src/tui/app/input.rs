use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::timer::TimerMode;
use crate::tui::constants::STATUS_COMMAND_PALETTE;

use super::{App, InputMode};

#[derive(Debug, Clone, Copy)]
pub(crate) enum NormalAction {
    Quit,
    ToggleTimer,
    SelectMode(TimerMode),
    EditDuration,
    AddTask,
    EditTask,
    ToggleTask,
    DeleteTask,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    ToggleMusic,
    NextTrack,
    PrevTrack,
    EnterCommand,
    ShowHelp,
}

impl NormalAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char(' ') => Some(Self::ToggleTimer),
            KeyCode::Char('1') => Some(Self::SelectMode(TimerMode::Pomodoro)),
            KeyCode::Char('2') => Some(Self::SelectMode(TimerMode::Short)),
            KeyCode::Char('3') => Some(Self::SelectMode(TimerMode::Long)),
            KeyCode::Char('c') => Some(Self::EditDuration),
            KeyCode::Char('a') => Some(Self::AddTask),
            KeyCode::Char('e') => Some(Self::EditTask),
            KeyCode::Char('x') | KeyCode::Enter => Some(Self::ToggleTask),
            KeyCode::Char('d') | KeyCode::Delete => Some(Self::DeleteTask),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::End => Some(Self::SelectLast),
            KeyCode::Char('p') => Some(Self::ToggleMusic),
            KeyCode::Char('n') => Some(Self::NextTrack),
            KeyCode::Char('b') => Some(Self::PrevTrack),
            KeyCode::Char('/') => Some(Self::EnterCommand),
            KeyCode::Char('?') | KeyCode::Char('h') => Some(Self::ShowHelp),
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        self.now = now;

        // the time's-up popup swallows the first key, whatever it is
        if self.workspace.alert().is_raised() {
            self.acknowledge_alert();
            return Ok(());
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::AddTask | InputMode::EditTask | InputMode::EditDuration => {
                self.handle_text_mode(key)
            }
            InputMode::Command => self.handle_command_mode(key),
            InputMode::Help => self.handle_help_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action);
        }
        Ok(())
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        match action {
            NormalAction::Quit => self.should_quit = true,
            NormalAction::ToggleTimer => self.toggle_timer(),
            NormalAction::SelectMode(mode) => self.select_mode(mode),
            NormalAction::EditDuration => self.begin_duration_edit(),
            NormalAction::AddTask => self.begin_add(),
            NormalAction::EditTask => self.begin_edit_selected(),
            NormalAction::ToggleTask => self.toggle_selected(),
            NormalAction::DeleteTask => self.delete_selected(),
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
            NormalAction::SelectFirst => {
                if !self.workspace.tasks().is_empty() {
                    self.selected = 0;
                    self.list_state.select(Some(self.selected));
                }
            }
            NormalAction::SelectLast => {
                let len = self.workspace.tasks().len();
                if len > 0 {
                    self.selected = len - 1;
                    self.list_state.select(Some(self.selected));
                }
            }
            NormalAction::ToggleMusic => self.toggle_music(),
            NormalAction::NextTrack => self.next_track(),
            NormalAction::PrevTrack => self.previous_track(),
            NormalAction::EnterCommand => {
                self.input_mode = InputMode::Command;
                self.input.set("/");
                self.update_command_suggestions();
                self.set_status_info(STATUS_COMMAND_PALETTE);
            }
            NormalAction::ShowHelp => self.show_help_overlay(),
        }
    }

    /// Shared line editing for the add, rename, and minutes prompts.
    fn handle_text_mode(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => match self.input_mode {
                InputMode::AddTask => self.add_task(),
                InputMode::EditTask => self.apply_task_edit(),
                InputMode::EditDuration => self.apply_duration_edit(),
                _ => {}
            },
            KeyCode::Esc => self.cancel_input(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Char(c) => self.input.insert_char(c),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
        Ok(())
    }

    fn handle_help_mode(&mut self, key: KeyEvent) -> Result<()> {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('h')
        ) {
            self.input_mode = InputMode::Normal;
            self.status = None;
        }
        Ok(())
    }

    fn handle_command_mode(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => {
                if let Some(s) = self.suggestions.get(self.suggestion_index) {
                    let typed = self.input.as_str();
                    // a completion that still wants arguments fills in instead of running
                    if s.fill.ends_with(' ')
                        && typed != s.fill
                        && s.fill.starts_with(typed.trim_end())
                    {
                        self.input.set(s.fill.clone());
                        self.update_command_suggestions();
                        return Ok(());
                    }
                    if !s.fill.ends_with(' ') {
                        self.input.set(s.fill.clone());
                    }
                }
                self.run_command()
            }
            KeyCode::Esc => {
                self.finish_command();
                self.status = None;
                Ok(())
            }
            KeyCode::Backspace => {
                self.input.backspace();
                self.update_command_suggestions();
                Ok(())
            }
            KeyCode::Char(c) => {
                self.input.insert_char(c);
                self.update_command_suggestions();
                Ok(())
            }
            KeyCode::Delete => {
                self.input.delete_char();
                self.update_command_suggestions();
                Ok(())
            }
            KeyCode::Tab | KeyCode::Right => {
                self.accept_suggestion();
                Ok(())
            }
            KeyCode::Up => {
                if !self.suggestions.is_empty() {
                    if self.suggestion_index == 0 {
                        self.suggestion_index = self.suggestions.len() - 1;
                    } else {
                        self.suggestion_index -= 1;
                    }
                }
                Ok(())
            }
            KeyCode::Down => {
                if !self.suggestions.is_empty() {
                    self.suggestion_index = (self.suggestion_index + 1) % self.suggestions.len();
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
