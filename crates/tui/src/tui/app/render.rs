use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::core::alert::ALERT_MESSAGE;
use crate::timer::TimerMode;
use crate::tui::constants::APP_VERSION;
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, checkbox, inset_rect, short_id, BG_ACCENT,
    BG_BASE, BG_PANEL, FG_ACCENT,
};

use super::{App, InputMode};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(7),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_mode_tabs(f, chunks[1]);
        self.draw_panels(f, chunks[2]);
        self.draw_tasks(f, chunks[3]);
        self.draw_footer(f, chunks[4]);

        match self.input_mode {
            InputMode::AddTask
            | InputMode::EditTask
            | InputMode::EditDuration
            | InputMode::Command => self.draw_input_overlay(f, size),
            InputMode::Help => self.draw_help_overlay(f, size),
            InputMode::Normal => {}
        }

        if self.workspace.alert().is_raised() {
            self.draw_alert(f, size);
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(area);

        let left_line = Line::from(vec![
            Span::styled(
                format!(" studyspot v{} 📚 ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("— {}", self.workspace.timer().mode().label())),
            Span::raw("  "),
            Span::styled(
                format!("💾 {}", self.config.data_dir().display()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(left_line).style(Style::default().bg(BG_BASE)),
            cols[0],
        );

        let right_line = Line::from(vec![
            Span::styled("🕒 ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} ", self.workspace.clock().text()),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        f.render_widget(
            Paragraph::new(right_line)
                .alignment(Alignment::Right)
                .style(Style::default().bg(BG_BASE)),
            cols[1],
        );
    }

    fn draw_mode_tabs(&self, f: &mut Frame<'_>, area: Rect) {
        let durations = self.workspace.timer().durations();
        let titles: Vec<Line> = TimerMode::ALL
            .iter()
            .enumerate()
            .map(|(i, mode)| {
                Line::from(format!(
                    "{} {} ({}m)",
                    i + 1,
                    mode.label(),
                    durations.minutes_for(*mode)
                ))
            })
            .collect();
        let active = TimerMode::ALL
            .iter()
            .position(|mode| *mode == self.workspace.timer().mode())
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(active)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("Modes"))
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Green)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, area);
    }

    fn draw_panels(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        self.draw_timer(f, cols[0]);
        self.draw_music(f, cols[1]);
    }

    fn draw_timer(&self, f: &mut Frame<'_>, area: Rect) {
        let timer = self.workspace.timer();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("⏱️ Timer"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let (button, button_style) = if timer.is_running() {
            ("[ Pause ]", Style::default().fg(Color::Yellow))
        } else {
            ("[ Start ]", Style::default().fg(Color::Green))
        };
        let countdown = Line::from(vec![
            Span::styled(
                timer.display(),
                Style::default()
                    .fg(FG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(button, button_style.add_modifier(Modifier::BOLD)),
        ]);
        f.render_widget(
            Paragraph::new(countdown).alignment(Alignment::Center),
            rows[0],
        );

        let total = timer.durations().seconds_for(timer.mode()).max(1);
        let elapsed = total.saturating_sub(timer.remaining_seconds());
        let ratio = (f64::from(elapsed) / f64::from(total)).clamp(0.0, 1.0);
        f.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Green).bg(BG_ACCENT))
                .ratio(ratio)
                .label(""),
            rows[1],
        );

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Space start/pause • 1/2/3 mode • c minutes",
                Style::default().fg(Color::DarkGray),
            )))
            .alignment(Alignment::Center),
            rows[2],
        );
    }

    fn draw_music(&self, f: &mut Frame<'_>, area: Rect) {
        let music = self.workspace.music();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("🎵 Music"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));

        let state = if !music.is_ready() {
            Span::styled("loading…", Style::default().fg(Color::DarkGray))
        } else if music.is_playing() {
            Span::styled("▶ playing", Style::default().fg(Color::Green))
        } else {
            Span::styled("⏸ paused", Style::default().fg(Color::Yellow))
        };

        let lines = vec![
            Line::from(Span::styled(
                music.track_title().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(state),
            Line::from(Span::styled(
                music.backend().playlist_url().to_string(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "p play/pause • n next • b prev",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn draw_tasks(&mut self, f: &mut Frame<'_>, area: Rect) {
        let tasks = self.workspace.tasks();
        let title = format!(
            "📝 Tasks ({} open, {} done)",
            tasks.open_count(),
            tasks.completed_count()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(&title))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));

        if tasks.is_empty() {
            let lines = vec![
                Line::from(Span::styled(
                    "No tasks yet",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Press `a` to add one, or type `/add <text>`",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            let inner = block.inner(area);
            f.render_widget(block, area);
            if inner.width == 0 || inner.height == 0 {
                return;
            }
            let content = centered_rect(inner.width.min(60), 2, inner);
            f.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                content,
            );
            return;
        }

        let settling_id = self.settling.as_ref().map(|s| s.task_id.as_str());
        let items: Vec<ListItem> = tasks
            .iter()
            .map(|task| {
                let mut style = if task.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                if settling_id == Some(task.id.as_str()) {
                    style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
                }
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", checkbox(task)), style),
                    Span::styled(
                        format!("#{:<3} ", short_id(&task.id)),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(task.label.clone(), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.style())])
        } else {
            Line::from(vec![Span::raw("Ready")])
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode {
            InputMode::Normal => {
                "timer: space start/pause | 1/2/3 mode | c minutes | tasks: a add ✚ | e edit ✏️ | x done ✅ | d delete 🗑️ | j/k move | music: p play | n/b track | / command ⌨️ | ? help | q quit"
            }
            InputMode::AddTask => "Enter to add ✍️ • Esc to cancel",
            InputMode::EditTask => "Enter to save ✏️ • Esc to cancel",
            InputMode::EditDuration => "Enter to apply ⏱️ • Esc to cancel",
            InputMode::Command => {
                "Up/Down navigate • Tab/Right complete • Enter select/run • Esc cancel"
            }
            InputMode::Help => "Enter/Esc to close ❔",
        };
        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_input_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(10), 80);
        let extra_height = match self.input_mode {
            InputMode::Command => self.suggestions.len().min(8) as u16 + 1,
            _ => 0,
        };
        let popup_area = centered_rect(width, 3 + extra_height, area);
        f.render_widget(Clear, popup_area);

        let title = match self.input_mode {
            InputMode::AddTask => String::from("➕ Add Task"),
            InputMode::EditTask => String::from("✏️ Edit Task"),
            InputMode::EditDuration => format!(
                "⏱️ {} minutes",
                self.editing_mode
                    .unwrap_or_else(|| self.workspace.timer().mode())
                    .label()
            ),
            InputMode::Command => String::from("⌨️ Command"),
            InputMode::Normal | InputMode::Help => String::from("Input"),
        };
        let inner = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(popup_area);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(&title))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let input_area = input_block.inner(inner[0]);
        f.render_widget(input_block, inner[0]);
        f.render_widget(
            Paragraph::new(self.input.as_str()).style(Style::default().bg(BG_PANEL)),
            input_area,
        );
        if input_area.width > 0 {
            let offset = min(self.input.cursor_column() as u16, input_area.width - 1);
            f.set_cursor(input_area.x + offset, input_area.y);
        }

        if self.input_mode == InputMode::Command && inner[1].height > 0 {
            let mut lines: Vec<Line> = vec![Line::from(vec![Span::styled(
                "Suggestions",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )])];
            for (i, s) in self.suggestions.iter().enumerate() {
                let style = if i == self.suggestion_index {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    Span::styled(s.fill.as_str(), style.add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(s.label.as_str(), Style::default().fg(Color::DarkGray)),
                ]));
            }
            f.render_widget(
                Paragraph::new(lines).style(Style::default().bg(BG_PANEL)),
                inner[1],
            );
        }
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 80);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2)).max(10);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("⌨️ Keyboard Reference"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        if inner.width < 3 || inner.height < 3 {
            return;
        }

        let help_lines: Vec<Line> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Line::from(vec![
                    Span::styled(format!("{:<16}", combo), Style::default().fg(Color::Cyan)),
                    Span::raw(desc),
                ])
            })
            .collect();
        f.render_widget(
            Paragraph::new(help_lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }

    fn draw_alert(&self, f: &mut Frame<'_>, area: Rect) {
        let popup_area = centered_rect(36, 5, area);
        f.render_widget(Clear, popup_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("🔔 Alert"))
            .border_style(Style::default().fg(Color::Yellow))
            .style(Style::default().bg(BG_PANEL));
        let lines = vec![
            Line::from(Span::styled(
                ALERT_MESSAGE,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Press any key to dismiss",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center),
            popup_area,
        );
    }
}
