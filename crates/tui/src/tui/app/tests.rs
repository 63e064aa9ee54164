use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use rstest::rstest;
use tempfile::TempDir;

use super::{App, InputMode};
use crate::config::AppConfig;
use crate::timer::TimerMode;
use crate::tui::helpers::{centered_rect, normalize_task_id, short_id};

fn test_app() -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::from_data_dir(dir.path().to_path_buf()).unwrap();
    (dir, App::new(config))
}

fn press(app: &mut App, code: KeyCode, now: Instant) {
    app.on_key(KeyEvent::new(code, KeyModifiers::NONE), now)
        .unwrap();
}

fn type_text(app: &mut App, text: &str, now: Instant) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch), now);
    }
}

fn add_task(app: &mut App, label: &str, now: Instant) {
    press(app, KeyCode::Char('a'), now);
    type_text(app, label, now);
    press(app, KeyCode::Enter, now);
}

fn run_palette(app: &mut App, command: &str, now: Instant) {
    press(app, KeyCode::Char('/'), now);
    type_text(app, command, now);
    press(app, KeyCode::Enter, now);
}

fn labels(app: &App) -> Vec<String> {
    app.workspace
        .tasks()
        .iter()
        .map(|task| task.label.clone())
        .collect()
}

fn screen_text(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer.get(x, y).symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn short_break_runs_to_completion_and_alerts() {
    let (_dir, mut app) = test_app();
    let start = Instant::now();

    press(&mut app, KeyCode::Char('2'), start);
    press(&mut app, KeyCode::Char('c'), start);
    press(&mut app, KeyCode::Backspace, start);
    type_text(&mut app, "1", start);
    press(&mut app, KeyCode::Enter, start);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.workspace.timer().display(), "01:00");

    press(&mut app, KeyCode::Char(' '), start);
    assert!(app.workspace.timer().is_running());

    app.on_tick(start + Duration::from_secs(30));
    assert_eq!(app.workspace.timer().display(), "00:30");
    assert_eq!(app.take_bells(), 0);

    app.on_tick(start + Duration::from_secs(60));
    assert!(app.workspace.alert().is_raised());
    assert!(!app.workspace.timer().is_running());
    assert_eq!(app.workspace.timer().mode(), TimerMode::Short);
    assert_eq!(app.workspace.timer().display(), "25:00");
    assert_eq!(app.take_bells(), 1);

    app.on_tick(start + Duration::from_secs(62));
    assert_eq!(app.take_bells(), 1);

    // the dismissing key is not treated as a command
    press(&mut app, KeyCode::Char('q'), start + Duration::from_secs(63));
    assert!(!app.workspace.alert().is_raised());
    assert!(!app.should_quit());

    app.on_tick(start + Duration::from_secs(70));
    assert_eq!(app.take_bells(), 0);
}

#[test]
fn pausing_keeps_the_remaining_time() {
    let (_dir, mut app) = test_app();
    let start = Instant::now();

    press(&mut app, KeyCode::Char(' '), start);
    app.on_tick(start + Duration::from_secs(5));
    press(&mut app, KeyCode::Char(' '), start + Duration::from_secs(5));
    app.on_tick(start + Duration::from_secs(20));

    assert_eq!(app.workspace.timer().display(), "24:55");
    assert!(!app.workspace.timer().is_running());
}

#[rstest]
#[case("0")]
#[case("-3")]
#[case("abc")]
#[case("1000")]
fn invalid_minutes_revert_and_keep_editor_open(#[case] typed: &str) {
    let (_dir, mut app) = test_app();
    let now = Instant::now();

    press(&mut app, KeyCode::Char('c'), now);
    press(&mut app, KeyCode::Backspace, now);
    press(&mut app, KeyCode::Backspace, now);
    type_text(&mut app, typed, now);
    press(&mut app, KeyCode::Enter, now);

    assert_eq!(app.input_mode, InputMode::EditDuration);
    assert_eq!(app.input.as_str(), "25");
    assert_eq!(app.workspace.timer().durations().minutes_for(TimerMode::Pomodoro), 25);

    press(&mut app, KeyCode::Esc, now);
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn completed_tasks_sink_below_open_ones() {
    let (_dir, mut app) = test_app();
    let now = Instant::now();

    add_task(&mut app, "Read chapter", now);
    add_task(&mut app, "Flashcards", now);
    add_task(&mut app, "Email tutor", now);
    assert_eq!(app.selected, 2);

    press(&mut app, KeyCode::Home, now);
    press(&mut app, KeyCode::Char('x'), now);
    assert_eq!(labels(&app), vec!["Flashcards", "Email tutor", "Read chapter"]);
    assert_eq!(app.selected, 2);
    assert_eq!(
        app.settling.as_ref().map(|s| s.task_id.as_str()),
        Some("task-1")
    );

    app.on_tick(now + Duration::from_millis(200));
    assert!(app.settling.is_none());

    add_task(&mut app, "Summarize notes", now);
    assert_eq!(
        labels(&app),
        vec!["Flashcards", "Email tutor", "Summarize notes", "Read chapter"]
    );
    assert_eq!(app.selected, 2);
}

#[test]
fn blank_add_and_blank_rename_are_ignored() {
    let (_dir, mut app) = test_app();
    let now = Instant::now();

    add_task(&mut app, "   ", now);
    assert!(app.workspace.tasks().is_empty());

    add_task(&mut app, "Outline essay", now);
    press(&mut app, KeyCode::Char('e'), now);
    assert_eq!(app.input.as_str(), "Outline essay");
    for _ in 0.."Outline essay".len() {
        press(&mut app, KeyCode::Backspace, now);
    }
    press(&mut app, KeyCode::Enter, now);
    assert_eq!(labels(&app), vec!["Outline essay"]);

    press(&mut app, KeyCode::Char('e'), now);
    type_text(&mut app, " draft", now);
    press(&mut app, KeyCode::Enter, now);
    assert_eq!(labels(&app), vec!["Outline essay draft"]);
}

#[test]
fn deleting_clamps_the_selection() {
    let (_dir, mut app) = test_app();
    let now = Instant::now();

    add_task(&mut app, "One", now);
    add_task(&mut app, "Two", now);
    press(&mut app, KeyCode::Char('d'), now);

    assert_eq!(labels(&app), vec!["One"]);
    assert_eq!(app.selected, 0);

    press(&mut app, KeyCode::Char('d'), now);
    assert!(app.workspace.tasks().is_empty());
    assert_eq!(app.list_state.selected(), None);
}

#[test]
fn palette_commands_drive_the_workspace() {
    let (_dir, mut app) = test_app();
    let now = Instant::now();

    run_palette(&mut app, "add Buy milk", now);
    assert_eq!(labels(&app), vec!["Buy milk"]);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.suggestions.is_empty());
    assert_eq!(app.suggestion_index, 0);
    assert_eq!(app.input.as_str(), "");

    run_palette(&mut app, "duration long 15", now);
    assert_eq!(app.workspace.timer().durations().minutes_for(TimerMode::Long), 15);

    run_palette(&mut app, "mode long", now);
    assert_eq!(app.workspace.timer().mode(), TimerMode::Long);
    assert_eq!(app.workspace.timer().display(), "15:00");

    run_palette(&mut app, "done 1", now);
    assert!(app.workspace.tasks().get("task-1").unwrap().completed);

    run_palette(&mut app, "edit 1 Buy oat milk", now);
    assert_eq!(labels(&app), vec!["Buy oat milk"]);

    run_palette(&mut app, "delete 1", now);
    assert!(app.workspace.tasks().is_empty());

    run_palette(&mut app, "quit", now);
    assert!(app.should_quit());
}

#[test]
fn palette_reports_bad_input() {
    let (_dir, mut app) = test_app();
    let now = Instant::now();

    run_palette(&mut app, "duration short 0", now);
    assert_eq!(app.workspace.timer().durations().minutes_for(TimerMode::Short), 5);
    let status = app.status.as_ref().map(|s| s.text.clone()).unwrap_or_default();
    assert!(status.contains("at least one minute"), "{status}");

    run_palette(&mut app, "frobnicate", now);
    let status = app.status.as_ref().map(|s| s.text.clone()).unwrap_or_default();
    assert!(status.contains("Unknown command"), "{status}");
}

#[test]
fn palette_suggests_modes() {
    let (_dir, mut app) = test_app();
    let now = Instant::now();

    press(&mut app, KeyCode::Char('/'), now);
    type_text(&mut app, "mode s", now);

    let fills: Vec<&str> = app.suggestions.iter().map(|s| s.fill.as_str()).collect();
    assert_eq!(fills, vec!["/mode short"]);
}

#[test]
fn music_keys_follow_the_playlist() {
    let (_dir, mut app) = test_app();
    let now = Instant::now();

    press(&mut app, KeyCode::Char('p'), now);
    app.on_tick(now);
    assert!(app.workspace.music().is_playing());
    assert_eq!(app.workspace.music().track_title(), "Sleep Lofi");

    press(&mut app, KeyCode::Char('n'), now);
    assert_eq!(app.workspace.music().track_title(), "Midnight Study");

    press(&mut app, KeyCode::Char('b'), now);
    press(&mut app, KeyCode::Char('b'), now);
    assert_eq!(app.workspace.music().track_title(), "Rainy Window");

    press(&mut app, KeyCode::Char('p'), now);
    assert!(!app.workspace.music().is_playing());
}

#[test]
fn help_overlay_opens_and_closes() {
    let (_dir, mut app) = test_app();
    let now = Instant::now();

    press(&mut app, KeyCode::Char('?'), now);
    assert_eq!(app.input_mode, InputMode::Help);
    press(&mut app, KeyCode::Esc, now);
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn renders_timer_tasks_and_alert() {
    let (_dir, mut app) = test_app();
    let start = Instant::now();

    add_task(&mut app, "Read chapter", start);
    let screen = screen_text(&mut app);
    assert!(screen.contains("25:00"), "{screen}");
    assert!(screen.contains("[ Start ]"), "{screen}");
    assert!(screen.contains("Read chapter"), "{screen}");
    assert!(screen.contains("Nothing playing"), "{screen}");

    press(&mut app, KeyCode::Char('3'), start);
    press(&mut app, KeyCode::Char(' '), start);
    let screen = screen_text(&mut app);
    assert!(screen.contains("10:00"), "{screen}");
    assert!(screen.contains("[ Pause ]"), "{screen}");

    app.on_tick(start + Duration::from_secs(600));
    let screen = screen_text(&mut app);
    assert!(screen.contains("Time's up!"), "{screen}");
}

#[test]
fn centered_rect_keeps_within_bounds() {
    let area = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };
    let rect = centered_rect(40, 10, area);
    assert_eq!(rect, Rect::new(20, 7, 40, 10));

    let clipped = centered_rect(120, 40, area);
    assert_eq!(clipped, area);
}

#[test]
fn task_ids_shorten_and_normalize() {
    assert_eq!(short_id("task-12"), "12");
    assert_eq!(short_id("12"), "12");
    assert_eq!(normalize_task_id(" 7 "), "task-7");
    assert_eq!(normalize_task_id("task-7"), "task-7");
}
