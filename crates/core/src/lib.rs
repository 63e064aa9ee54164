pub mod alert;
pub mod clock;
pub mod commands;
pub mod config;
pub mod music;
pub mod repeater;
pub mod services;
pub mod tasks;
pub mod timer;

pub use alert::CompletionAlert;
pub use clock::Clock;
pub use commands::{describe_config, ConfigReport};
pub use config::{AppConfig, Settings};
pub use music::{MusicBackend, MusicPanel, PlayerEvent, PlaylistDeck};
pub use repeater::Repeater;
pub use services::{PollReport, Workspace};
pub use tasks::{Task, TaskList};
pub use timer::{Durations, TimerMode, TimerSession, TimerState};
