pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;

pub use studyspot_core as core;
pub use studyspot_core::config::AppConfig;
pub use studyspot_core::music;
pub use studyspot_core::tasks;
pub use studyspot_core::timer;
