pub use studyspot_tui::cli;
pub use studyspot_tui::commands;
pub use studyspot_tui::config;
pub use studyspot_tui::logging;
pub use studyspot_tui::tui;
pub use studyspot_tui::AppConfig;

pub use studyspot_core as core;
pub use studyspot_core::music;
pub use studyspot_core::tasks;
pub use studyspot_core::timer;
