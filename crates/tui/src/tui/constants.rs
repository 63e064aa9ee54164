use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);
/// How long a freshly toggled task stays highlighted after it moves.
pub(crate) const SETTLE_DELAY: Duration = Duration::from_millis(150);
pub(crate) const STATUS_TTL: Duration = Duration::from_secs(5);

pub(crate) const COMMAND_HELP: &str = concat!(
    "Commands: /help, /start, /pause, /mode <pomodoro|short|long>, /duration <mode> <min>, ",
    "/add <text>, /edit <id> <text>, /done <id>, /delete <id>, /play, /next, /prev, /quit"
);

pub(crate) const STATUS_ENTER_ADD: &str = "Enter a task name (Esc to cancel)";
pub(crate) const STATUS_ENTER_EDIT: &str =
    "Edit task — Enter to save • empty keeps the old name • Esc to cancel";
pub(crate) const STATUS_ENTER_DURATION: &str = "Minutes for this mode — Enter to apply • Esc to cancel";
pub(crate) const STATUS_COMMAND_PALETTE: &str =
    "Type a /command • Up/Down: navigate • Tab/Right: complete • Enter: run • Esc: cancel";
pub(crate) const STATUS_HELP: &str = "Keyboard reference — Enter/Esc to close";
pub(crate) const STATUS_MUSIC_NOT_READY: &str = "Music player not ready";
