mod workspace;

pub use workspace::{PollReport, Workspace};
