pub mod app;
pub mod audio;
pub mod classify;
pub mod config;
pub mod detections;
pub mod game;
pub mod session;
mod telemetry;
pub mod terminal_restore;

pub use app::{
    crash_log_path, init_logging, log_debug, log_debug_content, log_file_path, log_panic, App,
    View,
};
pub use session::{RecordingSession, SessionEvent};
pub use telemetry::init_tracing;
