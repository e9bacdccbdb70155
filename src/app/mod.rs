//! Application state and the file logging shared by the terminal front-end.

mod logging;
mod state;
#[cfg(test)]
mod tests;

pub use logging::{
    crash_log_path, init_logging, log_debug, log_debug_content, log_file_path, log_panic,
};
pub use state::{App, View};
