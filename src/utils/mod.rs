mod command;
mod format;

pub use command::{run_command_with_input, run_command_with_timeout};
pub use format::{fit_text, take_width, text_width};
