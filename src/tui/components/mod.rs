//! TUI components

mod help;
mod text_input;
mod toast;

pub use help::HelpOverlay;
pub use text_input::render_text_field;
pub use toast::{ToastLevel, Toasts};
