//! todo-cards library - task store, configuration and terminal UI

pub mod cli;
pub mod config;
pub mod task;
pub mod tui;
