//! Task domain
//!
//! This module holds everything that does not need a terminal:
//! - Task, identifier and priority types
//! - Deadline-remaining text
//! - The in-memory task store and its reducer functions

pub mod deadline;
pub mod error;
pub mod model;
pub mod store;

pub use deadline::{days_until, deadline_remaining};
pub use error::{Result, TaskError};
pub use model::{demo_tasks, format_date, parse_date, IdGenerator, Priority, Task, TaskId};
pub use store::{StoreAction, StoreOutcome, TaskStore, UpdateOutcome};
