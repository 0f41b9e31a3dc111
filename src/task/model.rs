//! Task data model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{Result, TaskError};

/// Canonical textual form of a deadline.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Opaque task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Hands out timestamp identifiers that never repeat within a session.
///
/// Two tasks created in the same millisecond get consecutive values instead
/// of colliding.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator whose next id sorts after every numeric id in `tasks`.
    pub fn seeded_from(tasks: &[Task]) -> Self {
        let mut ids = Self::new();
        for task in tasks {
            ids.observe(&task.id);
        }
        ids
    }

    /// Record an id handed out elsewhere. Non-numeric ids cannot collide
    /// with generated ones and are ignored.
    pub fn observe(&mut self, id: &TaskId) {
        if let Ok(value) = id.as_str().parse::<i64>() {
            self.last = self.last.max(value);
        }
    }

    pub fn next_at(&mut self, now_millis: i64) -> TaskId {
        let value = now_millis.max(self.last + 1);
        self.last = value;
        TaskId(value.to_string())
    }

    pub fn next(&mut self) -> TaskId {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Picker order, most urgent first.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Map a numeric level (3 = high, 2 = medium, 1 = low).
    ///
    /// Anything outside the known levels degrades to `Low`.
    pub fn from_level(level: i64) -> Self {
        match level {
            3 => Self::High,
            2 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn level(&self) -> i64 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Parse priority from text or a numeric level
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" | "3" => Ok(Self::High),
            "medium" | "med" | "m" | "2" => Ok(Self::Medium),
            "low" | "l" | "1" => Ok(Self::Low),
            _ => Err(TaskError::UnknownPriority(s.to_string())),
        }
    }

    /// Digit key shortcut: '3' high, '2' medium, '1' low.
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '3' => Some(Self::High),
            '2' => Some(Self::Medium),
            '1' => Some(Self::Low),
            _ => None,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parse a `DD/MM/YYYY` deadline. Empty text means no deadline.
pub fn parse_date(s: &str) -> Result<Option<NaiveDate>> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| TaskError::InvalidDate(s.to_string()))
}

/// Format a deadline in canonical form, or an empty string when unset.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

mod canonical_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let text = String::deserialize(d)?;
        super::parse_date(&text).map_err(serde::de::Error::custom)
    }
}

/// A to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,

    pub label: String,

    #[serde(default)]
    pub priority: Priority,

    /// Unset deadlines serialize as an empty string
    #[serde(default, with = "canonical_date")]
    pub deadline: Option<NaiveDate>,
}

impl Task {
    pub fn new(id: TaskId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            priority: Priority::default(),
            deadline: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<NaiveDate>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Deadline in canonical `DD/MM/YYYY` form
    pub fn deadline_text(&self) -> String {
        format_date(self.deadline)
    }
}

/// The collection a fresh session starts with.
pub fn demo_tasks() -> Vec<Task> {
    vec![
        Task::new(TaskId::from("1"), "Write the report")
            .with_priority(Priority::High)
            .with_deadline(NaiveDate::from_ymd_opt(2025, 9, 10)),
        Task::new(TaskId::from("2"), "Go to the market")
            .with_priority(Priority::Medium)
            .with_deadline(NaiveDate::from_ymd_opt(2025, 9, 11)),
        Task::new(TaskId::from("3"), "Learn React Native")
            .with_priority(Priority::Low)
            .with_deadline(NaiveDate::from_ymd_opt(2025, 9, 18)),
    ]
}
