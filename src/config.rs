//! User configuration
//!
//! The config file is optional and read-only: tasks themselves are never
//! written to disk.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::task::{demo_tasks, parse_date, IdGenerator, Priority, Task};

pub const APP_DIR_NAME: &str = "todo-cards";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_true")]
    pub seed_demo_tasks: bool,

    #[serde(default = "default_new_task_label")]
    pub new_task_label: String,

    #[serde(default = "default_true")]
    pub animations: bool,

    #[serde(default)]
    pub toast: ToastConfig,

    /// Starting tasks. When non-empty these replace the demo set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            seed_demo_tasks: true,
            new_task_label: default_new_task_label(),
            animations: true,
            toast: ToastConfig::default(),
            tasks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastPlacement {
    Top,
    #[default]
    Bottom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastConfig {
    #[serde(default = "default_toast_duration_ms")]
    pub duration_ms: u64,

    #[serde(default)]
    pub placement: ToastPlacement,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_duration_ms(),
            placement: ToastPlacement::default(),
        }
    }
}

impl ToastConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    pub label: String,

    #[serde(default = "default_priority_text")]
    pub priority: String,

    #[serde(default)]
    pub deadline: String,
}

fn default_theme() -> String {
    "phosphor".to_string()
}

fn default_true() -> bool {
    true
}

fn default_new_task_label() -> String {
    "New task".to_string()
}

fn default_toast_duration_ms() -> u64 {
    2500
}

fn default_priority_text() -> String {
    "medium".to_string()
}

pub fn get_app_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Cannot find config directory")?;
    Ok(base.join(APP_DIR_NAME))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.toml"))
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build the collection a session starts with.
    pub fn starting_tasks(&self, ids: &mut IdGenerator) -> Result<Vec<Task>> {
        if !self.tasks.is_empty() {
            return self
                .tasks
                .iter()
                .map(|entry| {
                    let priority = Priority::parse(&entry.priority)?;
                    let deadline = parse_date(&entry.deadline)?;
                    Ok(Task::new(ids.next(), &entry.label)
                        .with_priority(priority)
                        .with_deadline(deadline))
                })
                .collect::<crate::task::Result<Vec<_>>>()
                .context("Invalid [[tasks]] entry in config");
        }

        if self.seed_demo_tasks {
            Ok(demo_tasks())
        } else {
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialize_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "phosphor");
        assert!(config.seed_demo_tasks);
        assert!(config.animations);
        assert_eq!(config.new_task_label, "New task");
        assert_eq!(config.toast.duration_ms, 2500);
        assert_eq!(config.toast.placement, ToastPlacement::Bottom);
        assert!(config.tasks.is_empty());
    }

    #[test]
    fn test_config_default_matches_empty_toml() {
        let from_default = Config::default();
        let from_toml: Config = toml::from_str("").unwrap();
        assert_eq!(from_default.theme, from_toml.theme);
        assert_eq!(from_default.new_task_label, from_toml.new_task_label);
        assert_eq!(from_default.toast.duration_ms, from_toml.toast.duration_ms);
    }

    #[test]
    fn test_config_deserialize_partial_toml() {
        let toml = r#"
            theme = "paper"

            [toast]
            placement = "top"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.theme, "paper");
        assert_eq!(config.toast.placement, ToastPlacement::Top);
        // Other fields keep defaults
        assert_eq!(config.toast.duration_ms, 2500);
        assert!(config.seed_demo_tasks);
    }

    #[test]
    fn test_toast_duration() {
        let toast: ToastConfig = toml::from_str("duration_ms = 100").unwrap();
        assert_eq!(toast.duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_starting_tasks_uses_demo_set() {
        let config = Config::default();
        let tasks = config.starting_tasks(&mut IdGenerator::new()).unwrap();
        assert_eq!(tasks.len(), 3);
    }

    #[test]
    fn test_starting_tasks_empty_when_seeding_disabled() {
        let config: Config = toml::from_str("seed_demo_tasks = false").unwrap();
        let tasks = config.starting_tasks(&mut IdGenerator::new()).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_config_tasks_replace_demo_set() {
        let toml = r#"
            [[tasks]]
            label = "Buy milk"
            priority = "high"
            deadline = "01/10/2026"

            [[tasks]]
            label = "Call mom"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let mut ids = IdGenerator::new();
        let tasks = config.starting_tasks(&mut ids).unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].label, "Buy milk");
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].deadline_text(), "01/10/2026");
        assert_eq!(tasks[1].priority, Priority::Medium);
        assert_eq!(tasks[1].deadline, None);
        assert_ne!(tasks[0].id, tasks[1].id);
    }

    #[test]
    fn test_config_task_with_bad_date_is_error() {
        let toml = r#"
            [[tasks]]
            label = "Broken"
            deadline = "tomorrow"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.starting_tasks(&mut IdGenerator::new()).is_err());
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.theme, "phosphor");
    }

    #[test]
    fn test_load_from_malformed_file_is_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "theme = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut config = Config::default();
        config.animations = false;
        let text = config.to_toml().unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert!(!back.animations);
    }
}
