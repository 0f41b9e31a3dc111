//! CLI command implementations

pub mod config;
pub mod definition;
pub mod list;

pub use definition::{Cli, Commands, GlobalArgs};

use anyhow::Result;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::Config;

/// Load the config file and apply command line overrides on top of it.
pub fn resolve_config(args: &GlobalArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
    }
    if args.empty {
        config.seed_demo_tasks = false;
        config.tasks.clear();
    }
    if args.no_animations {
        config.animations = false;
    }

    Ok(config)
}

/// Shorten `s` to at most `max` display columns, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }

    let (budget, suffix) = if max <= 3 { (max, "") } else { (max - 3, "...") };
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(suffix);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_equal_to_max() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_longer_than_max() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_with_small_max() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hello", 1), "h");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Viết báo cáo tuần", 8), "Viết ...");
        assert_eq!(truncate("日本語テキスト", 7), "日本...");
    }

    #[test]
    fn test_resolve_config_overrides() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "theme = \"paper\"\nanimations = true\n").unwrap();

        let args = GlobalArgs {
            config: Some(path),
            theme: Some("phosphor".to_string()),
            empty: true,
            no_animations: true,
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.theme, "phosphor");
        assert!(!config.animations);
        assert!(!config.seed_demo_tasks);
    }

    #[test]
    fn test_resolve_config_keeps_file_values() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "theme = \"paper\"\n").unwrap();

        let args = GlobalArgs {
            config: Some(path),
            ..GlobalArgs::default()
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.theme, "paper");
        assert!(config.animations);
    }
}
