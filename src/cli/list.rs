//! `todo-cards list` command implementation

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use super::GlobalArgs;
use crate::task::{deadline_remaining, IdGenerator, Task};

const TABLE_COL_LABEL: usize = 30;
const TABLE_COL_PRIORITY: usize = 8;
const TABLE_COL_DEADLINE: usize = 12;

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TaskJson<'a> {
    #[serde(flatten)]
    task: &'a Task,
    remaining: String,
}

fn print_table_header() {
    println!(
        "{:<width_label$} {:<width_priority$} {:<width_deadline$} REMAINING",
        "LABEL",
        "PRIORITY",
        "DEADLINE",
        width_label = TABLE_COL_LABEL,
        width_priority = TABLE_COL_PRIORITY,
        width_deadline = TABLE_COL_DEADLINE
    );
    println!(
        "{}",
        "-".repeat(TABLE_COL_LABEL + TABLE_COL_PRIORITY + TABLE_COL_DEADLINE + 20)
    );
}

fn table_row(task: &Task, today: NaiveDate) -> String {
    let label = super::truncate(&task.label, TABLE_COL_LABEL);
    let pad = TABLE_COL_LABEL.saturating_sub(unicode_width::UnicodeWidthStr::width(label.as_str()));
    format!(
        "{}{} {:<width_priority$} {:<width_deadline$} {}",
        label,
        " ".repeat(pad),
        task.priority.label(),
        task.deadline_text(),
        deadline_remaining(task.deadline, today),
        width_priority = TABLE_COL_PRIORITY,
        width_deadline = TABLE_COL_DEADLINE
    )
}

pub async fn run(global: &GlobalArgs, args: ListArgs) -> Result<()> {
    let config = super::resolve_config(global)?;
    let tasks = config.starting_tasks(&mut IdGenerator::new())?;
    let today = chrono::Local::now().date_naive();

    if args.json {
        let rows: Vec<TaskJson> = tasks
            .iter()
            .map(|task| TaskJson {
                task,
                remaining: deadline_remaining(task.deadline, today),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    print_table_header();
    for task in &tasks {
        println!("{}", table_row(task, today));
    }
    println!("\nTotal: {} tasks", tasks.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, TaskId};

    #[test]
    fn test_table_row_columns() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let task = Task::new(TaskId::from("1"), "Ship release")
            .with_priority(Priority::High)
            .with_deadline(NaiveDate::from_ymd_opt(2026, 3, 12));
        let row = table_row(&task, today);

        assert!(row.starts_with("Ship release"));
        assert!(row.contains("High"));
        assert!(row.contains("12/03/2026"));
        assert!(row.ends_with("2 days remaining"));
    }

    #[test]
    fn test_table_row_without_deadline() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let task = Task::new(TaskId::from("1"), "Someday");
        let row = table_row(&task, today);
        assert!(row.contains("Medium"));
        assert!(!row.contains("remaining"));
    }

    #[test]
    fn test_json_row_flattens_task() {
        let task = Task::new(TaskId::from("9"), "Flatten me");
        let row = TaskJson {
            task: &task,
            remaining: String::new(),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["id"], "9");
        assert_eq!(value["label"], "Flatten me");
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["remaining"], "");
    }
}
