//! Deadline-remaining text

use chrono::NaiveDate;

/// Signed whole-day distance from `today` to `deadline`.
///
/// Works on calendar dates so the result never flips around midnight.
pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    deadline.signed_duration_since(today).num_days()
}

fn plural_days(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

/// Human text for how much time is left before a deadline.
pub fn deadline_remaining(deadline: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(deadline) = deadline else {
        return String::new();
    };

    let diff = days_until(deadline, today);
    if diff > 0 {
        format!("{} remaining", plural_days(diff))
    } else if diff == 0 {
        "due today".to_string()
    } else {
        format!("overdue by {}", plural_days(diff.abs()))
    }
}
