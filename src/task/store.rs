//! In-memory task store
//!
//! Mutations are pure functions from one snapshot to the next. `TaskStore`
//! holds the current snapshot and swaps it on every dispatch, so a reader that
//! cloned the previous snapshot keeps seeing it unchanged.

use std::sync::Arc;
use tracing::{debug, warn};

use super::model::{Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Replaced,
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    Add(Task),
    Update(Task),
    Delete(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Added,
    Updated(UpdateOutcome),
    Deleted(usize),
}

/// Append `task` at the end.
pub fn add(tasks: &[Task], task: Task) -> Vec<Task> {
    let mut next = Vec::with_capacity(tasks.len() + 1);
    next.extend_from_slice(tasks);
    next.push(task);
    next
}

/// Replace the first task whose id matches `task.id`.
pub fn update(tasks: &[Task], task: Task) -> (Vec<Task>, UpdateOutcome) {
    match tasks.iter().position(|t| t.id == task.id) {
        Some(index) => {
            let mut next = tasks.to_vec();
            next[index] = task;
            (next, UpdateOutcome::Replaced)
        }
        None => (tasks.to_vec(), UpdateOutcome::NotFound),
    }
}

/// Drop every task with the given id. Returns how many were removed.
pub fn delete(tasks: &[Task], id: &TaskId) -> (Vec<Task>, usize) {
    let next: Vec<Task> = tasks.iter().filter(|t| &t.id != id).cloned().collect();
    let removed = tasks.len() - next.len();
    (next, removed)
}

pub fn reduce(tasks: &[Task], action: StoreAction) -> (Vec<Task>, StoreOutcome) {
    match action {
        StoreAction::Add(task) => (add(tasks, task), StoreOutcome::Added),
        StoreAction::Update(task) => {
            let (next, outcome) = update(tasks, task);
            (next, StoreOutcome::Updated(outcome))
        }
        StoreAction::Delete(id) => {
            let (next, removed) = delete(tasks, &id);
            (next, StoreOutcome::Deleted(removed))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Arc<[Task]>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: tasks.into(),
        }
    }

    /// Current snapshot. Cheap to clone, never mutated in place.
    pub fn snapshot(&self) -> Arc<[Task]> {
        Arc::clone(&self.tasks)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    pub fn dispatch(&mut self, action: StoreAction) -> StoreOutcome {
        let (next, outcome) = reduce(&self.tasks, action);
        match outcome {
            StoreOutcome::Updated(UpdateOutcome::NotFound) => {
                warn!("Update for unknown task id ignored");
            }
            _ => debug!(?outcome, len = next.len(), "Task store updated"),
        }
        self.tasks = next.into();
        outcome
    }

    pub fn add(&mut self, task: Task) {
        self.dispatch(StoreAction::Add(task));
    }

    pub fn update(&mut self, task: Task) -> UpdateOutcome {
        match self.dispatch(StoreAction::Update(task)) {
            StoreOutcome::Updated(outcome) => outcome,
            _ => UpdateOutcome::NotFound,
        }
    }

    pub fn delete(&mut self, id: &TaskId) -> usize {
        match self.dispatch(StoreAction::Delete(id.clone())) {
            StoreOutcome::Deleted(removed) => removed,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::model::Priority;

    fn task(id: &str, label: &str) -> Task {
        Task::new(TaskId::from(id), label)
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_add_appends_in_order() {
        let tasks = add(&[], task("a", "A"));
        let tasks = add(&tasks, task("b", "B"));
        let tasks = add(&tasks, task("c", "C"));
        assert_eq!(ids(&tasks), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_leaves_input_untouched() {
        let before = vec![task("a", "A")];
        let after = add(&before, task("b", "B"));
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let tasks = vec![task("a", "A"), task("b", "B"), task("c", "C")];
        let edited = task("b", "Edited").with_priority(Priority::High);
        let (next, outcome) = update(&tasks, edited.clone());

        assert_eq!(outcome, UpdateOutcome::Replaced);
        assert_eq!(next[1], edited);
        assert_eq!(next[0], tasks[0]);
        assert_eq!(next[2], tasks[2]);
        assert_eq!(ids(&next), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_update_only_first_match() {
        let tasks = vec![task("a", "first"), task("a", "second")];
        let (next, _) = update(&tasks, task("a", "new"));
        assert_eq!(next[0].label, "new");
        assert_eq!(next[1].label, "second");
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let tasks = vec![task("a", "A"), task("b", "B")];
        let (next, outcome) = update(&tasks, task("zzz", "ghost"));
        assert_eq!(outcome, UpdateOutcome::NotFound);
        assert_eq!(next, tasks);
    }

    #[test]
    fn test_delete_removes_matching() {
        let tasks = vec![task("a", "A"), task("b", "B"), task("c", "C")];
        let (next, removed) = delete(&tasks, &TaskId::from("b"));
        assert_eq!(removed, 1);
        assert_eq!(ids(&next), vec!["a", "c"]);
    }

    #[test]
    fn test_delete_removes_all_duplicates() {
        let tasks = vec![task("a", "A"), task("x", "1"), task("b", "B"), task("x", "2")];
        let (next, removed) = delete(&tasks, &TaskId::from("x"));
        assert_eq!(removed, 2);
        assert_eq!(ids(&next), vec!["a", "b"]);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let tasks = vec![task("a", "A")];
        let (next, removed) = delete(&tasks, &TaskId::from("nope"));
        assert_eq!(removed, 0);
        assert_eq!(next, tasks);
    }

    #[test]
    fn test_reduce_outcomes() {
        let (tasks, outcome) = reduce(&[], StoreAction::Add(task("a", "A")));
        assert_eq!(outcome, StoreOutcome::Added);

        let (tasks, outcome) = reduce(&tasks, StoreAction::Update(task("a", "B")));
        assert_eq!(outcome, StoreOutcome::Updated(UpdateOutcome::Replaced));

        let (tasks, outcome) = reduce(&tasks, StoreAction::Delete(TaskId::from("a")));
        assert_eq!(outcome, StoreOutcome::Deleted(1));
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_store_snapshot_is_copy_on_write() {
        let mut store = TaskStore::new(vec![task("a", "A")]);
        let before = store.snapshot();

        store.add(task("b", "B"));
        store.update(task("a", "changed"));

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].label, "A");
        assert_eq!(store.len(), 2);
        assert_eq!(store.tasks()[0].label, "changed");
    }

    #[test]
    fn test_store_reports_outcomes() {
        let mut store = TaskStore::new(vec![task("a", "A")]);
        assert_eq!(store.update(task("missing", "x")), UpdateOutcome::NotFound);
        assert_eq!(store.update(task("a", "y")), UpdateOutcome::Replaced);
        assert_eq!(store.delete(&TaskId::from("missing")), 0);
        assert_eq!(store.delete(&TaskId::from("a")), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_lookup() {
        let store = TaskStore::new(vec![task("a", "A"), task("b", "B")]);
        assert_eq!(store.position(&TaskId::from("b")), Some(1));
        assert_eq!(store.get(&TaskId::from("a")).map(|t| t.label.as_str()), Some("A"));
        assert!(store.get(&TaskId::from("c")).is_none());
    }
}
