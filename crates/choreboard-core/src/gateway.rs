//! Remote gateway contract and wire formats.
//!
//! The remote store is a spreadsheet-backed endpoint with two operations: a
//! full-state read and a single-mutation append. This module defines the
//! trait seam, the tabular read payload and its transform into domain
//! models, and the `action`-tagged write payload.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChoreboardError, Result};
use crate::household::{Category, Person, Task, WeeklySchedule};

/// Full remote state as the endpoint returns it: each table is a header row
/// followed by data rows of loosely-typed cells.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteSnapshot {
    #[serde(default)]
    pub tasks: Vec<Vec<Value>>,
    #[serde(default)]
    pub schedule: Vec<Vec<Value>>,
}

impl RemoteSnapshot {
    /// Transforms the tasks table into people.
    ///
    /// Rows are `(personName, taskText, completedFlag, category)`. The
    /// header row and rows without a person name are skipped; people are
    /// grouped in first-seen order; a missing category means the default
    /// list.
    pub fn people(&self) -> Vec<Person> {
        let mut people: Vec<Person> = Vec::new();
        for row in self.tasks.iter().skip(1) {
            let Some(name) = cell_text(row.first()) else {
                continue;
            };
            let index = match people.iter().position(|p| p.name == name) {
                Some(index) => index,
                None => {
                    people.push(Person::new(name));
                    people.len() - 1
                }
            };
            let category = Category::from_wire(&cell_text(row.get(3)).unwrap_or_default());
            let mut task = Task::new(cell_text(row.get(1)).unwrap_or_default());
            task.completed = cell_flag(row.get(2));
            people[index].list_mut(&category).push(task);
        }
        people
    }

    /// Transforms the schedule table into `(day, label)` patches. Rows whose
    /// day cell is not a number are dropped.
    pub fn schedule_updates(&self) -> Vec<(usize, String)> {
        self.schedule
            .iter()
            .skip(1)
            .filter_map(|row| {
                let day = cell_day(row.first())?;
                let label = cell_text(row.get(1)).unwrap_or_default();
                Some((day, label))
            })
            .collect()
    }
}

/// Extracts a cell as text. Spreadsheet cells arrive as strings or numbers;
/// blank and null cells yield `None`.
fn cell_text(cell: Option<&Value>) -> Option<String> {
    match cell? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The remote encodes checked state as boolean `true` or the exact strings
/// `"TRUE"` / `"true"`. Everything else is unchecked.
fn cell_flag(cell: Option<&Value>) -> bool {
    match cell {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "TRUE" || s == "true",
        _ => false,
    }
}

fn cell_day(cell: Option<&Value>) -> Option<usize> {
    match cell? {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// A single write to the remote store.
///
/// The `action` tag and the field names are the endpoint's contract; there
/// is no acknowledgement, and no rename action (edits travel as a delete
/// followed by an add).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RemoteMutation {
    AddTask {
        person: String,
        text: String,
        category: Category,
    },
    DeleteTask {
        person: String,
        text: String,
        category: Category,
    },
    UpdateTask {
        person: String,
        text: String,
        category: Category,
        completed: bool,
    },
    AddPerson {
        person: String,
    },
    DeletePerson {
        person: String,
    },
    ResetCheckboxes,
    SaveSchedule {
        schedule: WeeklySchedule,
    },
}

/// An abstract gateway to the remote store.
///
/// This trait decouples the sync logic from the transport, allowing the HTTP
/// implementation to be swapped for mocks in tests or a no-op when no
/// endpoint is configured.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Reads the full remote state.
    ///
    /// # Returns
    ///
    /// - `Ok(RemoteSnapshot)`: the raw tables, header rows included
    /// - `Err(_)`: transport failure, non-success status, or a malformed
    ///   payload
    async fn fetch_all(&self) -> Result<RemoteSnapshot>;

    /// Fires a best-effort write.
    ///
    /// Implementations log and swallow every failure: the caller never
    /// blocks on, or learns about, the outcome. The design accepts write
    /// loss over blocking the board.
    async fn send_mutation(&self, mutation: RemoteMutation);
}

/// Gateway used when no remote endpoint is configured.
pub struct NoOpGateway;

#[async_trait]
impl RemoteGateway for NoOpGateway {
    async fn fetch_all(&self) -> Result<RemoteSnapshot> {
        // Reads fail so the reconciler leaves local state alone
        Err(ChoreboardError::network("no remote endpoint configured"))
    }

    async fn send_mutation(&self, _mutation: RemoteMutation) {
        // No-op: the write is dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(tasks: Value, schedule: Value) -> RemoteSnapshot {
        serde_json::from_value(json!({ "tasks": tasks, "schedule": schedule })).unwrap()
    }

    #[test]
    fn test_people_groups_rows_in_first_seen_order() {
        let snapshot = snapshot(
            json!([
                ["Name", "Task", "Done", "Category"],
                ["Alice", "Dishes", "TRUE", "tasks"],
                ["Bob", "Trash", false, "tasks"],
                ["Alice", "Walk dog", "false", "routine"],
            ]),
            json!([]),
        );

        let people = snapshot.people();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].name, "Alice");
        assert_eq!(people[0].tasks, vec![done_task("Dishes")]);
        assert_eq!(people[0].routine, vec![Task::new("Walk dog")]);
        assert_eq!(people[1].name, "Bob");
        assert_eq!(people[1].tasks, vec![Task::new("Trash")]);
    }

    #[test]
    fn test_people_skips_header_and_rows_without_name() {
        let snapshot = snapshot(
            json!([
                ["Name", "Task"],
                ["", "Orphan", "TRUE", "tasks"],
                [null, "Orphan too"],
                ["Alice", "Dishes"],
            ]),
            json!([]),
        );

        let people = snapshot.people();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].tasks, vec![Task::new("Dishes")]);
    }

    #[test]
    fn test_completed_flag_is_case_sensitive() {
        let snapshot = snapshot(
            json!([
                ["hdr"],
                ["Alice", "A", true, "tasks"],
                ["Alice", "B", "TRUE", "tasks"],
                ["Alice", "C", "true", "tasks"],
                ["Alice", "D", "True", "tasks"],
                ["Alice", "E", "FALSE", "tasks"],
            ]),
            json!([]),
        );

        let done: Vec<bool> = snapshot.people()[0].tasks.iter().map(|t| t.completed).collect();
        assert_eq!(done, vec![true, true, true, false, false]);
    }

    #[test]
    fn test_missing_category_defaults_to_tasks() {
        let snapshot = snapshot(
            json!([["hdr"], ["Alice", "Dishes", "TRUE"], ["Alice", "Sweep", false, ""]]),
            json!([]),
        );

        let people = snapshot.people();
        assert_eq!(people[0].tasks.len(), 2);
        assert!(people[0].routine.is_empty());
    }

    #[test]
    fn test_unknown_category_lands_in_extras() {
        let snapshot = snapshot(
            json!([["hdr"], ["Alice", "Weed beds", false, "garden"]]),
            json!([]),
        );

        let people = snapshot.people();
        assert!(people[0].tasks.is_empty());
        assert_eq!(people[0].extras["garden"], vec![Task::new("Weed beds")]);
    }

    #[test]
    fn test_schedule_updates_skip_header_and_bad_days() {
        let snapshot = snapshot(
            json!([]),
            json!([["Day", "Label"], [1, "Bathrooms"], ["3", "Vacuum"], ["x", "Nope"]]),
        );

        assert_eq!(
            snapshot.schedule_updates(),
            vec![(1, "Bathrooms".to_string()), (3, "Vacuum".to_string())]
        );
    }

    #[test]
    fn test_mutation_wire_shapes() {
        let add = RemoteMutation::AddTask {
            person: "Alice".to_string(),
            text: "Dishes".to_string(),
            category: Category::Tasks,
        };
        assert_eq!(
            serde_json::to_value(&add).unwrap(),
            json!({"action": "addTask", "person": "Alice", "text": "Dishes", "category": "tasks"})
        );

        let update = RemoteMutation::UpdateTask {
            person: "Alice".to_string(),
            text: "Dishes".to_string(),
            category: Category::Routine,
            completed: true,
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({
                "action": "updateTask",
                "person": "Alice",
                "text": "Dishes",
                "category": "routine",
                "completed": true
            })
        );

        assert_eq!(
            serde_json::to_value(&RemoteMutation::ResetCheckboxes).unwrap(),
            json!({"action": "resetCheckboxes"})
        );

        let save = RemoteMutation::SaveSchedule {
            schedule: WeeklySchedule::default(),
        };
        let value = serde_json::to_value(&save).unwrap();
        assert_eq!(value["action"], "saveSchedule");
        assert_eq!(value["schedule"]["0"], "Rest & Prep");
        assert_eq!(value["schedule"]["6"], "Yard");
    }

    fn done_task(text: &str) -> Task {
        let mut task = Task::new(text);
        task.completed = true;
        task
    }
}
