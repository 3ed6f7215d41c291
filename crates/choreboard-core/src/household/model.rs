//! Household domain models.
//!
//! This module contains the core entities of the board: household members
//! and the chore entries on their lists.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which of a person's lists a task belongs to.
///
/// The remote store addresses tasks by `(person, category, text)` and the
/// category travels as a plain string on the wire. Strings outside the two
/// known lists are preserved verbatim rather than rejected (see
/// [`Person::extras`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// The weekly cleanup list.
    Tasks,
    /// The daily routine list.
    Routine,
    /// An unrecognized remote category string.
    Other(String),
}

impl Category {
    /// Parses a wire category string. An empty string means the default
    /// `tasks` list.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "" | "tasks" => Category::Tasks,
            "routine" => Category::Routine,
            other => Category::Other(other.to_string()),
        }
    }

    /// The string form used by the remote protocol.
    pub fn as_wire(&self) -> &str {
        match self {
            Category::Tasks => "tasks",
            Category::Routine => "routine",
            Category::Other(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::from_wire(&raw))
    }
}

/// A single chore entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Stable in-process identity. It never crosses the wire: the remote
    /// protocol knows a task only as `(person, category, text)`.
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    /// The chore description; doubles as the remote matching key.
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates a new, unchecked task.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.completed == other.completed
        // id is intentionally excluded: two tasks are the same entry when
        // they agree on text and state
    }
}

impl Eq for Task {}

/// One member of the household and their lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique key, case-sensitive. Doubles as the remote join key.
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub routine: Vec<Task>,
    /// Lists created by unrecognized remote category strings. Kept so a pull
    /// round-trips them, but never rendered; their matching semantics belong
    /// to the backend.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, Vec<Task>>,
}

impl Person {
    /// Creates a person with empty lists.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
            routine: Vec::new(),
            extras: BTreeMap::new(),
        }
    }

    /// Read access to the list a category names. Unknown categories that
    /// were never populated yield an empty slice.
    pub fn list(&self, category: &Category) -> &[Task] {
        match category {
            Category::Tasks => &self.tasks,
            Category::Routine => &self.routine,
            Category::Other(name) => self
                .extras
                .get(name)
                .map(Vec::as_slice)
                .unwrap_or_default(),
        }
    }

    pub(crate) fn list_mut(&mut self, category: &Category) -> &mut Vec<Task> {
        match category {
            Category::Tasks => &mut self.tasks,
            Category::Routine => &mut self.routine,
            Category::Other(name) => self.extras.entry(name.clone()).or_default(),
        }
    }

    /// A list is complete when it has at least one task and every task on it
    /// is checked off.
    pub fn is_complete(&self, category: &Category) -> bool {
        let list = self.list(category);
        !list.is_empty() && list.iter().all(|t| t.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_wire_defaults_to_tasks() {
        assert_eq!(Category::from_wire(""), Category::Tasks);
        assert_eq!(Category::from_wire("tasks"), Category::Tasks);
        assert_eq!(Category::from_wire("routine"), Category::Routine);
        assert_eq!(
            Category::from_wire("garden"),
            Category::Other("garden".to_string())
        );
    }

    #[test]
    fn test_task_equality_ignores_id() {
        let a = Task::new("Dishes");
        let b = Task::new("Dishes");
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_list_is_not_complete() {
        let person = Person::new("Alice");
        assert!(!person.is_complete(&Category::Tasks));
    }

    #[test]
    fn test_list_complete_requires_every_task_checked() {
        let mut person = Person::new("Alice");
        person.tasks.push(Task::new("Dishes"));
        person.tasks.push(Task::new("Laundry"));
        person.tasks[0].completed = true;
        assert!(!person.is_complete(&Category::Tasks));

        person.tasks[1].completed = true;
        assert!(person.is_complete(&Category::Tasks));
    }

    #[test]
    fn test_unknown_category_reads_as_empty() {
        let person = Person::new("Alice");
        let garden = Category::Other("garden".to_string());
        assert!(person.list(&garden).is_empty());
    }
}
