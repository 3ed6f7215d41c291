//! The local board state and its mutation operations.
//!
//! `HouseholdStore` owns everything the board shows: people with their lists
//! and the weekly schedule. Every mutation is a synchronous, pure in-memory
//! transformation that leaves the store consistent before returning and never
//! performs I/O; callers persist a snapshot to the durable cache and
//! re-render afterwards (push model, not reactive).

use serde::{Deserialize, Serialize};

use crate::error::{ChoreboardError, Result};
use crate::household::model::{Category, Person, Task};
use crate::household::schedule::WeeklySchedule;

/// Outcome of a toggle: what the remote write needs, plus whether the whole
/// list is now checked off (the celebration trigger in the front end).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskToggle {
    pub text: String,
    pub completed: bool,
    pub list_complete: bool,
}

/// Outcome of a text edit. The remote has no rename action, so the caller
/// forwards this as a delete of `old_text` followed by an add of `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub old_text: String,
    pub new_text: String,
}

/// Aggregate counts for the dashboard strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStats {
    pub people: usize,
    /// Cleanup tasks only; the dashboard never counted routines.
    pub tasks: usize,
}

/// In-memory board state, mirrored to the durable cache for instant cold
/// start. Serializes as the cache blob `{familyData, weeklySchedule}`.
///
/// Access is single-writer by construction: the sync service wraps the store
/// in a mutex and every mutation runs to completion under it, so no reader
/// can observe a partially-applied update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseholdStore {
    #[serde(rename = "familyData", default)]
    people: Vec<Person>,
    #[serde(rename = "weeklySchedule", default)]
    schedule: WeeklySchedule,
}

impl HouseholdStore {
    /// Creates an empty board with the default schedule.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    pub fn person(&self, name: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.name == name)
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats {
            people: self.people.len(),
            tasks: self.people.iter().map(|p| p.tasks.len()).sum(),
        }
    }

    fn person_mut(&mut self, name: &str) -> Result<&mut Person> {
        self.people
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| ChoreboardError::not_found("Person", name))
    }

    /// Flips a task's checked state.
    pub fn toggle_task(
        &mut self,
        person: &str,
        category: &Category,
        index: usize,
    ) -> Result<TaskToggle> {
        let list = self.person_mut(person)?.list_mut(category);
        let task = list
            .get_mut(index)
            .ok_or_else(|| ChoreboardError::not_found("Task", index.to_string()))?;
        task.completed = !task.completed;
        let text = task.text.clone();
        let completed = task.completed;
        let list_complete = completed && list.iter().all(|t| t.completed);
        Ok(TaskToggle {
            text,
            completed,
            list_complete,
        })
    }

    /// Appends a new, unchecked task to the named list.
    pub fn add_task(
        &mut self,
        person: &str,
        category: &Category,
        text: impl Into<String>,
    ) -> Result<()> {
        self.person_mut(person)?
            .list_mut(category)
            .push(Task::new(text));
        Ok(())
    }

    /// Removes a task and returns it; the remote delete needs its text.
    pub fn delete_task(&mut self, person: &str, category: &Category, index: usize) -> Result<Task> {
        let list = self.person_mut(person)?.list_mut(category);
        if index >= list.len() {
            return Err(ChoreboardError::not_found("Task", index.to_string()));
        }
        Ok(list.remove(index))
    }

    /// Replaces a task's text. Returns `Ok(None)` when the new text equals
    /// the old one, in which case nothing changed.
    pub fn edit_task(
        &mut self,
        person: &str,
        category: &Category,
        index: usize,
        new_text: &str,
    ) -> Result<Option<TaskEdit>> {
        let list = self.person_mut(person)?.list_mut(category);
        let task = list
            .get_mut(index)
            .ok_or_else(|| ChoreboardError::not_found("Task", index.to_string()))?;
        if task.text == new_text {
            return Ok(None);
        }
        let old_text = std::mem::replace(&mut task.text, new_text.to_string());
        Ok(Some(TaskEdit {
            old_text,
            new_text: new_text.to_string(),
        }))
    }

    /// Adds a person, seeded with the starter task. Names are the unique
    /// key, so a duplicate is rejected rather than shadowed.
    pub fn add_person(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.people.iter().any(|p| p.name == name) {
            return Err(ChoreboardError::conflict("Person", name));
        }
        let mut person = Person::new(name);
        person.tasks.push(Task::new("Welcome!"));
        self.people.push(person);
        Ok(())
    }

    /// Removes a person and all their lists.
    pub fn delete_person(&mut self, name: &str) -> Result<Person> {
        let index = self
            .people
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| ChoreboardError::not_found("Person", name))?;
        Ok(self.people.remove(index))
    }

    /// Unchecks every box on the board for the new week. Extra lists are
    /// left alone; the weekly reset only ever covered the two rendered
    /// lists.
    pub fn reset_all_checkboxes(&mut self) {
        for person in &mut self.people {
            for task in person.tasks.iter_mut().chain(person.routine.iter_mut()) {
                task.completed = false;
            }
        }
    }

    /// Wholesale schedule replacement (the schedule editor saves all seven
    /// days at once).
    pub fn set_schedule(&mut self, schedule: WeeklySchedule) {
        self.schedule = schedule;
    }

    /// Merges a remote read into the board: people are replaced wholesale
    /// (the remote is authoritative for them) while the schedule is patched
    /// day-by-day (the remote is incrementally authoritative for it).
    pub fn merge_remote(&mut self, people: Vec<Person>, schedule_updates: &[(usize, String)]) {
        self.people = people;
        for (day, label) in schedule_updates {
            self.schedule.set(*day, label.clone());
        }
    }
}
