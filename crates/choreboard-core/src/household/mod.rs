//! Household domain: people, their task lists, and the weekly schedule.

pub mod model;
pub mod schedule;
pub mod store;

pub use model::{Category, Person, Task};
pub use schedule::WeeklySchedule;
pub use store::{BoardStats, HouseholdStore, TaskEdit, TaskToggle};
