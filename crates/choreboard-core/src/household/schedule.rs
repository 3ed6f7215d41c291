//! The weekly focus schedule.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Days in the schedule, indexed 0 = Sunday .. 6 = Saturday.
pub const DAYS_PER_WEEK: usize = 7;

const DEFAULT_LABELS: [&str; DAYS_PER_WEEK] = [
    "Rest & Prep",
    "Bathrooms",
    "Floors",
    "Dusting",
    "Kitchen",
    "Laundry",
    "Yard",
];

/// Focus shown for a day whose label is blank.
pub const FALLBACK_FOCUS: &str = "General Cleaning";

/// Day-of-week to focus label.
///
/// Always fully populated: remote updates patch individual days and never
/// remove the others. Serializes as the `{"0".."6": label}` map used by both
/// the `saveSchedule` wire action and the local cache blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySchedule {
    labels: [String; DAYS_PER_WEEK],
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.map(str::to_string),
        }
    }
}

impl WeeklySchedule {
    /// The label for a day index, if the index names a day of the week.
    pub fn label(&self, day: usize) -> Option<&str> {
        self.labels.get(day).map(String::as_str)
    }

    /// Overwrites a single day's label. Indices outside the week are ignored
    /// and reported as `false`.
    pub fn set(&mut self, day: usize, label: impl Into<String>) -> bool {
        match self.labels.get_mut(day) {
            Some(slot) => {
                *slot = label.into();
                true
            }
            None => false,
        }
    }

    /// The focus label for a weekday, falling back when the label is blank.
    pub fn focus(&self, weekday: Weekday) -> &str {
        let label = &self.labels[weekday.num_days_from_sunday() as usize];
        if label.is_empty() { FALLBACK_FOCUS } else { label }
    }

    /// Iterates `(day index, label)` pairs in week order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.labels.iter().enumerate().map(|(i, l)| (i, l.as_str()))
    }
}

impl Serialize for WeeklySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.labels.iter().enumerate().map(|(i, l)| (i as u8, l)))
    }
}

impl<'de> Deserialize<'de> for WeeklySchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Patch semantics: whatever days the map carries overwrite the
        // defaults, every other day keeps its default label.
        let entries = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut schedule = Self::default();
        for (day, label) in entries {
            if let Ok(day) = day.parse::<usize>() {
                schedule.set(day, label);
            }
        }
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fully_populated() {
        let schedule = WeeklySchedule::default();
        assert_eq!(schedule.label(0), Some("Rest & Prep"));
        assert_eq!(schedule.label(6), Some("Yard"));
        assert!(schedule.iter().all(|(_, label)| !label.is_empty()));
    }

    #[test]
    fn test_set_patches_one_day_only() {
        let mut schedule = WeeklySchedule::default();
        assert!(schedule.set(1, "Windows"));
        assert_eq!(schedule.label(1), Some("Windows"));
        assert_eq!(schedule.label(2), Some("Floors"));
    }

    #[test]
    fn test_set_ignores_out_of_range_day() {
        let mut schedule = WeeklySchedule::default();
        assert!(!schedule.set(7, "Nothing"));
        assert_eq!(schedule, WeeklySchedule::default());
    }

    #[test]
    fn test_focus_falls_back_on_blank_label() {
        let mut schedule = WeeklySchedule::default();
        schedule.set(0, "");
        assert_eq!(schedule.focus(Weekday::Sun), FALLBACK_FOCUS);
        assert_eq!(schedule.focus(Weekday::Mon), "Bathrooms");
    }

    #[test]
    fn test_serde_round_trips_as_day_map() {
        let mut schedule = WeeklySchedule::default();
        schedule.set(3, "Garage");

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["3"], "Garage");
        assert_eq!(json["0"], "Rest & Prep");

        let back: WeeklySchedule = serde_json::from_value(json).unwrap();
        assert_eq!(back, schedule);
    }

    #[test]
    fn test_deserialize_partial_map_keeps_defaults() {
        let back: WeeklySchedule = serde_json::from_value(serde_json::json!({
            "1": "Bikes",
        }))
        .unwrap();
        assert_eq!(back.label(1), Some("Bikes"));
        assert_eq!(back.label(5), Some("Laundry"));
    }
}
