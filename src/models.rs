use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A to-do item with completion status.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned at creation and never changed.
    pub id: Uuid,
    /// Trimmed, non-empty description.
    pub text: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last text edit or completion toggle.
    pub updated_at: DateTime<Utc>,
}

/// A free-form text entry without completion status.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// View selector over the task collection.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterType {
    pub const ALL: [FilterType; 3] = [FilterType::All, FilterType::Active, FilterType::Completed];

    /// Translation key of the filter's label.
    pub fn label_key(self) -> &'static str {
        match self {
            FilterType::All => "allTasks",
            FilterType::Active => "activeTasks",
            FilterType::Completed => "completedTasks",
        }
    }

    /// Next filter in display order, wrapping around.
    pub fn next(self) -> FilterType {
        match self {
            FilterType::All => FilterType::Active,
            FilterType::Active => FilterType::Completed,
            FilterType::Completed => FilterType::All,
        }
    }
}

/// Active display language.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    /// Short badge shown next to the language switch.
    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "FR",
            Language::En => "EN",
        }
    }
}

/// Which collection the front end is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Tasks,
    Notes,
}

/// Per-filter task totals. `active + completed == all` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn for_filter(&self, filter: FilterType) -> usize {
        match filter {
            FilterType::All => self.all,
            FilterType::Active => self.active,
            FilterType::Completed => self.completed,
        }
    }
}

/// Returns the timestamp for a mutation of a record last touched at `previous`.
///
/// The result is never earlier than the wall clock and always strictly later
/// than `previous`, so `updated_at` keeps increasing even if the clock stalls.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// First eight characters of an id, as shown in listings.
pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_timestamp_is_strictly_later_than_a_future_previous() {
        let future = Utc::now() + Duration::hours(1);
        assert!(next_timestamp(future) > future);
    }

    #[test]
    fn filter_cycle_visits_every_variant() {
        let mut f = FilterType::All;
        for expected in [FilterType::Active, FilterType::Completed, FilterType::All] {
            f = f.next();
            assert_eq!(f, expected);
        }
    }

    #[test]
    fn task_serializes_with_camel_case_keys() {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            text: "Buy milk".into(),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn language_serializes_as_lowercase_code() {
        assert_eq!(serde_json::to_string(&Language::Fr).unwrap(), "\"fr\"");
        assert_eq!(serde_json::from_str::<Language>("\"en\"").unwrap(), Language::En);
    }

    #[test]
    fn short_id_is_eight_hex_chars() {
        let id = Uuid::new_v4();
        let short = short_id(&id);
        assert_eq!(short.len(), 8);
        assert!(id.to_string().starts_with(&short));
    }
}
