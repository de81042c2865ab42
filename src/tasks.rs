use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{next_timestamp, FilterType, Task, TaskCounts};

/// Ordered task collection, most recently added first.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> TaskList {
        TaskList::default()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Creates an uncompleted task from trimmed `text` and puts it first.
    pub fn add(&mut self, text: &str) -> Result<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyText);
        }
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            text: text.to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        let id = task.id;
        self.tasks.insert(0, task);
        Ok(id)
    }

    /// Flips completion of the task with `id`. Returns `false` if there is none.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.completed = !t.completed;
                t.updated_at = next_timestamp(t.updated_at);
                true
            }
            None => false,
        }
    }

    /// Replaces the text of the task with `id`, keeping its completion state.
    ///
    /// Returns `Ok(false)` if there is no such task.
    pub fn edit(&mut self, id: Uuid, text: &str) -> Result<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyText);
        }
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.text = text.to_string();
                t.updated_at = next_timestamp(t.updated_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the task with `id`. Returns `false` if there is none.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let len_before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != len_before
    }

    pub fn filter(&self, filter: FilterType) -> Vec<&Task> {
        filter_tasks(&self.tasks, filter)
    }

    pub fn counts(&self) -> TaskCounts {
        count_tasks(&self.tasks)
    }
}

/// Tasks matching `filter`, in source order.
pub fn filter_tasks(tasks: &[Task], filter: FilterType) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| match filter {
            FilterType::All => true,
            FilterType::Active => !t.completed,
            FilterType::Completed => t.completed,
        })
        .collect()
}

pub fn count_tasks(tasks: &[Task]) -> TaskCounts {
    let completed = tasks.iter().filter(|t| t.completed).count();
    TaskCounts {
        all: tasks.len(),
        active: tasks.len() - completed,
        completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample() -> (TaskList, Uuid, Uuid, Uuid) {
        let mut list = TaskList::new();
        let a = list.add("a").unwrap();
        let b = list.add("b").unwrap();
        let c = list.add("c").unwrap();
        list.toggle(b);
        (list, a, b, c)
    }

    #[test]
    fn add_trims_and_prepends() {
        let mut list = TaskList::new();
        list.add("first").unwrap();
        list.add("  second  ").unwrap();
        let texts: Vec<&str> = list.as_slice().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
        let t = &list.as_slice()[0];
        assert!(!t.completed);
        assert_eq!(t.created_at, t.updated_at);
    }

    #[test]
    fn add_rejects_whitespace_only_text() {
        let mut list = TaskList::new();
        assert!(matches!(list.add("   \t"), Err(Error::EmptyText)));
        assert!(list.is_empty());
    }

    #[test]
    fn toggle_twice_restores_state_and_bumps_timestamp() {
        let mut list = TaskList::new();
        let id = list.add("task").unwrap();
        let t0 = list.get(id).unwrap().updated_at;

        assert!(list.toggle(id));
        let t1 = list.get(id).unwrap().updated_at;
        assert!(list.get(id).unwrap().completed);
        assert!(t1 > t0);

        assert!(list.toggle(id));
        let t2 = list.get(id).unwrap().updated_at;
        assert!(!list.get(id).unwrap().completed);
        assert!(t2 > t1);
    }

    #[test]
    fn mutations_with_unknown_id_leave_list_unchanged() {
        let (mut list, ..) = sample();
        let before = list.clone();
        let missing = Uuid::new_v4();
        assert!(!list.toggle(missing));
        assert!(!list.edit(missing, "x").unwrap());
        assert!(!list.delete(missing));
        assert_eq!(list, before);
    }

    #[test]
    fn edit_replaces_text_only() {
        let (mut list, a, b, _) = sample();
        let other_before = list.get(a).unwrap().clone();
        assert!(list.edit(b, " renamed ").unwrap());
        let t = list.get(b).unwrap();
        assert_eq!(t.text, "renamed");
        assert!(t.completed);
        assert!(t.updated_at >= t.created_at);
        assert_eq!(list.get(a).unwrap(), &other_before);
    }

    #[test]
    fn edit_rejects_empty_text_without_change() {
        let (mut list, a, ..) = sample();
        let before = list.clone();
        assert!(matches!(list.edit(a, "  "), Err(Error::EmptyText)));
        assert_eq!(list, before);
    }

    #[test]
    fn delete_preserves_order_of_remaining() {
        let (mut list, a, b, c) = sample();
        assert!(list.delete(b));
        let ids: Vec<Uuid> = list.as_slice().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![c, a]);
    }

    #[test]
    fn filters_partition_the_list() {
        let (list, ..) = sample();
        let all: Vec<Uuid> = list.filter(FilterType::All).iter().map(|t| t.id).collect();
        let source: Vec<Uuid> = list.as_slice().iter().map(|t| t.id).collect();
        assert_eq!(all, source);

        let active: HashSet<Uuid> = list.filter(FilterType::Active).iter().map(|t| t.id).collect();
        let completed: HashSet<Uuid> = list.filter(FilterType::Completed).iter().map(|t| t.id).collect();
        assert!(active.is_disjoint(&completed));
        let union: HashSet<Uuid> = active.union(&completed).copied().collect();
        assert_eq!(union, source.into_iter().collect());
    }

    #[test]
    fn filter_keeps_relative_order() {
        let mut list = TaskList::new();
        let ids: Vec<Uuid> = (0..5).map(|i| list.add(&format!("t{}", i)).unwrap()).collect();
        list.toggle(ids[1]);
        list.toggle(ids[3]);
        let active: Vec<Uuid> = list.filter(FilterType::Active).iter().map(|t| t.id).collect();
        assert_eq!(active, vec![ids[4], ids[2], ids[0]]);
    }

    #[test]
    fn counts_stay_consistent_over_a_sequence() {
        let mut list = TaskList::new();
        let mut ids = Vec::new();
        for i in 0..8 {
            ids.push(list.add(&format!("task {}", i)).unwrap());
            let c = list.counts();
            assert_eq!(c.active + c.completed, c.all);
        }
        for (i, id) in ids.iter().enumerate() {
            if i % 2 == 0 {
                list.toggle(*id);
            }
            if i % 3 == 0 {
                list.edit(*id, "edited").unwrap();
            }
            if i % 5 == 0 {
                list.delete(*id);
            }
            let c = list.counts();
            assert_eq!(c.active + c.completed, c.all);
            assert_eq!(c.all, list.len());
        }
    }

    #[test]
    fn buy_milk_scenario() {
        let mut list = TaskList::new();
        let id = list.add("Buy milk").unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].text, "Buy milk");
        assert!(!list.as_slice()[0].completed);

        list.toggle(id);
        assert!(list.get(id).unwrap().completed);
        assert_eq!(list.counts(), TaskCounts { all: 1, active: 0, completed: 1 });

        list.delete(id);
        assert!(list.is_empty());
    }
}
