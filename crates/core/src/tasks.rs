use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: String,
    pub label: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddOutcome {
    pub id: String,
    pub position: usize,
}

/// Ordered todo list. Every completed task sits after every open one.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    last_id: u64,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub fn open_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.len() - self.open_count()
    }

    /// Insert above the first completed task. Blank labels are ignored.
    pub fn add_task(&mut self, label: &str) -> Option<AddOutcome> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }

        self.last_id += 1;
        let id = format!("task-{}", self.last_id);
        let position = self
            .tasks
            .iter()
            .position(|task| task.completed)
            .unwrap_or(self.tasks.len());
        self.tasks.insert(
            position,
            Task {
                id: id.clone(),
                label: label.to_string(),
                completed: false,
            },
        );
        tracing::debug!(task_id = id.as_str(), position, "task added");
        Some(AddOutcome { id, position })
    }

    /// Returns `true` when the label changed. Blank replacements keep the old label.
    pub fn edit_task(&mut self, id: &str, new_label: &str) -> bool {
        let trimmed = new_label.trim();
        if trimmed.is_empty() {
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return false;
        };
        task.label = trimmed.to_string();
        tracing::debug!(task_id = id, "task relabelled");
        true
    }

    pub fn delete_task(&mut self, id: &str) -> Option<Task> {
        let idx = self.position(id)?;
        tracing::debug!(task_id = id, "task deleted");
        Some(self.tasks.remove(idx))
    }

    /// Flip completion and move the task across the open/completed boundary.
    /// Returns the task's new position.
    pub fn toggle_complete(&mut self, id: &str) -> Option<usize> {
        let idx = self.position(id)?;
        let completed = !self.tasks[idx].completed;
        self.tasks[idx].completed = completed;
        self.partition();
        tracing::debug!(task_id = id, completed, "task completion toggled");
        self.position(id)
    }

    fn partition(&mut self) {
        // stable: open tasks keep their order, completed tasks keep theirs
        let (open, done): (Vec<Task>, Vec<Task>) =
            self.tasks.drain(..).partition(|task| !task.completed);
        self.tasks.extend(open);
        self.tasks.extend(done);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(list: &TaskList) -> Vec<&str> {
        list.iter().map(|task| task.label.as_str()).collect()
    }

    fn assert_partitioned(list: &TaskList) {
        let first_done = list
            .iter()
            .position(|task| task.completed)
            .unwrap_or(list.len());
        assert!(list.as_slice()[first_done..].iter().all(|t| t.completed));
    }

    fn seeded() -> (TaskList, Vec<String>) {
        let mut list = TaskList::new();
        let ids = ["Read chapter", "Flashcards", "Email tutor", "Laundry"]
            .iter()
            .map(|label| list.add_task(label).unwrap().id)
            .collect();
        (list, ids)
    }

    #[test]
    fn blank_labels_are_ignored() {
        let mut list = TaskList::new();
        assert!(list.add_task("").is_none());
        assert!(list.add_task("   \t").is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn new_task_lands_above_first_completed() {
        let (mut list, ids) = seeded();
        list.toggle_complete(&ids[1]).unwrap();
        list.toggle_complete(&ids[3]).unwrap();
        assert_eq!(
            labels(&list),
            vec!["Read chapter", "Email tutor", "Laundry", "Flashcards"]
        );

        let outcome = list.add_task("  Write report ").unwrap();
        assert_eq!(outcome.position, 2);
        assert_eq!(list.len(), 5);
        assert_eq!(
            labels(&list),
            vec![
                "Read chapter",
                "Email tutor",
                "Write report",
                "Laundry",
                "Flashcards"
            ]
        );
    }

    #[test]
    fn ids_are_never_reused() {
        let mut list = TaskList::new();
        let first = list.add_task("one").unwrap().id;
        list.delete_task(&first).unwrap();
        let second = list.add_task("two").unwrap().id;
        assert_ne!(first, second);
        assert_eq!(second, "task-2");
    }

    #[test]
    fn toggle_keeps_completed_after_open() {
        let (mut list, ids) = seeded();
        for id in [&ids[0], &ids[2], &ids[0], &ids[3], &ids[1]] {
            list.toggle_complete(id).unwrap();
            assert_partitioned(&list);
        }
        assert_eq!(
            labels(&list),
            vec!["Read chapter", "Flashcards", "Laundry", "Email tutor"]
        );
        assert_eq!(list.completed_count(), 3);
    }

    #[test]
    fn unchecking_moves_task_back_to_open_partition_end() {
        let (mut list, ids) = seeded();
        list.toggle_complete(&ids[0]).unwrap();
        let position = list.toggle_complete(&ids[0]).unwrap();

        assert_eq!(position, 3);
        assert_eq!(list.open_count(), 4);
    }

    #[test]
    fn edit_with_blank_label_keeps_previous_text() {
        let (mut list, ids) = seeded();
        assert!(!list.edit_task(&ids[0], "   "));
        assert_eq!(list.get(&ids[0]).unwrap().label, "Read chapter");

        assert!(list.edit_task(&ids[0], " Read chapter 4 "));
        assert_eq!(list.get(&ids[0]).unwrap().label, "Read chapter 4");
        assert!(!list.edit_task("task-99", "ghost"));
    }

    #[test]
    fn delete_removes_unconditionally() {
        let (mut list, ids) = seeded();
        list.toggle_complete(&ids[2]).unwrap();
        let removed = list.delete_task(&ids[2]).unwrap();

        assert!(removed.completed);
        assert_eq!(list.len(), 3);
        assert!(list.delete_task(&ids[2]).is_none());
    }
}
