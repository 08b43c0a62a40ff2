use chrono::{
  DateTime,
  Utc
};
use tracing::{
  debug,
  warn
};
use uuid::Uuid;

use crate::task::{
  Category,
  Task,
  TaskStatus
};

/// Intents accepted by the task store.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskAction {
  AddTask(Task),
  UpdateTask(Task),
  ReorderTasks(Vec<Task>),
  SetEditingTask(Option<Task>),
  /// Flips completion; `completed` and
  /// `status` always move together.
  ToggleComplete {
    id: Uuid,
    at: DateTime<Utc>
  }
}

impl TaskAction {
  pub fn name(&self) -> &'static str {
    match self {
      | TaskAction::AddTask(_) => {
        "ADD_TASK"
      }
      | TaskAction::UpdateTask(_) => {
        "UPDATE_TASK"
      }
      | TaskAction::ReorderTasks(_) => {
        "REORDER_TASKS"
      }
      | TaskAction::SetEditingTask(_) => {
        "SET_EDITING_TASK"
      }
      | TaskAction::ToggleComplete {
        ..
      } => "TOGGLE_COMPLETE"
    }
  }
}

/// In-memory task state shared by the
/// list and the form. Ordering of `tasks`
/// is display order.
#[derive(
  Debug, Clone, PartialEq, Default,
)]
pub struct TaskStore {
  pub tasks:        Vec<Task>,
  pub categories:   Vec<Category>,
  pub editing_task: Option<Task>
}

impl TaskStore {
  pub fn new(
    categories: Vec<Category>
  ) -> Self {
    Self {
      tasks: vec![],
      categories,
      editing_task: None
    }
  }

  pub fn default_category(
    &self
  ) -> Option<&str> {
    self
      .categories
      .first()
      .map(|c| c.name.as_str())
  }

  pub fn category(
    &self,
    name: &str
  ) -> Option<&Category> {
    self
      .categories
      .iter()
      .find(|c| c.name == name)
  }

  pub fn apply(
    &mut self,
    action: TaskAction
  ) {
    debug!(
      action = action.name(),
      "applying task action"
    );
    match action {
      | TaskAction::AddTask(task) => {
        if self
          .tasks
          .iter()
          .any(|t| t.id == task.id)
        {
          warn!(id = %task.id, "task id already present; ignoring add");
          return;
        }
        self.tasks.push(task);
      }
      | TaskAction::UpdateTask(task) => {
        match self
          .tasks
          .iter_mut()
          .find(|t| t.id == task.id)
        {
          | Some(slot) => *slot = task,
          | None => {
            warn!(id = %task.id, "update for unknown task; ignoring");
          }
        }
      }
      | TaskAction::ReorderTasks(
        tasks
      ) => {
        self.tasks = tasks;
      }
      | TaskAction::SetEditingTask(
        task
      ) => {
        self.editing_task = task;
      }
      | TaskAction::ToggleComplete {
        id,
        at
      } => {
        let Some(task) = self
          .tasks
          .iter_mut()
          .find(|t| t.id == id)
        else {
          warn!(%id, "toggle for unknown task; ignoring");
          return;
        };
        task.completed = !task.completed;
        task.status = if task.completed {
          TaskStatus::Completed
        } else {
          TaskStatus::Pending
        };
        task.updated_at = at;
      }
    }
  }
}
