use std::collections::BTreeMap;

use chrono::{
  DateTime,
  NaiveDate,
  Utc
};
use uuid::Uuid;

use crate::task::{
  ActiveTracking,
  Priority,
  Recurrence,
  ShareEntry,
  Subtask,
  Task,
  TaskStatus,
  TimeEntry
};

pub const TITLE_FIELD: &str = "title";
pub const EMAIL_FIELD: &str = "email";
pub const TITLE_REQUIRED: &str =
  "Title is required";

/// Field name to inline error message.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct FieldErrors(
  BTreeMap<String, String>
);

impl FieldErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(
    &mut self,
    field: &str,
    message: &str
  ) {
    self
      .0
      .insert(field.to_string(), message.to_string());
  }

  pub fn remove(&mut self, field: &str) {
    self.0.remove(field);
  }

  pub fn get(
    &self,
    field: &str
  ) -> Option<&str> {
    self.0.get(field).map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn clear(&mut self) {
    self.0.clear();
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = (&String, &String)>
  {
    self.0.iter()
  }
}

/// A task under construction. Scalar
/// fields the user may leave unset are
/// `Option`; submit fills them from
/// defaults.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct TaskDraft {
  pub title:               String,
  pub description:         Option<String>,
  pub due_date:            Option<NaiveDate>,
  pub category:            Option<String>,
  pub priority:            Option<Priority>,
  pub notes:               Option<String>,
  pub recurrence:          Option<Recurrence>,
  pub recurrence_end_date: Option<NaiveDate>,
  pub subtasks:            Vec<Subtask>,
  pub time_entries:        Vec<TimeEntry>,
  pub shared_with:         Vec<ShareEntry>,
  pub status:              Option<TaskStatus>,
  pub active_tracking:     Option<ActiveTracking>
}

impl TaskDraft {
  /// The form's starting point when
  /// creating a task.
  pub fn empty(
    default_category: &str,
    default_priority: Priority
  ) -> Self {
    Self {
      title:               String::new(),
      description:         None,
      due_date:            None,
      category:            Some(
        default_category.to_string()
      ),
      priority:            Some(
        default_priority
      ),
      notes:               None,
      recurrence:          Some(
        Recurrence::None
      ),
      recurrence_end_date: None,
      subtasks:            vec![],
      time_entries:        vec![],
      shared_with:         vec![],
      status:              Some(
        TaskStatus::Pending
      ),
      active_tracking:     None
    }
  }

  pub fn from_task(task: &Task) -> Self {
    Self {
      title:               task.title.clone(),
      description:         task
        .description
        .clone(),
      due_date:            task.due_date,
      category:            Some(
        task.category.clone()
      ),
      priority:            Some(
        task.priority
      ),
      notes:               task.notes.clone(),
      recurrence:          Some(
        task.recurrence
      ),
      recurrence_end_date: task
        .recurrence_end_date,
      subtasks:            task
        .subtasks
        .clone(),
      time_entries:        task
        .time_entries
        .clone(),
      shared_with:         task
        .shared_with
        .clone(),
      status:              Some(task.status),
      active_tracking:     task
        .active_tracking
    }
  }

  pub fn validate(&self) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if self.title.is_empty() {
      errors.insert(
        TITLE_FIELD,
        TITLE_REQUIRED
      );
    }
    errors
  }

  /// Builds the committed task. `existing`
  /// is the task being edited; its
  /// identity, creation time and
  /// completion flag survive.
  pub fn reconcile(
    self,
    existing: Option<&Task>,
    default_category: &str,
    now: DateTime<Utc>
  ) -> Task {
    let (id, created_at, completed) =
      match existing {
        | Some(task) => (
          task.id,
          task.created_at,
          task.completed
        ),
        | None => {
          (Uuid::new_v4(), now, false)
        }
      };

    Task {
      id,
      title: self.title,
      description: self.description,
      completed,
      created_at,
      updated_at: now,
      due_date: self.due_date,
      category: self
        .category
        .unwrap_or_else(|| {
          default_category.to_string()
        }),
      priority: self
        .priority
        .unwrap_or_default(),
      notes: self.notes,
      recurrence: self
        .recurrence
        .unwrap_or_default(),
      recurrence_end_date: self
        .recurrence_end_date,
      subtasks: self.subtasks,
      time_entries: self.time_entries,
      shared_with: self.shared_with,
      status: self
        .status
        .unwrap_or_default(),
      active_tracking: self
        .active_tracking
    }
  }
}

/// Maps a text input to an optional
/// field: blank means unset.
pub fn optional_text(
  raw: &str
) -> Option<String> {
  if raw.trim().is_empty() {
    None
  } else {
    Some(raw.to_string())
  }
}
