//! The task form as a state machine over a
//! local draft.
//!
//! The form is either closed or open; an
//! open form is creating a task or editing
//! one supplied by the caller. Nothing
//! reaches the store until `submit`, and
//! every path back to closed throws the
//! draft away.

use chrono::{
  DateTime,
  Utc
};
use tracing::{
  debug,
  info
};
use uuid::Uuid;

use crate::draft::{
  EMAIL_FIELD,
  FieldErrors,
  TITLE_FIELD,
  TaskDraft
};
use crate::recurrence::RecurrenceSelection;
use crate::store::TaskAction;
use crate::task::{
  ActiveTracking,
  Priority,
  ShareEntry,
  SharePermission,
  Subtask,
  Task
};
use crate::tracking::TrackingMode;

#[derive(
  Debug, Clone, PartialEq, Default,
)]
pub enum FormPhase {
  #[default]
  Closed,
  Creating,
  Editing(Task)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
  phase:             FormPhase,
  draft:             TaskDraft,
  errors:            FieldErrors,
  tracking_mode:     TrackingMode,
  countdown_minutes: Option<u32>,
  share_open:        bool,
  share_errors:      FieldErrors,
  default_category:  String,
  default_priority:  Priority
}

impl TaskForm {
  pub fn new(
    default_category: impl Into<String>
  ) -> Self {
    let default_category =
      default_category.into();
    Self {
      phase: FormPhase::Closed,
      draft: TaskDraft::empty(
        &default_category,
        Priority::default()
      ),
      errors: FieldErrors::new(),
      tracking_mode:
        TrackingMode::Elapsed,
      countdown_minutes: None,
      share_open: false,
      share_errors: FieldErrors::new(),
      default_category,
      default_priority: Priority::default()
    }
  }

  /// Priority preselected when creating
  /// a task.
  pub fn with_default_priority(
    mut self,
    priority: Priority
  ) -> Self {
    self.default_priority = priority;
    self.draft.priority = Some(priority);
    self
  }

  pub fn phase(&self) -> &FormPhase {
    &self.phase
  }

  pub fn is_open(&self) -> bool {
    self.phase != FormPhase::Closed
  }

  pub fn editing(
    &self
  ) -> Option<&Task> {
    match &self.phase {
      | FormPhase::Editing(task) => {
        Some(task)
      }
      | _ => None
    }
  }

  pub fn draft(&self) -> &TaskDraft {
    &self.draft
  }

  pub fn errors(&self) -> &FieldErrors {
    &self.errors
  }

  pub fn tracking_mode(
    &self
  ) -> TrackingMode {
    self.tracking_mode
  }

  pub fn countdown_minutes(
    &self
  ) -> Option<u32> {
    self.countdown_minutes
  }

  pub fn share_open(&self) -> bool {
    self.share_open
  }

  pub fn share_errors(
    &self
  ) -> &FieldErrors {
    &self.share_errors
  }

  pub fn heading(&self) -> &'static str {
    match self.phase {
      | FormPhase::Editing(_) => {
        "Edit Task"
      }
      | _ => "Add New Task"
    }
  }

  pub fn submit_label(
    &self
  ) -> &'static str {
    match self.phase {
      | FormPhase::Editing(_) => {
        "Update Task"
      }
      | _ => "Add Task"
    }
  }

  /// Opens the form, editing `editing`
  /// when given and creating otherwise.
  pub fn open(
    &mut self,
    editing: Option<&Task>
  ) {
    self.errors.clear();
    self.share_open = false;
    self.share_errors.clear();
    match editing {
      | Some(task) => {
        info!(id = %task.id, "opening task form for edit");
        self.draft =
          TaskDraft::from_task(task);
        self.tracking_mode =
          TrackingMode::for_session(
            task.active_tracking.as_ref()
          );
        self.countdown_minutes = task
          .active_tracking
          .and_then(|s| {
            s.countdown_minutes
          });
        self.phase =
          FormPhase::Editing(task.clone());
      }
      | None => {
        info!(
          "opening task form for create"
        );
        self.draft = TaskDraft::empty(
          &self.default_category,
          self.default_priority
        );
        self.tracking_mode =
          TrackingMode::Elapsed;
        self.countdown_minutes = None;
        self.phase = FormPhase::Creating;
      }
    }
  }

  /// Follows the caller's view of the
  /// form: whether it is shown and which
  /// task, if any, is being edited.
  pub fn sync(
    &mut self,
    is_open: bool,
    editing: Option<&Task>
  ) {
    if is_open {
      self.open(editing);
    } else {
      self.reset();
    }
  }

  /// Cancels the form. The returned
  /// intent clears the store's editing
  /// reference.
  pub fn close(&mut self) -> TaskAction {
    debug!("closing task form");
    self.reset();
    TaskAction::SetEditingTask(None)
  }

  fn reset(&mut self) {
    self.phase = FormPhase::Closed;
    self.draft = TaskDraft::empty(
      &self.default_category,
      self.default_priority
    );
    self.errors.clear();
    self.tracking_mode =
      TrackingMode::Elapsed;
    self.countdown_minutes = None;
    self.share_open = false;
    self.share_errors.clear();
  }

  /// Validates and commits the draft.
  /// On success the form closes and the
  /// returned intents are, in order, the
  /// add/update and the editing reset.
  /// On failure the form stays open with
  /// its errors set.
  pub fn submit(
    &mut self,
    now: DateTime<Utc>
  ) -> Result<Vec<TaskAction>, FieldErrors>
  {
    if !self.is_open() {
      debug!(
        "submit on closed form ignored"
      );
      return Ok(vec![]);
    }

    self.errors = self.draft.validate();
    if !self.errors.is_empty() {
      debug!(
        errors = self.errors.iter().count(),
        "task form validation failed"
      );
      return Err(self.errors.clone());
    }

    let existing = self.editing().cloned();
    let task = self.draft.clone().reconcile(
      existing.as_ref(),
      &self.default_category,
      now
    );
    let intent = match existing {
      | Some(_) => {
        info!(id = %task.id, "updating task");
        TaskAction::UpdateTask(task)
      }
      | None => {
        info!(id = %task.id, "adding task");
        TaskAction::AddTask(task)
      }
    };

    let close = self.close();
    Ok(vec![intent, close])
  }

  pub fn set_title(
    &mut self,
    title: String
  ) {
    self.draft.title = title;
    self.errors.remove(TITLE_FIELD);
  }

  pub fn set_description(
    &mut self,
    description: Option<String>
  ) {
    self.draft.description = description;
  }

  pub fn set_notes(
    &mut self,
    notes: Option<String>
  ) {
    self.draft.notes = notes;
  }

  pub fn set_priority(
    &mut self,
    priority: Priority
  ) {
    self.draft.priority = Some(priority);
  }

  pub fn set_category(
    &mut self,
    category: String
  ) {
    self.draft.category = Some(category);
  }

  pub fn set_due_date(
    &mut self,
    due_date: Option<chrono::NaiveDate>
  ) {
    self.draft.due_date = due_date;
  }

  pub fn recurrence(
    &self
  ) -> RecurrenceSelection {
    RecurrenceSelection::new(
      self
        .draft
        .recurrence
        .unwrap_or_default(),
      self.draft.recurrence_end_date
    )
  }

  pub fn set_recurrence(
    &mut self,
    selection: RecurrenceSelection
  ) {
    self.draft.recurrence =
      Some(selection.mode);
    self.draft.recurrence_end_date =
      selection.end_date;
  }

  pub fn set_tracking_mode(
    &mut self,
    mode: TrackingMode
  ) {
    self.tracking_mode = mode;
  }

  /// Starts a session at `now`. Ignored
  /// while another session is running.
  pub fn start_tracking(
    &mut self,
    now: DateTime<Utc>,
    countdown_minutes: Option<u32>
  ) -> bool {
    if self.draft.active_tracking.is_some()
    {
      debug!(
        "tracking already active; \
         ignoring start"
      );
      return false;
    }
    self.draft.active_tracking =
      Some(ActiveTracking {
        start: now,
        countdown_minutes
      });
    if countdown_minutes.is_some() {
      self.countdown_minutes =
        countdown_minutes;
    }
    debug!(
      ?countdown_minutes,
      "tracking started"
    );
    true
  }

  /// Stops the running session, recording
  /// `duration` minutes as measured by the
  /// caller. No-op without a session.
  pub fn stop_tracking(
    &mut self,
    now: DateTime<Utc>,
    duration: u32
  ) -> bool {
    let Some(session) =
      self.draft.active_tracking.take()
    else {
      return false;
    };
    self
      .draft
      .time_entries
      .push(session.finish(now, duration));
    self.countdown_minutes = None;
    debug!(duration, "tracking stopped");
    true
  }

  pub fn add_subtask(
    &mut self,
    title: &str,
    now: DateTime<Utc>
  ) -> bool {
    let title = title.trim();
    if title.is_empty() {
      return false;
    }
    self
      .draft
      .subtasks
      .push(Subtask::new(title.to_string(), now));
    true
  }

  pub fn toggle_subtask(
    &mut self,
    id: Uuid
  ) {
    if let Some(subtask) = self
      .draft
      .subtasks
      .iter_mut()
      .find(|s| s.id == id)
    {
      subtask.completed =
        !subtask.completed;
    }
  }

  pub fn remove_subtask(
    &mut self,
    id: Uuid
  ) {
    self
      .draft
      .subtasks
      .retain(|s| s.id != id);
  }

  pub fn open_share_dialog(&mut self) {
    self.share_open = true;
    self.share_errors.clear();
  }

  pub fn close_share_dialog(&mut self) {
    self.share_open = false;
    self.share_errors.clear();
  }

  /// Shares the draft with `email`.
  /// Sharing again with a known address
  /// only changes its permission.
  pub fn share_with(
    &mut self,
    email: &str,
    permission: SharePermission
  ) -> bool {
    let email = email.trim();
    if !looks_like_email(email) {
      self.share_errors.insert(
        EMAIL_FIELD,
        "Enter a valid email address"
      );
      return false;
    }
    self.share_errors.clear();

    if let Some(existing) = self
      .draft
      .shared_with
      .iter_mut()
      .find(|s| {
        s.email.eq_ignore_ascii_case(email)
      })
    {
      existing.permission = permission;
      return true;
    }

    self.draft.shared_with.push(
      ShareEntry {
        user_id: Uuid::new_v4(),
        email: email.to_string(),
        permission
      }
    );
    true
  }

  pub fn set_share_permission(
    &mut self,
    user_id: Uuid,
    permission: SharePermission
  ) {
    if let Some(entry) = self
      .draft
      .shared_with
      .iter_mut()
      .find(|s| s.user_id == user_id)
    {
      entry.permission = permission;
    }
  }

  pub fn unshare(
    &mut self,
    user_id: Uuid
  ) {
    self
      .draft
      .shared_with
      .retain(|s| s.user_id != user_id);
  }
}

fn looks_like_email(raw: &str) -> bool {
  match raw.split_once('@') {
    | Some((local, domain)) => {
      !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !raw.contains(char::is_whitespace)
    }
    | None => false
  }
}

#[cfg(test)]
mod tests {
  use chrono::Duration;

  use super::*;
  use crate::draft::TITLE_REQUIRED;
  use crate::task::Recurrence;

  fn now() -> DateTime<Utc> {
    "2026-10-19T09:00:00Z"
      .parse()
      .expect("timestamp")
  }

  fn existing_task() -> Task {
    let mut task = Task::new_pending(
      "Review PR".to_string(),
      "Work".to_string(),
      now() - Duration::days(3)
    );
    task.recurrence = Recurrence::Weekly;
    task
  }

  #[test]
  fn opening_for_create_starts_from_template(
  ) {
    let mut form = TaskForm::new("Personal");
    form.open(None);
    assert!(form.is_open());
    assert!(form.editing().is_none());
    assert_eq!(
      form.draft(),
      &TaskDraft::empty(
        "Personal",
        Priority::Medium
      )
    );
    assert_eq!(form.heading(), "Add New Task");
  }

  #[test]
  fn opening_for_edit_copies_the_task() {
    let task = existing_task();
    let mut form = TaskForm::new("Personal");
    form.open(Some(&task));

    assert_eq!(form.editing(), Some(&task));
    assert_eq!(form.draft().title, "Review PR");
    assert_eq!(
      form.tracking_mode(),
      TrackingMode::Elapsed
    );
    assert_eq!(form.submit_label(), "Update Task");
  }

  #[test]
  fn countdown_session_selects_countdown_mode(
  ) {
    let mut task = existing_task();
    task.active_tracking =
      Some(ActiveTracking {
        start: now(),
        countdown_minutes: Some(25)
      });

    let mut form = TaskForm::new("Personal");
    form.open(Some(&task));
    assert_eq!(
      form.tracking_mode(),
      TrackingMode::Countdown
    );
    assert_eq!(
      form.countdown_minutes(),
      Some(25)
    );
  }

  #[test]
  fn empty_title_blocks_submit() {
    let mut form = TaskForm::new("Personal");
    form.open(None);

    let result = form.submit(now());
    let errors =
      result.expect_err("validation fails");
    assert_eq!(
      errors.get(TITLE_FIELD),
      Some(TITLE_REQUIRED)
    );
    assert!(form.is_open());
    assert_eq!(
      form.errors().get(TITLE_FIELD),
      Some(TITLE_REQUIRED)
    );
  }

  #[test]
  fn whitespace_title_is_enough_to_submit() {
    let mut form = TaskForm::new("Personal");
    form.open(None);
    form.set_title("   ".to_string());

    let intents =
      form.submit(now()).expect("valid");
    let names: Vec<&str> =
      intents.iter().map(TaskAction::name).collect();
    assert_eq!(
      names,
      vec!["ADD_TASK", "SET_EDITING_TASK"]
    );
    assert!(!form.is_open());
  }

  #[test]
  fn configured_priority_seeds_new_drafts() {
    let mut form = TaskForm::new("Personal")
      .with_default_priority(Priority::High);
    form.open(None);
    form.set_title("Call plumber".to_string());
    assert_eq!(
      form.draft().priority,
      Some(Priority::High)
    );

    let intents =
      form.submit(now()).expect("valid");
    match &intents[0] {
      | TaskAction::AddTask(task) => {
        assert_eq!(task.priority, Priority::High)
      }
      | other => {
        panic!("unexpected intent {other:?}")
      }
    }
    assert_eq!(
      form.draft().priority,
      Some(Priority::High)
    );
  }

  #[test]
  fn editing_title_clears_its_error() {
    let mut form = TaskForm::new("Personal");
    form.open(None);
    let _ = form.submit(now());
    form.set_title("Buy milk".to_string());
    assert!(form.errors().is_empty());
  }

  #[test]
  fn create_submit_emits_add_then_closes() {
    let mut form = TaskForm::new("Personal");
    form.open(None);
    form.set_title("Buy milk".to_string());

    let intents =
      form.submit(now()).expect("valid");
    assert_eq!(intents.len(), 2);
    match &intents[0] {
      | TaskAction::AddTask(task) => {
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.category, "Personal");
        assert_eq!(task.created_at, now());
      }
      | other => {
        panic!("unexpected intent {other:?}")
      }
    }
    assert_eq!(
      intents[1],
      TaskAction::SetEditingTask(None)
    );
    assert!(!form.is_open());
    assert!(form.draft().title.is_empty());
  }

  #[test]
  fn edit_submit_emits_update_with_same_id(
  ) {
    let task = existing_task();
    let mut form = TaskForm::new("Personal");
    form.open(Some(&task));
    form.set_priority(Priority::Low);

    let intents =
      form.submit(now()).expect("valid");
    match &intents[0] {
      | TaskAction::UpdateTask(updated) => {
        assert_eq!(updated.id, task.id);
        assert_eq!(
          updated.created_at,
          task.created_at
        );
        assert_eq!(updated.updated_at, now());
        assert_eq!(
          updated.priority,
          Priority::Low
        );
      }
      | other => {
        panic!("unexpected intent {other:?}")
      }
    }
  }

  #[test]
  fn close_discards_draft_and_errors() {
    let mut form = TaskForm::new("Personal");
    form.open(None);
    form.set_description(Some("draft".to_string()));
    assert!(form.submit(now()).is_err());
    form.open_share_dialog();

    let intent = form.close();
    assert_eq!(
      intent,
      TaskAction::SetEditingTask(None)
    );
    assert!(!form.is_open());
    assert!(form.errors().is_empty());
    assert!(!form.share_open());
    assert_eq!(
      form.draft(),
      &TaskDraft::empty(
        "Personal",
        Priority::Medium
      )
    );
  }

  #[test]
  fn stop_without_session_is_noop() {
    let mut form = TaskForm::new("Personal");
    form.open(None);
    assert!(!form.stop_tracking(now(), 5));
    assert!(form.draft().time_entries.is_empty());
  }

  #[test]
  fn stop_appends_one_entry_and_clears_session(
  ) {
    let mut form = TaskForm::new("Personal");
    form.open(None);
    let started = now();
    assert!(
      form.start_tracking(started, Some(30))
    );
    assert_eq!(
      form.countdown_minutes(),
      Some(30)
    );

    let ended =
      started + Duration::minutes(12);
    assert!(form.stop_tracking(ended, 12));

    let entries = &form.draft().time_entries;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].start, started);
    assert_eq!(entries[0].end, Some(ended));
    assert_eq!(entries[0].duration, Some(12));
    assert!(
      form.draft().active_tracking.is_none()
    );
    assert_eq!(form.countdown_minutes(), None);
  }

  #[test]
  fn second_start_keeps_the_running_session(
  ) {
    let mut form = TaskForm::new("Personal");
    form.open(None);
    let first = now();
    assert!(form.start_tracking(first, None));
    assert!(!form.start_tracking(
      first + Duration::minutes(1),
      None
    ));
    assert_eq!(
      form
        .draft()
        .active_tracking
        .map(|s| s.start),
      Some(first)
    );
  }

  #[test]
  fn recurrence_mode_change_passes_end_date_through(
  ) {
    let mut task = existing_task();
    task.recurrence_end_date =
      chrono::NaiveDate::from_ymd_opt(
        2026, 12, 31
      );
    let mut form = TaskForm::new("Personal");
    form.open(Some(&task));

    let next = form
      .recurrence()
      .with_mode(Recurrence::None);
    assert_eq!(
      next.end_date,
      task.recurrence_end_date
    );
    form.set_recurrence(next);
    assert_eq!(
      form.draft().recurrence,
      Some(Recurrence::None)
    );
    assert_eq!(
      form.draft().recurrence_end_date,
      task.recurrence_end_date
    );
  }

  #[test]
  fn subtasks_add_toggle_remove() {
    let mut form = TaskForm::new("Personal");
    form.open(None);
    assert!(!form.add_subtask("   ", now()));
    assert!(form.add_subtask("Draft outline", now()));

    let id = form.draft().subtasks[0].id;
    form.toggle_subtask(id);
    assert!(form.draft().subtasks[0].completed);
    form.remove_subtask(id);
    assert!(form.draft().subtasks.is_empty());
  }

  #[test]
  fn sharing_dedupes_by_email() {
    let mut form = TaskForm::new("Personal");
    form.open(None);
    form.open_share_dialog();

    assert!(!form.share_with(
      "not-an-email",
      SharePermission::View
    ));
    assert!(
      form.share_errors().get(EMAIL_FIELD).is_some()
    );

    assert!(form.share_with(
      "sam@example.com",
      SharePermission::View
    ));
    assert!(form.share_with(
      "SAM@example.com",
      SharePermission::Edit
    ));
    let shared = &form.draft().shared_with;
    assert_eq!(shared.len(), 1);
    assert_eq!(
      shared[0].permission,
      SharePermission::Edit
    );
    assert!(form.share_errors().is_empty());

    let user_id = shared[0].user_id;
    form.unshare(user_id);
    assert!(form.draft().shared_with.is_empty());
  }

  #[test]
  fn caller_driven_close_resets_without_intent(
  ) {
    let task = existing_task();
    let mut form = TaskForm::new("Personal");
    form.sync(true, Some(&task));
    assert!(form.editing().is_some());
    form.set_title(String::new());
    assert!(form.submit(now()).is_err());
    assert!(!form.errors().is_empty());

    form.sync(false, Some(&task));
    assert!(!form.is_open());
    assert!(form.errors().is_empty());
    assert!(form.draft().title.is_empty());
  }
}
