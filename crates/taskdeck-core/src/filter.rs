//! List filtering and ordering.
//!
//! The store keeps tasks in display order;
//! filters and sorts only produce a view of
//! that order and never write back.

use chrono::{
  Datelike,
  Duration,
  NaiveDate
};

use crate::task::{
  Priority,
  Task
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default,
)]
pub enum StatusFilter {
  #[default]
  All,
  Active,
  Completed
}

impl StatusFilter {
  pub const ALL: [StatusFilter; 3] = [
    StatusFilter::All,
    StatusFilter::Active,
    StatusFilter::Completed
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | StatusFilter::All => "all",
      | StatusFilter::Active => "active",
      | StatusFilter::Completed => {
        "completed"
      }
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | StatusFilter::All => "All tasks",
      | StatusFilter::Active => "Active",
      | StatusFilter::Completed => {
        "Completed"
      }
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|s| s.as_str() == raw)
  }
}

/// Due-date window, counted from `today`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default,
)]
pub enum DueWindow {
  #[default]
  All,
  Today,
  Week,
  Month
}

impl DueWindow {
  pub const ALL: [DueWindow; 4] = [
    DueWindow::All,
    DueWindow::Today,
    DueWindow::Week,
    DueWindow::Month
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | DueWindow::All => "all",
      | DueWindow::Today => "today",
      | DueWindow::Week => "week",
      | DueWindow::Month => "month"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | DueWindow::All => "Any due date",
      | DueWindow::Today => "Due today",
      | DueWindow::Week => "Due this week",
      | DueWindow::Month => {
        "Due this month"
      }
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|w| w.as_str() == raw)
  }

  /// `Today` is the date itself, `Week`
  /// the next seven days, `Month` the
  /// rest of the calendar month. Tasks
  /// without a due date only match `All`.
  pub fn contains(
    self,
    due: Option<NaiveDate>,
    today: NaiveDate
  ) -> bool {
    let Some(due) = due else {
      return self == DueWindow::All;
    };
    match self {
      | DueWindow::All => true,
      | DueWindow::Today => due == today,
      | DueWindow::Week => {
        due >= today
          && due <= today + Duration::days(6)
      }
      | DueWindow::Month => {
        due >= today
          && due.year() == today.year()
          && due.month() == today.month()
      }
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct FilterOptions {
  pub status:   StatusFilter,
  /// `None` matches every category.
  pub category: Option<String>,
  /// `None` matches every priority.
  pub priority: Option<Priority>,
  pub due:      DueWindow,
  pub search:   String
}

impl FilterOptions {
  /// Whether any option narrows the list.
  pub fn is_active(&self) -> bool {
    self.status != StatusFilter::All
      || self.category.is_some()
      || self.priority.is_some()
      || self.due != DueWindow::All
      || !self.search.trim().is_empty()
  }

  pub fn matches(
    &self,
    task: &Task,
    today: NaiveDate
  ) -> bool {
    let status_match = match self.status {
      | StatusFilter::All => true,
      | StatusFilter::Active => {
        !task.completed
      }
      | StatusFilter::Completed => {
        task.completed
      }
    };
    if !status_match {
      return false;
    }

    if let Some(category) =
      self.category.as_deref()
      && task.category != category
    {
      return false;
    }

    if let Some(priority) = self.priority
      && task.priority != priority
    {
      return false;
    }

    if !self.due.contains(task.due_date, today)
    {
      return false;
    }

    let q = self
      .search
      .trim()
      .to_lowercase();
    if q.is_empty() {
      return true;
    }
    let contains = |text: Option<&str>| {
      text.is_some_and(|t| {
        t.to_lowercase().contains(&q)
      })
    };
    contains(Some(task.title.as_str()))
      || contains(task.description.as_deref())
      || contains(task.notes.as_deref())
  }
}

/// View ordering. `Manual` keeps the
/// store's drag order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default,
)]
pub enum SortOption {
  #[default]
  Manual,
  Newest,
  Oldest,
  DueDate,
  Priority
}

impl SortOption {
  pub const ALL: [SortOption; 5] = [
    SortOption::Manual,
    SortOption::Newest,
    SortOption::Oldest,
    SortOption::DueDate,
    SortOption::Priority
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | SortOption::Manual => "manual",
      | SortOption::Newest => "newest",
      | SortOption::Oldest => "oldest",
      | SortOption::DueDate => "dueDate",
      | SortOption::Priority => "priority"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | SortOption::Manual => "My order",
      | SortOption::Newest => {
        "Newest first"
      }
      | SortOption::Oldest => {
        "Oldest first"
      }
      | SortOption::DueDate => "Due date",
      | SortOption::Priority => "Priority"
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|s| s.as_str() == raw)
  }

  /// Only the manual order can be
  /// rearranged by dragging.
  pub fn allows_reorder(self) -> bool {
    self == SortOption::Manual
  }
}

fn priority_rank(priority: Priority) -> u8 {
  match priority {
    | Priority::High => 0,
    | Priority::Medium => 1,
    | Priority::Low => 2
  }
}

/// The tasks to show, in the order to show
/// them. Sorting is stable, so ties keep
/// their manual order.
pub fn visible_tasks(
  tasks: &[Task],
  filter: &FilterOptions,
  sort: SortOption,
  today: NaiveDate
) -> Vec<Task> {
  let mut visible: Vec<Task> = tasks
    .iter()
    .filter(|task| {
      filter.matches(task, today)
    })
    .cloned()
    .collect();

  match sort {
    | SortOption::Manual => {}
    | SortOption::Newest => visible
      .sort_by(|a, b| {
        b.created_at.cmp(&a.created_at)
      }),
    | SortOption::Oldest => visible
      .sort_by_key(|task| task.created_at),
    | SortOption::DueDate => visible
      .sort_by_key(|task| {
        (task.due_date.is_none(), task.due_date)
      }),
    | SortOption::Priority => visible
      .sort_by_key(|task| {
        priority_rank(task.priority)
      })
  }

  tracing::trace!(
    total = tasks.len(),
    visible = visible.len(),
    sort = sort.as_str(),
    "computed visible tasks"
  );
  visible
}
