use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub const ALL: [Recurrence; 4] = [
        Recurrence::None,
        Recurrence::Daily,
        Recurrence::Weekly,
        Recurrence::Monthly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Recurrence::None => "Does not repeat",
            Recurrence::Daily => "Daily",
            Recurrence::Weekly => "Weekly",
            Recurrence::Monthly => "Monthly",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Recurrence::ALL
            .into_iter()
            .find(|mode| mode.as_str() == raw.trim())
    }

    pub fn repeats(self) -> bool {
        self != Recurrence::None
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SharePermission {
    #[default]
    View,
    Edit,
}

impl SharePermission {
    pub fn as_str(self) -> &'static str {
        match self {
            SharePermission::View => "view",
            SharePermission::Edit => "edit",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "view" => Some(SharePermission::View),
            "edit" => Some(SharePermission::Edit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Subtask {
    pub fn new(title: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            completed: false,
            created_at: now,
        }
    }
}

/// A recorded stretch of work on a task. Durations are whole minutes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeEntry {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub countdown_minutes: Option<u32>,
}

impl TimeEntry {
    pub fn is_finished(&self) -> bool {
        self.end.is_some()
    }
}

/// The in-progress tracking session of a task. It has no id and never
/// appears in `Task::time_entries` until it is stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveTracking {
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub countdown_minutes: Option<u32>,
}

impl ActiveTracking {
    pub fn is_countdown(&self) -> bool {
        self.countdown_minutes.is_some()
    }

    /// Closes the session into a finished entry.
    pub fn finish(self, end: DateTime<Utc>, duration: u32) -> TimeEntry {
        TimeEntry {
            id: Uuid::new_v4(),
            start: self.start,
            end: Some(end),
            duration: Some(duration),
            countdown_minutes: self.countdown_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareEntry {
    pub user_id: Uuid,
    pub email: String,
    #[serde(default)]
    pub permission: SharePermission,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default = "default_category_color")]
    pub color: String,
}

fn default_category_color() -> String {
    "#6366f1".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub completed: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    pub category: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub recurrence: Recurrence,

    #[serde(default)]
    pub recurrence_end_date: Option<NaiveDate>,

    #[serde(default)]
    pub subtasks: Vec<Subtask>,

    #[serde(default)]
    pub time_entries: Vec<TimeEntry>,

    #[serde(default)]
    pub shared_with: Vec<ShareEntry>,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub active_tracking: Option<ActiveTracking>,
}

impl Task {
    pub fn new_pending(title: String, category: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: None,
            completed: false,
            created_at: now,
            updated_at: now,
            due_date: None,
            category,
            priority: Priority::default(),
            notes: None,
            recurrence: Recurrence::default(),
            recurrence_end_date: None,
            subtasks: vec![],
            time_entries: vec![],
            shared_with: vec![],
            status: TaskStatus::default(),
            active_tracking: None,
        }
    }

    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.completed).count()
    }

    pub fn is_tracking(&self) -> bool {
        self.active_tracking.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_lowercase() {
        let json = serde_json::to_string(&(Priority::High, Recurrence::Weekly, TaskStatus::Pending))
            .expect("serialize enums");
        assert_eq!(json, r#"["high","weekly","pending"]"#);
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let raw = r#"{
            "id": "5b1e6fb4-5f3e-4a5c-9a55-0c2d6c7c2b11",
            "title": "Water plants",
            "created_at": "2026-01-02T03:04:05Z",
            "updated_at": "2026-01-02T03:04:05Z",
            "category": "Home"
        }"#;
        let task: Task = serde_json::from_str(raw).expect("parse task");
        assert!(task.subtasks.is_empty());
        assert!(task.time_entries.is_empty());
        assert!(task.shared_with.is_empty());
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.recurrence, Recurrence::None);
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.active_tracking.is_none());
    }

    #[test]
    fn finishing_a_session_keeps_its_start_and_countdown() {
        let start = "2026-03-01T09:00:00Z".parse::<DateTime<Utc>>().expect("start");
        let end = "2026-03-01T09:25:00Z".parse::<DateTime<Utc>>().expect("end");
        let session = ActiveTracking {
            start,
            countdown_minutes: Some(25),
        };

        let entry = session.finish(end, 25);
        assert_eq!(entry.start, start);
        assert_eq!(entry.end, Some(end));
        assert_eq!(entry.duration, Some(25));
        assert_eq!(entry.countdown_minutes, Some(25));
        assert!(entry.is_finished());
    }

    #[test]
    fn recurrence_parse_accepts_known_modes_only() {
        assert_eq!(Recurrence::parse("monthly"), Some(Recurrence::Monthly));
        assert_eq!(Recurrence::parse("yearly"), None);
        assert!(!Recurrence::None.repeats());
        assert!(Recurrence::Daily.repeats());
    }
}
