use chrono::{DateTime, Duration, Utc};
use taskdeck_core::config::AppConfig;
use taskdeck_core::draft::{TITLE_FIELD, TITLE_REQUIRED};
use taskdeck_core::form::TaskForm;
use taskdeck_core::reorder::DragReorder;
use taskdeck_core::store::{TaskAction, TaskStore};
use taskdeck_core::task::{Priority, Recurrence, Task};
use taskdeck_core::tracking::{TrackingMode, session_minutes};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("taskdeck_core=debug"))
        .with_test_writer()
        .try_init();
}

fn at(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("timestamp")
}

fn submit_new(store: &mut TaskStore, form: &mut TaskForm, title: &str, now: DateTime<Utc>) {
    store.apply(TaskAction::SetEditingTask(None));
    form.open(store.editing_task.as_ref());
    form.set_title(title.to_string());
    for intent in form.submit(now).expect("valid draft") {
        store.apply(intent);
    }
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}

#[test]
fn create_edit_track_and_reorder() {
    init_tracing();

    let cfg = AppConfig::default();
    let mut store = TaskStore::new(cfg.categories.clone());
    let mut form = TaskForm::new(cfg.default_category());
    let t0 = at("2026-10-19T08:00:00Z");

    submit_new(&mut store, &mut form, "Write report", t0);
    submit_new(&mut store, &mut form, "Call plumber", t0 + Duration::minutes(1));
    submit_new(&mut store, &mut form, "Book flights", t0 + Duration::minutes(2));
    assert_eq!(
        titles(&store.tasks),
        vec!["Write report", "Call plumber", "Book flights"]
    );
    assert!(store.editing_task.is_none());

    let target = store.tasks[0].clone();
    store.apply(TaskAction::SetEditingTask(Some(target.clone())));
    form.open(store.editing_task.as_ref());
    assert_eq!(form.tracking_mode(), TrackingMode::Elapsed);

    form.set_priority(Priority::High);
    form.set_recurrence(form.recurrence().with_mode(Recurrence::Weekly));

    let started = t0 + Duration::hours(1);
    assert!(form.start_tracking(started, Some(25)));
    let session = form.draft().active_tracking.expect("session running");
    let stopped = started + Duration::minutes(40);
    let minutes = session_minutes(&session, stopped);
    assert_eq!(minutes, 25);
    assert!(form.stop_tracking(stopped, minutes));

    let edited_at = t0 + Duration::hours(2);
    for intent in form.submit(edited_at).expect("valid draft") {
        store.apply(intent);
    }

    let edited = &store.tasks[0];
    assert_eq!(edited.id, target.id);
    assert_eq!(edited.created_at, target.created_at);
    assert_eq!(edited.updated_at, edited_at);
    assert_eq!(edited.priority, Priority::High);
    assert_eq!(edited.recurrence, Recurrence::Weekly);
    assert_eq!(edited.time_entries.len(), 1);
    assert_eq!(edited.time_entries[0].duration, Some(25));
    assert!(edited.active_tracking.is_none());
    assert!(store.editing_task.is_none());

    let mut drag = DragReorder::new();
    drag.drag_start(&store.tasks[0]);
    let tasks = store.tasks.clone();
    let fired = drag.drop_with(&tasks, 2, |reordered| {
        store.apply(TaskAction::ReorderTasks(reordered));
    });
    assert!(fired);
    assert_eq!(
        titles(&store.tasks),
        vec!["Call plumber", "Book flights", "Write report"]
    );
}

#[test]
fn invalid_submit_never_reaches_the_store() {
    init_tracing();

    let mut store = TaskStore::new(AppConfig::default().categories);
    let mut form = TaskForm::new("Personal");
    form.open(None);

    let errors = form.submit(at("2026-10-19T08:00:00Z")).expect_err("empty title");
    assert_eq!(errors.get(TITLE_FIELD), Some(TITLE_REQUIRED));
    assert!(store.tasks.is_empty());

    store.apply(form.close());
    assert!(store.editing_task.is_none());
    assert!(form.errors().is_empty());
}

#[test]
fn editing_a_running_countdown_resumes_countdown_mode() {
    init_tracing();

    let t0 = at("2026-10-19T08:00:00Z");
    let mut store = TaskStore::new(AppConfig::default().categories);
    let mut form = TaskForm::new("Personal");

    submit_new(&mut store, &mut form, "Focus block", t0);
    let task = store.tasks[0].clone();
    store.apply(TaskAction::SetEditingTask(Some(task)));
    form.open(store.editing_task.as_ref());
    assert!(form.start_tracking(t0, Some(50)));
    for intent in form.submit(t0 + Duration::minutes(5)).expect("valid") {
        store.apply(intent);
    }

    store.apply(TaskAction::SetEditingTask(Some(store.tasks[0].clone())));
    form.open(store.editing_task.as_ref());
    assert_eq!(form.tracking_mode(), TrackingMode::Countdown);
    assert_eq!(form.countdown_minutes(), Some(50));
}
