mod recurrence_picker;
mod share_modal;
mod subtask_list;
mod task_card;
mod task_filters;
mod task_form;
mod task_list;
mod time_tracker;

pub use recurrence_picker::RecurrencePicker;
pub use share_modal::ShareModal;
pub use subtask_list::SubtaskList;
pub use task_card::TaskCard;
pub use task_filters::TaskFilters;
pub use task_form::TaskForm;
pub use task_list::TaskList;
pub use time_tracker::TimeTracker;
