pub mod config;
pub mod draft;
pub mod filter;
pub mod form;
pub mod recurrence;
pub mod reorder;
pub mod store;
pub mod task;
pub mod tracking;
