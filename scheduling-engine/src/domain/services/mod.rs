pub mod schedule_service;

pub use schedule_service::{previous_month, DraftRequest, ScheduleService};
