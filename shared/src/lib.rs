pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{DomainError, DomainResult};
pub use types::{
    Identifiable, ScheduleStatus, Severity, ShiftCode, Timestamped, ViolationCategory, WorkPattern,
};
