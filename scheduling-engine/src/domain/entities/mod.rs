pub mod employee;
pub mod schedule;
pub mod service;

pub use employee::{Employee, FixedAssignment, FixedWeeklyPreference};
pub use schedule::{
    AiShift, MonthlySchedule, ScheduleViolation, ScoreBreakdown, ViolationRule,
};
pub use service::{Service, ShiftCoverage, StaffingTargets};
