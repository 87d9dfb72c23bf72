use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{Identifiable, ScheduleStatus, Severity, ShiftCode, Timestamped, ViolationCategory};
use uuid::Uuid;

use crate::domain::calendar;

/// One dated assignment: a single shift code for one employee on one day.
///
/// Work shifts carry `HH:MM` times and free-text notes; rest and leave
/// days carry empty times and a notes string whose first token is the
/// code. The explicit `code` field is authoritative when present; legacy
/// records without it fall back to note/time recovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiShift {
    pub date: NaiveDate,
    pub employee_name: String,
    pub service_name: String,
    pub start_time: String,
    pub end_time: String,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ShiftCode>,
}

impl AiShift {
    /// Work-shift atom; times come from the shift vocabulary.
    pub fn work(
        date: NaiveDate,
        employee_name: impl Into<String>,
        service_name: impl Into<String>,
        code: ShiftCode,
        notes: impl Into<String>,
    ) -> AiShift {
        let (start_time, end_time) = match calendar::shift_times(code) {
            Some(window) => (
                calendar::format_time(window.start),
                calendar::format_time(window.end),
            ),
            None => (String::new(), String::new()),
        };

        AiShift {
            date,
            employee_name: employee_name.into(),
            service_name: service_name.into(),
            start_time,
            end_time,
            notes: notes.into(),
            code: Some(code),
        }
    }

    /// Rest/leave/holiday atom; times are empty and the notes string
    /// starts with the code.
    pub fn rest(
        date: NaiveDate,
        employee_name: impl Into<String>,
        service_name: impl Into<String>,
        code: ShiftCode,
        notes: impl Into<String>,
    ) -> AiShift {
        AiShift {
            date,
            employee_name: employee_name.into(),
            service_name: service_name.into(),
            start_time: String::new(),
            end_time: String::new(),
            notes: notes.into(),
            code: Some(code),
        }
    }

    pub fn shift_code(&self) -> ShiftCode {
        self.code
            .unwrap_or_else(|| ShiftCode::recover(&self.start_time, &self.notes))
    }
}

/// Rule identifier of a schedule violation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ViolationRule {
    #[serde(rename = "No Employees")]
    NoEmployees,
    #[serde(rename = "Staffing Shortage")]
    StaffingShortage,
    #[serde(rename = "Minimum Rest Between Shifts")]
    MinRestBetweenShifts,
    #[serde(rename = "Minimum Rest Before Work")]
    MinRestBeforeWork,
    #[serde(rename = "Max Consecutive Work Days")]
    MaxConsecutiveWorkDays,
    #[serde(rename = "Max Consecutive Days Off")]
    MaxConsecutiveDaysOff,
    #[serde(rename = "Weekend Target Not Met")]
    WeekendTargetNotMet,
}

impl ViolationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationRule::NoEmployees => "No Employees",
            ViolationRule::StaffingShortage => "Staffing Shortage",
            ViolationRule::MinRestBetweenShifts => "Minimum Rest Between Shifts",
            ViolationRule::MinRestBeforeWork => "Minimum Rest Before Work",
            ViolationRule::MaxConsecutiveWorkDays => "Max Consecutive Work Days",
            ViolationRule::MaxConsecutiveDaysOff => "Max Consecutive Days Off",
            ViolationRule::WeekendTargetNotMet => "Weekend Target Not Met",
        }
    }
}

impl std::fmt::Display for ViolationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleViolation {
    pub employee_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub shift_code: Option<ShiftCode>,
    pub rule: ViolationRule,
    pub details: String,
    pub severity: Severity,
    pub category: ViolationCategory,
}

impl ScheduleViolation {
    pub fn error(rule: ViolationRule, category: ViolationCategory, details: String) -> Self {
        Self {
            employee_name: None,
            date: None,
            shift_code: None,
            rule,
            details,
            severity: Severity::Error,
            category,
        }
    }

    pub fn warning(rule: ViolationRule, category: ViolationCategory, details: String) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(rule, category, details)
        }
    }

    pub fn for_employee(mut self, employee_name: impl Into<String>) -> Self {
        self.employee_name = Some(employee_name.into());
        self
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_code(mut self, code: ShiftCode) -> Self {
        self.shift_code = Some(code);
        self
    }
}

/// Score split by rule category. Subscores are views over the same
/// penalties, each clamped to [0, 100] once evaluation is complete.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub service_rules: i32,
    pub employee_wellbeing: i32,
}

/// Generated monthly schedule, as handed to the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySchedule {
    pub id: Uuid,
    pub year: i32,
    pub month: u32,
    pub service_id: Uuid,
    pub service_name: String,
    pub shifts: Vec<AiShift>,
    pub score: i32,
    pub breakdown: ScoreBreakdown,
    pub violations: Vec<ScheduleViolation>,
    pub summary_text: String,
    pub status: ScheduleStatus,
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for MonthlySchedule {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for MonthlySchedule {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
