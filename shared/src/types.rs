use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shift code vocabulary. Work codes are M/T/N, everything else is rest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ShiftCode {
    #[serde(rename = "M")]
    Morning,
    #[serde(rename = "T")]
    Afternoon,
    #[serde(rename = "N")]
    Night,
    #[serde(rename = "D")]
    DayOff,
    #[serde(rename = "F")]
    HolidayRest,
    #[serde(rename = "LAO")]
    PaidLeave,
    #[serde(rename = "LM")]
    SickLeave,
    #[serde(rename = "C")]
    CompRest,
}

impl ShiftCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftCode::Morning => "M",
            ShiftCode::Afternoon => "T",
            ShiftCode::Night => "N",
            ShiftCode::DayOff => "D",
            ShiftCode::HolidayRest => "F",
            ShiftCode::PaidLeave => "LAO",
            ShiftCode::SickLeave => "LM",
            ShiftCode::CompRest => "C",
        }
    }

    pub fn from_code(code: &str) -> Option<ShiftCode> {
        match code {
            "M" => Some(ShiftCode::Morning),
            "T" => Some(ShiftCode::Afternoon),
            "N" => Some(ShiftCode::Night),
            "D" => Some(ShiftCode::DayOff),
            "F" => Some(ShiftCode::HolidayRest),
            "LAO" => Some(ShiftCode::PaidLeave),
            "LM" => Some(ShiftCode::SickLeave),
            "C" => Some(ShiftCode::CompRest),
            _ => None,
        }
    }

    pub fn is_work(&self) -> bool {
        matches!(
            self,
            ShiftCode::Morning | ShiftCode::Afternoon | ShiftCode::Night
        )
    }

    pub fn is_rest(&self) -> bool {
        !self.is_work()
    }

    /// True for leave codes that enter the system through fixed assignments
    /// or history rather than the generator itself.
    pub fn is_leave(&self) -> bool {
        matches!(
            self,
            ShiftCode::PaidLeave | ShiftCode::SickLeave | ShiftCode::CompRest
        )
    }

    /// Recover the code of a persisted shift atom that predates the explicit
    /// code field: a rest code is the first token of the notes, a work code
    /// is keyed by its start time, anything else is an ordinary day off.
    pub fn recover(start_time: &str, notes: &str) -> ShiftCode {
        let prefix = notes.split_whitespace().next().unwrap_or("");
        if let Some(code) = ShiftCode::from_code(prefix) {
            if code.is_rest() {
                return code;
            }
        }

        match start_time {
            "07:00" => ShiftCode::Morning,
            "14:00" => ShiftCode::Afternoon,
            "21:00" => ShiftCode::Night,
            _ => ShiftCode::DayOff,
        }
    }
}

impl std::fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkPattern {
    StandardRotation,
    MondayToFridayMorning,
    MondayToFridayAfternoon,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCategory {
    ServiceRule,
    EmployeeWellbeing,
}

pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
}

pub trait Identifiable {
    fn id(&self) -> Uuid;
}
