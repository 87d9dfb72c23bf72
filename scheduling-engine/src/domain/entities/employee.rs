use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{Identifiable, ShiftCode, WorkPattern};
use uuid::Uuid;

use crate::domain::calendar::DayOfWeek;

/// Day-of-week preference declared per employee, consulted for
/// standard-rotation employees before the greedy fill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixedWeeklyPreference {
    pub day: DayOfWeek,
    pub code: ShiftCode,
}

/// Date-ranged leave or rest assignment that hard-overrides scheduling
/// within its range (inclusive on both ends).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixedAssignment {
    pub code: ShiftCode,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
}

impl FixedAssignment {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Employee entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub service_id: Uuid,
    pub work_pattern: WorkPattern,
    pub prefers_weekend_work: bool,
    pub fixed_weekly: Vec<FixedWeeklyPreference>,
    pub fixed_assignments: Vec<FixedAssignment>,
}

impl Employee {
    pub fn new(name: impl Into<String>, service_id: Uuid, work_pattern: WorkPattern) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            service_id,
            work_pattern,
            prefers_weekend_work: false,
            fixed_weekly: Vec::new(),
            fixed_assignments: Vec::new(),
        }
    }

    pub fn with_weekend_preference(mut self) -> Self {
        self.prefers_weekend_work = true;
        self
    }

    pub fn with_fixed_weekly(mut self, day: DayOfWeek, code: ShiftCode) -> Self {
        self.fixed_weekly.push(FixedWeeklyPreference { day, code });
        self
    }

    pub fn with_fixed_assignment(
        mut self,
        code: ShiftCode,
        start_date: NaiveDate,
        end_date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        self.fixed_assignments.push(FixedAssignment {
            code,
            start_date,
            end_date,
            description: Some(description.into()),
        });
        self
    }

    pub fn is_standard_rotation(&self) -> bool {
        self.work_pattern == WorkPattern::StandardRotation
    }

    /// The weekday work shift implied by a fixed Monday-to-Friday pattern.
    pub fn pattern_shift(&self) -> Option<ShiftCode> {
        match self.work_pattern {
            WorkPattern::MondayToFridayMorning => Some(ShiftCode::Morning),
            WorkPattern::MondayToFridayAfternoon => Some(ShiftCode::Afternoon),
            WorkPattern::StandardRotation => None,
        }
    }

    pub fn fixed_weekly_for(&self, day: DayOfWeek) -> Option<ShiftCode> {
        self.fixed_weekly
            .iter()
            .find(|preference| preference.day == day)
            .map(|preference| preference.code)
    }

    /// First leave-kind fixed assignment covering the date, if any.
    /// Valid leave kinds are D, LAO, LM and C; work codes and the
    /// holiday-rest output code F are not accepted as overlays.
    pub fn fixed_assignment_on(&self, date: NaiveDate) -> Option<&FixedAssignment> {
        self.fixed_assignments.iter().find(|assignment| {
            assignment.contains(date)
                && matches!(
                    assignment.code,
                    ShiftCode::DayOff
                        | ShiftCode::PaidLeave
                        | ShiftCode::SickLeave
                        | ShiftCode::CompRest
                )
        })
    }
}

impl Identifiable for Employee {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_assignment_range_is_inclusive() {
        let assignment = FixedAssignment {
            code: ShiftCode::PaidLeave,
            start_date: date(2025, 5, 10),
            end_date: date(2025, 5, 20),
            description: None,
        };

        assert!(assignment.contains(date(2025, 5, 10)));
        assert!(assignment.contains(date(2025, 5, 20)));
        assert!(!assignment.contains(date(2025, 5, 9)));
        assert!(!assignment.contains(date(2025, 5, 21)));
    }

    #[test]
    fn test_pattern_shift() {
        let service_id = Uuid::new_v4();
        let morning = Employee::new("E1", service_id, WorkPattern::MondayToFridayMorning);
        let rotation = Employee::new("E2", service_id, WorkPattern::StandardRotation);

        assert_eq!(morning.pattern_shift(), Some(ShiftCode::Morning));
        assert_eq!(rotation.pattern_shift(), None);
        assert!(rotation.is_standard_rotation());
    }

    #[test]
    fn test_fixed_weekly_lookup() {
        let employee = Employee::new(
            "E1",
            Uuid::new_v4(),
            WorkPattern::StandardRotation,
        )
        .with_fixed_weekly(DayOfWeek::Wednesday, ShiftCode::Night);

        assert_eq!(
            employee.fixed_weekly_for(DayOfWeek::Wednesday),
            Some(ShiftCode::Night)
        );
        assert_eq!(employee.fixed_weekly_for(DayOfWeek::Thursday), None);
    }

    #[test]
    fn test_fixed_assignment_on_skips_non_leave_codes() {
        let employee = Employee::new("E1", Uuid::new_v4(), WorkPattern::StandardRotation)
            .with_fixed_assignment(
                ShiftCode::Morning,
                date(2025, 5, 1),
                date(2025, 5, 2),
                "bogus work-coded entry",
            )
            .with_fixed_assignment(
                ShiftCode::HolidayRest,
                date(2025, 5, 1),
                date(2025, 5, 1),
                "bogus holiday-rest entry",
            )
            .with_fixed_assignment(
                ShiftCode::SickLeave,
                date(2025, 5, 2),
                date(2025, 5, 4),
                "flu",
            );

        let found = employee.fixed_assignment_on(date(2025, 5, 2)).unwrap();
        assert_eq!(found.code, ShiftCode::SickLeave);
        // Neither the work code nor F count as a leave overlay.
        assert!(employee.fixed_assignment_on(date(2025, 5, 1)).is_none());
    }

    #[test]
    fn test_fixed_assignment_accepts_all_leave_kinds() {
        for code in [
            ShiftCode::DayOff,
            ShiftCode::PaidLeave,
            ShiftCode::SickLeave,
            ShiftCode::CompRest,
        ] {
            let employee = Employee::new("E1", Uuid::new_v4(), WorkPattern::StandardRotation)
                .with_fixed_assignment(code, date(2025, 5, 1), date(2025, 5, 3), "leave");
            let found = employee.fixed_assignment_on(date(2025, 5, 2)).unwrap();
            assert_eq!(found.code, code);
        }
    }
}
