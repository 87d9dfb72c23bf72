use chrono::{Duration, NaiveDate};
use shared::ShiftCode;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::calendar;
use crate::domain::entities::{AiShift, Employee};
use crate::domain::rules::SchedulingRules;
use crate::domain::state::EmployeeState;

/// Reconstruct every employee's rolling state from the tail of the
/// previous month's shifts.
///
/// The tail spans the lookback window immediately before the first day of
/// the target month, walked oldest to newest. Days without a record count
/// as ordinary days off. `shifts_this_month` starts at zero regardless of
/// history.
pub fn seed_employee_states(
    employees: &[Employee],
    prev_shifts: &[AiShift],
    year: i32,
    month: u32,
    rules: &SchedulingRules,
) -> HashMap<Uuid, EmployeeState> {
    let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return employees
            .iter()
            .map(|employee| (employee.id, EmployeeState::default()))
            .collect();
    };

    let mut history: HashMap<(&str, NaiveDate), ShiftCode> = HashMap::new();
    for shift in prev_shifts {
        history.insert(
            (shift.employee_name.as_str(), shift.date),
            shift.shift_code(),
        );
    }

    let lookback = rules.lookback_days();
    let mut states = HashMap::new();

    for employee in employees {
        let mut state = EmployeeState::default();

        for offset in (1..=lookback).rev() {
            let day = first_day - Duration::days(offset);
            let code = history
                .get(&(employee.name.as_str(), day))
                .copied()
                .unwrap_or(ShiftCode::DayOff);

            match calendar::shift_end_instant(day, code) {
                Some(end) if code.is_work() => state.record_work(code, end),
                _ => state.record_rest(code),
            }
        }

        state.shifts_this_month = 0;
        states.insert(employee.id, state);
    }

    states
}
