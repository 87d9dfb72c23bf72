use chrono::{Duration, NaiveDateTime};
use shared::ShiftCode;

/// Rolling per-employee counters, mutated forward day by day within one
/// generation attempt or evaluation pass.
///
/// A rest day zeroes the work counter before a later work day increments
/// it again, so `record_work`/`record_rest` only ever bump their own
/// counter and clear the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeState {
    pub consecutive_work_days: u32,
    pub consecutive_rest_days: u32,
    pub shifts_this_month: u32,
    pub last_shift_code: Option<ShiftCode>,
    pub last_work_shift_end: Option<NaiveDateTime>,
}

impl EmployeeState {
    pub fn record_work(&mut self, code: ShiftCode, shift_end: NaiveDateTime) {
        self.consecutive_work_days += 1;
        self.consecutive_rest_days = 0;
        self.shifts_this_month += 1;
        self.last_shift_code = Some(code);
        self.last_work_shift_end = Some(shift_end);
    }

    pub fn record_rest(&mut self, code: ShiftCode) {
        self.consecutive_rest_days += 1;
        self.consecutive_work_days = 0;
        self.last_shift_code = Some(code);
    }

    /// An employee coming off a night shift has a rest streak of zero, so
    /// the day after a night counts as continuing the work block.
    pub fn is_resting(&self) -> bool {
        self.consecutive_rest_days > 0
    }

    /// Minimum-rest check between the last worked shift's end and a
    /// prospective shift start.
    pub fn can_start_work_at(&self, start: NaiveDateTime, min_rest_hours: i64) -> bool {
        match self.last_work_shift_end {
            Some(end) => start - end >= Duration::hours(min_rest_hours),
            None => true,
        }
    }
}
