use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use shared::ShiftCode;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::domain::calendar::{self, DayOfWeek};
use crate::domain::entities::{AiShift, Employee, Service};
use crate::domain::rules::SchedulingRules;
use crate::domain::state::EmployeeState;

/// Greedy single-sweep schedule constructor.
///
/// One attempt walks the month day by day and decides every employee's
/// code through five phases: fixed weekday patterns, date-ranged leave
/// overlays, fixed weekly preferences, greedy fill of the open staffing
/// need, and default rest for everyone left. An attempt never fails;
/// staffing shortages are left for the evaluator to report.
pub struct ScheduleGenerator<'a> {
    service: &'a Service,
    employees: &'a [Employee],
    holidays: &'a HashSet<NaiveDate>,
    rules: &'a SchedulingRules,
}

/// Working buffers of a single attempt: per-employee states plus the
/// shifts assigned so far (with a by-day index for weekend lookbacks).
struct Attempt {
    states: HashMap<Uuid, EmployeeState>,
    shifts: Vec<AiShift>,
    codes: HashMap<(Uuid, NaiveDate), ShiftCode>,
}

impl Attempt {
    fn state(&self, employee_id: Uuid) -> EmployeeState {
        self.states.get(&employee_id).cloned().unwrap_or_default()
    }

    fn push_work(
        &mut self,
        employee: &Employee,
        service_name: &str,
        date: NaiveDate,
        code: ShiftCode,
        notes: &str,
    ) {
        if let Some(end) = calendar::shift_end_instant(date, code) {
            self.states
                .entry(employee.id)
                .or_default()
                .record_work(code, end);
        }
        self.codes.insert((employee.id, date), code);
        self.shifts
            .push(AiShift::work(date, employee.name.clone(), service_name, code, notes));
    }

    fn push_rest(
        &mut self,
        employee: &Employee,
        service_name: &str,
        date: NaiveDate,
        code: ShiftCode,
        notes: String,
    ) {
        self.states.entry(employee.id).or_default().record_rest(code);
        self.codes.insert((employee.id, date), code);
        self.shifts
            .push(AiShift::rest(date, employee.name.clone(), service_name, code, notes));
    }
}

/// Remaining staffing need of one day, already gated on the night flag.
struct OpenNeed {
    morning: u32,
    afternoon: u32,
    night: u32,
}

impl OpenNeed {
    fn remaining(&self, code: ShiftCode) -> u32 {
        match code {
            ShiftCode::Morning => self.morning,
            ShiftCode::Afternoon => self.afternoon,
            ShiftCode::Night => self.night,
            _ => 0,
        }
    }

    fn consume(&mut self, code: ShiftCode) {
        match code {
            ShiftCode::Morning => self.morning = self.morning.saturating_sub(1),
            ShiftCode::Afternoon => self.afternoon = self.afternoon.saturating_sub(1),
            ShiftCode::Night => self.night = self.night.saturating_sub(1),
            _ => {}
        }
    }
}

impl<'a> ScheduleGenerator<'a> {
    pub fn new(
        service: &'a Service,
        employees: &'a [Employee],
        holidays: &'a HashSet<NaiveDate>,
        rules: &'a SchedulingRules,
    ) -> Self {
        Self {
            service,
            employees,
            holidays,
            rules,
        }
    }

    /// Build one full-month candidate. States are cloned from the seeded
    /// map so every attempt starts from the same history.
    pub fn generate_attempt(
        &self,
        year: i32,
        month: u32,
        seeded_states: &HashMap<Uuid, EmployeeState>,
        rng: &mut StdRng,
    ) -> Vec<AiShift> {
        let mut attempt = Attempt {
            states: seeded_states.clone(),
            shifts: Vec::new(),
            codes: HashMap::new(),
        };

        for day in calendar::month_days(year, month) {
            self.schedule_day(day, &mut attempt, rng);
        }

        attempt.shifts
    }

    fn schedule_day(&self, day: NaiveDate, attempt: &mut Attempt, rng: &mut StdRng) {
        let holiday = calendar::is_holiday(day, self.holidays);
        let weekend = calendar::is_weekend(day);
        let coverage = self.service.coverage_for(weekend || holiday);

        let mut open = OpenNeed {
            morning: coverage.morning,
            afternoon: coverage.afternoon,
            night: if self.service.enable_night_shift {
                coverage.night
            } else {
                0
            },
        };
        let mut processed: HashSet<Uuid> = HashSet::new();

        self.apply_fixed_patterns(day, holiday, weekend, &mut open, &mut processed, attempt);
        self.apply_fixed_assignments(day, &mut processed, attempt);
        self.apply_fixed_weekly(day, holiday, weekend, &mut open, &mut processed, attempt);
        self.fill_open_staffing(day, holiday || weekend, &mut open, &mut processed, attempt, rng);
        self.apply_default_rest(day, holiday, weekend, &processed, attempt);
    }

    /// Phase A: employees on a Monday-to-Friday pattern work their fixed
    /// shift on plain weekdays, rest on holidays and weekends. A pattern
    /// shift blocked by the rest gap is skipped here and the day falls
    /// through to the later phases.
    fn apply_fixed_patterns(
        &self,
        day: NaiveDate,
        holiday: bool,
        weekend: bool,
        open: &mut OpenNeed,
        processed: &mut HashSet<Uuid>,
        attempt: &mut Attempt,
    ) {
        let service_name = self.service.name.as_str();

        for employee in self.employees {
            let Some(pattern_code) = employee.pattern_shift() else {
                continue;
            };

            if weekend {
                attempt.push_rest(
                    employee,
                    service_name,
                    day,
                    ShiftCode::DayOff,
                    "D (Rest - Fixed Pattern)".to_string(),
                );
                processed.insert(employee.id);
                continue;
            }

            if holiday {
                attempt.push_rest(
                    employee,
                    service_name,
                    day,
                    ShiftCode::HolidayRest,
                    "F (Holiday - Fixed Pattern)".to_string(),
                );
                processed.insert(employee.id);
                continue;
            }

            let Some(start) = calendar::shift_start_instant(day, pattern_code) else {
                continue;
            };
            if self.rest_gap_ok(&attempt.state(employee.id), start) {
                attempt.push_work(employee, service_name, day, pattern_code, "Fixed Pattern");
                open.consume(pattern_code);
                processed.insert(employee.id);
            }
        }
    }

    /// Phase B: date-ranged fixed assignments (leaves) hard-override the
    /// remaining employees, holidays included.
    fn apply_fixed_assignments(
        &self,
        day: NaiveDate,
        processed: &mut HashSet<Uuid>,
        attempt: &mut Attempt,
    ) {
        let service_name = self.service.name.as_str();

        for employee in self.employees {
            if processed.contains(&employee.id) {
                continue;
            }
            let Some(assignment) = employee.fixed_assignment_on(day) else {
                continue;
            };

            let notes = match &assignment.description {
                Some(description) => format!("{} ({})", assignment.code, description),
                None => assignment.code.as_str().to_string(),
            };
            let code = assignment.code;
            attempt.push_rest(employee, service_name, day, code, notes);
            processed.insert(employee.id);
        }
    }

    /// Phase C: fixed weekly preferences of standard-rotation employees.
    fn apply_fixed_weekly(
        &self,
        day: NaiveDate,
        holiday: bool,
        weekend: bool,
        open: &mut OpenNeed,
        processed: &mut HashSet<Uuid>,
        attempt: &mut Attempt,
    ) {
        let service_name = self.service.name.as_str();
        let day_of_week = DayOfWeek::from_date(day);

        for employee in self.employees {
            if processed.contains(&employee.id) || !employee.is_standard_rotation() {
                continue;
            }
            let Some(preference) = employee.fixed_weekly_for(day_of_week) else {
                continue;
            };

            if preference.is_rest() {
                if holiday {
                    attempt.push_rest(
                        employee,
                        service_name,
                        day,
                        ShiftCode::HolidayRest,
                        "F (Holiday - Fixed Rest)".to_string(),
                    );
                } else {
                    attempt.push_rest(
                        employee,
                        service_name,
                        day,
                        ShiftCode::DayOff,
                        "D (Fixed Weekly)".to_string(),
                    );
                }
                processed.insert(employee.id);
                continue;
            }

            if preference == ShiftCode::Night && !self.service.enable_night_shift {
                continue;
            }
            let Some(start) = calendar::shift_start_instant(day, preference) else {
                continue;
            };
            if !self.rest_gap_ok(&attempt.state(employee.id), start) {
                continue;
            }

            if holiday && !weekend {
                attempt.push_rest(
                    employee,
                    service_name,
                    day,
                    ShiftCode::HolidayRest,
                    format!("F (Holiday - Would Cover {})", preference),
                );
            } else {
                attempt.push_work(employee, service_name, day, preference, "Fixed Weekly");
                open.consume(preference);
            }
            processed.insert(employee.id);
        }
    }

    /// Phase D: greedy fill of the open staffing need, one shift type at
    /// a time, re-ranking the candidate pool for every slot.
    fn fill_open_staffing(
        &self,
        day: NaiveDate,
        weekend_or_holiday: bool,
        open: &mut OpenNeed,
        processed: &mut HashSet<Uuid>,
        attempt: &mut Attempt,
        rng: &mut StdRng,
    ) {
        let service_name = self.service.name.as_str();
        let mut fill_order = vec![ShiftCode::Morning, ShiftCode::Afternoon];
        if self.service.enable_night_shift {
            fill_order.push(ShiftCode::Night);
        }

        for code in fill_order {
            while open.remaining(code) > 0 {
                let Some(start) = calendar::shift_start_instant(day, code) else {
                    break;
                };

                let mut pool: Vec<&Employee> = self
                    .employees
                    .iter()
                    .filter(|employee| {
                        employee.is_standard_rotation()
                            && !processed.contains(&employee.id)
                            && self.passes_hard_filters(&attempt.state(employee.id), start)
                    })
                    .collect();
                if pool.is_empty() {
                    break;
                }

                // Shuffle first so the stable sort breaks ties randomly.
                pool.shuffle(rng);
                pool.sort_by_key(|employee| {
                    self.rank_key(employee, &attempt.state(employee.id), weekend_or_holiday)
                });

                let chosen = pool[0];
                attempt.push_work(chosen, service_name, day, code, "");
                open.consume(code);
                processed.insert(chosen.id);
            }
        }
    }

    /// Phase E: everyone still undecided rests. On weekends, a rest day
    /// completing a fully-rested weekend is annotated as such.
    fn apply_default_rest(
        &self,
        day: NaiveDate,
        holiday: bool,
        weekend: bool,
        processed: &HashSet<Uuid>,
        attempt: &mut Attempt,
    ) {
        let service_name = self.service.name.as_str();

        for employee in self.employees {
            if processed.contains(&employee.id) {
                continue;
            }

            let code = if holiday {
                ShiftCode::HolidayRest
            } else {
                ShiftCode::DayOff
            };
            let completes_weekend = weekend && self.other_weekend_day_rests(employee.id, day, attempt);
            let notes = match (code, completes_weekend) {
                (ShiftCode::HolidayRest, true) => "F (Weekend Target - Holiday)",
                (ShiftCode::HolidayRest, false) => "F (Holiday)",
                (_, true) => "D (Weekend Target)",
                (_, false) => "D",
            };
            attempt.push_rest(employee, service_name, day, code, notes.to_string());
        }
    }

    fn rest_gap_ok(&self, state: &EmployeeState, start: NaiveDateTime) -> bool {
        state.can_start_work_at(start, self.rules.minimum_rest_hours_between_shifts)
    }

    fn passes_hard_filters(&self, state: &EmployeeState, start: NaiveDateTime) -> bool {
        if !self.rest_gap_ok(state, start) {
            return false;
        }
        if state.is_resting()
            && state.consecutive_rest_days < self.rules.min_consecutive_days_off_before_work
        {
            return false;
        }
        state.consecutive_work_days < self.rules.max_consecutive_work_days
    }

    /// Candidate ordering of the greedy fill, smaller tuples first.
    /// Ties fall back to the pre-sort shuffle.
    fn rank_key(
        &self,
        employee: &Employee,
        state: &EmployeeState,
        weekend_or_holiday: bool,
    ) -> (u8, u8, u8, u32, u8, i64, u32) {
        let weekend_target = self.service.effective_weekend_target(self.rules);

        let met_preferred_rest =
            if state.consecutive_rest_days >= self.rules.preferred_consecutive_days_off {
                0
            } else {
                1
            };
        let continuing_short_block = if state.consecutive_work_days > 0
            && state.consecutive_work_days < self.rules.preferred_consecutive_work_days
        {
            0
        } else {
            1
        };
        let weekend_target_pref = if weekend_or_holiday && weekend_target > 0 {
            if employee.prefers_weekend_work {
                0
            } else {
                1
            }
        } else {
            0
        };
        let fairness = state.shifts_this_month;
        let weekend_pref = if weekend_or_holiday {
            if employee.prefers_weekend_work {
                0
            } else {
                1
            }
        } else {
            0
        };
        let rest_length = if state.is_resting() {
            -(state.consecutive_rest_days as i64)
        } else {
            0
        };
        let block_length = state.consecutive_work_days;

        (
            met_preferred_rest,
            continuing_short_block,
            weekend_target_pref,
            fairness,
            weekend_pref,
            rest_length,
            block_length,
        )
    }

    fn other_weekend_day_rests(&self, employee_id: Uuid, day: NaiveDate, attempt: &Attempt) -> bool {
        let other = match day.weekday() {
            Weekday::Sat => day.succ_opt(),
            Weekday::Sun => day.pred_opt(),
            _ => None,
        };
        let Some(other) = other else {
            return false;
        };
        attempt
            .codes
            .get(&(employee_id, other))
            .map_or(false, |code| code.is_rest())
    }
}
